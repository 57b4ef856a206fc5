//! Words command implementation

use crate::app::{init_logging, AppConfig};
use crate::cli::args::{OutputFormat, WordsArgs};
use crate::config::Config;
use crate::words::{self, TextSource, WordsOptions};
use anyhow::Result;
use std::io::IsTerminal;
use std::time::Duration;

/// Fold command-line flags into the loaded configuration
pub fn apply_words_args(config: &mut Config, args: &WordsArgs) {
    if let Some(url) = &args.url {
        config.words.url = url.clone();
    }
    if let Some(top) = args.top {
        config.words.top_n = top;
    }
    if let Some(workers) = args.workers {
        config.words.workers = Some(workers);
    }
    if let Some(width) = args.width {
        config.words.chart_width = width;
    }
}

/// Where the text comes from: `--input` wins, otherwise the configured URL
pub fn text_source(config: &Config, args: &WordsArgs) -> TextSource {
    match &args.input {
        Some(path) => TextSource::File(path.clone()),
        None => TextSource::Url(config.words.url.clone()),
    }
}

/// Count word frequencies and print the most common words
pub async fn run_words_command(args: WordsArgs, mut config: Config, verbose: u8) -> Result<()> {
    init_logging(&AppConfig::new(verbose))?;
    config.emit_warnings();

    apply_words_args(&mut config, &args);
    config.validate()?;

    let options = WordsOptions {
        source: text_source(&config, &args),
        top_n: config.words.top_n,
        workers: config.words.effective_workers(),
        timeout: config.words.timeout_secs.map(Duration::from_secs),
    };

    let report = words::run(&options).await?;

    match args.format {
        OutputFormat::Text if !args.plain && std::io::stdout().is_terminal() => {
            let title = report.chart_title();
            words::show_chart(&report.chart(&title))?;
        }
        OutputFormat::Text => print!("{}", report.render_chart(config.words.chart_width)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
