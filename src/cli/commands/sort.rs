//! Sort command implementation

use crate::app::{init_logging, AppConfig};
use crate::cli::args::{OutputFormat, SortArgs};
use crate::config::Config;
use crate::sort::{self, SortOptions};
use anyhow::Result;

/// Fold command-line flags into the loaded configuration
pub fn apply_sort_args(config: &mut Config, args: &SortArgs) {
    if let Some(max_parallel) = args.max_parallel {
        config.sort.max_parallel = max_parallel;
    }
    if let Some(on_conflict) = args.on_conflict {
        config.sort.on_conflict = on_conflict;
    }
    if let Some(log_file) = &args.log_file {
        config.sort.log_file = log_file.clone();
    }
}

/// Copy every file under the source folder into per-extension folders
pub async fn run_sort_command(args: SortArgs, mut config: Config, verbose: u8) -> Result<()> {
    apply_sort_args(&mut config, &args);
    if let Err(e) = config.validate() {
        crate::app::init_tracing(verbose);
        config.emit_warnings();
        return Err(e.into());
    }

    init_logging(
        &AppConfig::new(verbose).with_log_file(Some(config.sort.log_file.clone())),
    )?;
    config.emit_warnings();

    let options = SortOptions {
        source: args.source,
        output: args.output,
        max_parallel: config.sort.max_parallel,
        on_conflict: config.sort.on_conflict,
        show_progress: args.progress,
    };

    let report = sort::run(&options).await?;

    match args.format {
        OutputFormat::Text => println!("{}", report.summary()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::ConflictPolicy;
    use std::path::PathBuf;

    fn args() -> SortArgs {
        SortArgs {
            source: PathBuf::from("in"),
            output: PathBuf::from("out"),
            max_parallel: None,
            on_conflict: None,
            log_file: None,
            progress: false,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::new();
        let args = SortArgs {
            max_parallel: Some(2),
            on_conflict: Some(ConflictPolicy::Skip),
            log_file: Some(PathBuf::from("run.log")),
            ..args()
        };

        apply_sort_args(&mut config, &args);

        assert_eq!(config.sort.max_parallel, 2);
        assert_eq!(config.sort.on_conflict, ConflictPolicy::Skip);
        assert_eq!(config.sort.log_file, PathBuf::from("run.log"));
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = Config::new();
        config.sort.max_parallel = 9;

        apply_sort_args(&mut config, &args());

        assert_eq!(config.sort.max_parallel, 9);
        assert_eq!(config.sort.log_file, PathBuf::from("info.log"));
    }
}
