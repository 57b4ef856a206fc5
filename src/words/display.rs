//! Interactive chart view
//!
//! Draws the chart full-screen and waits for a key press before restoring
//! the terminal.

use super::chart::TopWordsChart;
use crate::error::{Error, Result};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::DefaultTerminal;

/// Show `chart` until any key is pressed
pub fn show_chart(chart: &TopWordsChart<'_>) -> Result<()> {
    let mut terminal = ratatui::try_init().map_err(Error::Terminal)?;
    let result = run(&mut terminal, chart);
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, chart: &TopWordsChart<'_>) -> Result<()> {
    loop {
        terminal
            .draw(|frame| {
                let [chart_area, footer_area] =
                    Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
                        .areas(frame.area());
                frame.render_widget(chart, chart_area);
                frame.render_widget(
                    Line::raw("Press any key to close").centered().dim(),
                    footer_area,
                );
            })
            .map_err(Error::Terminal)?;

        // crossterm also reports key release and repeat events on Windows
        if let Event::Key(key) = event::read().map_err(Error::Terminal)? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
