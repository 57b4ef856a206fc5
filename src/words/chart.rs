//! Top-N selection and the horizontal bar chart widget

use super::mapreduce::WordCounts;
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup};
use serde::Serialize;

const AXIS_NAME: &str = "Frequency";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// The `n` most frequent words: count descending, then word ascending
pub fn top_words(counts: &WordCounts, n: usize) -> Vec<WordFrequency> {
    let mut entries: Vec<WordFrequency> = counts
        .iter()
        .map(|(word, count)| WordFrequency::new(word, count))
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    entries.truncate(n);
    entries
}

/// Widget drawing the most frequent words as horizontal bars.
///
/// Layout, top to bottom:
/// - title, and the subtitle when there is one
/// - one bar per word, most frequent first, label on the left and count at
///   the start of the bar
/// - a `0 .. max` scale under the bars and the "Frequency" axis name
///
/// Bars are scaled so the largest count spans the plot width. `max_width`
/// caps that width; without it the bars fill the area.
pub struct TopWordsChart<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub entries: &'a [WordFrequency],
    pub max_width: Option<u16>,
}

impl TopWordsChart<'_> {
    fn label_width(&self) -> u16 {
        let widest = self
            .entries
            .iter()
            .map(|e| Line::from(e.word.as_str()).width())
            .max()
            .unwrap_or(0);
        u16::try_from(widest).unwrap_or(u16::MAX)
    }

    /// Rows needed to draw the whole chart
    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.entries.len().max(1)).unwrap_or(u16::MAX);
        1 + u16::from(self.subtitle.is_some())
            .saturating_add(rows)
            .saturating_add(2)
    }

    /// Columns needed to draw the whole chart with bars `bar_width` wide
    pub fn width(&self, bar_width: u16) -> u16 {
        let text_width = |text: &str| u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX);
        let plot = self
            .label_width()
            .saturating_add(1)
            .saturating_add(bar_width);
        let axis = self
            .label_width()
            .saturating_add(1)
            .saturating_add(text_width(AXIS_NAME));
        plot.max(axis)
            .max(text_width(self.title))
            .max(self.subtitle.map(text_width).unwrap_or(0))
    }
}

impl Widget for &TopWordsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let subtitle_rows = u16::from(self.subtitle.is_some());
        let [title_area, subtitle_area, bars_area, scale_area, axis_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(subtitle_rows),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Line::from(self.title)
            .bold()
            .centered()
            .render(title_area, buf);
        if let Some(subtitle) = self.subtitle {
            Line::from(subtitle).italic().centered().render(subtitle_area, buf);
        }

        let Some(max) = self.entries.iter().map(|e| e.count).max() else {
            Line::from("(no words)").centered().render(bars_area, buf);
            return;
        };

        let label_width = self.label_width();
        let plot_width = match self.max_width {
            Some(max_width) => label_width
                .saturating_add(1)
                .saturating_add(max_width)
                .min(area.width),
            None => area.width,
        };
        let [plot_area, _] =
            Layout::horizontal([Constraint::Length(plot_width), Constraint::Min(0)])
                .areas(bars_area);

        let bars: Vec<Bar> = self
            .entries
            .iter()
            .map(|entry| {
                Bar::default()
                    .label(Line::from(entry.word.as_str()))
                    .value(entry.count)
            })
            .collect();

        BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .max(max)
            .data(BarGroup::default().bars(&bars))
            .render(plot_area, buf);

        // The scale and axis name sit under the bars, past the labels
        let axis_x = label_width.saturating_add(1).min(plot_width);
        let [_, scale] = Layout::horizontal([
            Constraint::Length(axis_x),
            Constraint::Length(plot_width - axis_x),
        ])
        .areas(scale_area);
        let [_, axis] =
            Layout::horizontal([Constraint::Length(axis_x), Constraint::Min(0)]).areas(axis_area);

        Line::from("0").left_aligned().gray().render(scale, buf);
        Line::from(max.to_string())
            .right_aligned()
            .gray()
            .render(scale, buf);
        Line::from(AXIS_NAME).centered().gray().render(axis, buf);
    }
}

/// Render the chart to plain text, bars `width` columns wide
pub fn render_bar_chart(
    title: &str,
    subtitle: Option<&str>,
    entries: &[WordFrequency],
    width: usize,
) -> String {
    let bar_width = u16::try_from(width.max(1)).unwrap_or(u16::MAX);
    let chart = TopWordsChart {
        title,
        subtitle,
        entries,
        max_width: Some(bar_width),
    };

    let area = Rect::new(0, 0, chart.width(bar_width), chart.height());
    let mut buf = Buffer::empty(area);
    (&chart).render(area, &mut buf);
    buffer_to_text(&buf)
}

/// Cell symbols of `buf`, one line per row with trailing blanks trimmed
fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect();
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text
}
