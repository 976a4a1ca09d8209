use std::io::Write;

use super::Chart;
use crate::Result;

/// Receives every chart of a dashboard pass, in view order.
pub trait ChartSink {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 32;

/// Draws each chart as labelled horizontal bars scaled to the largest value.
#[derive(Debug)]
pub struct TextSink<W> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bar_width: BAR_WIDTH,
        }
    }

    pub fn bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_owned()
    } else {
        let mut short: String = label.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

impl<W: Write> ChartSink for TextSink<W> {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        writeln!(self.out, "== {} ==", chart.title)?;

        let points = chart.data.points();
        if points.is_empty() {
            writeln!(self.out, "(no data)")?;
        }

        let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        let label_width = points
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0)
            .min(LABEL_WIDTH);

        for point in &points {
            let len = if max > 0.0 {
                ((point.value / max) * self.bar_width as f64).round() as usize
            } else {
                0
            };
            writeln!(
                self.out,
                "{:<label_width$} | {} {}",
                truncate(&point.label, label_width),
                "█".repeat(len),
                format_value(point.value),
            )?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per chart, newline separated.
#[derive(Debug)]
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for JsonSink<W> {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        serde_json::to_writer(&mut self.out, chart)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<S: ChartSink + ?Sized> ChartSink for &mut S {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        (**self).render(chart)
    }
}
