//! Chart output surface. The reports only need a sink that accepts ordered
//! `label -> count` bars; `TerminalChart` draws them as unicode bars.

use anyhow::Result;
use std::io::Write;

pub trait ChartSink {
    fn bar_chart(&mut self, title: &str, y_label: &str, bars: &[(String, u64)]) -> Result<()>;
}

/// Horizontal bar chart on any writer (stdout in the binary).
pub struct TerminalChart<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 40 }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for TerminalChart<W> {
    fn bar_chart(&mut self, title: &str, y_label: &str, bars: &[(String, u64)]) -> Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;
        if bars.is_empty() {
            writeln!(self.out, "(no data)")?;
            writeln!(self.out)?;
            return Ok(());
        }

        let label_w = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let max = bars.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
        for (label, count) in bars {
            // at least one cell for any non-zero count
            let cells = ((*count as f64 / max as f64) * self.width as f64).round() as usize;
            let cells = if *count > 0 { cells.max(1) } else { 0 };
            writeln!(self.out, "{label:<label_w$} | {} {count}", "█".repeat(cells))?;
        }
        writeln!(self.out, "{:>label_w$}   ({y_label})", "")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Sink that drops everything. Used when charts are disabled.
#[derive(Default)]
pub struct NoChart;

impl ChartSink for NoChart {
    fn bar_chart(&mut self, _title: &str, _y_label: &str, _bars: &[(String, u64)]) -> Result<()> {
        Ok(())
    }
}
