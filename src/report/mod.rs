//! Report rendering for the stock insight run

use std::io::{self, Write};

use crate::models::InsightReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Writes insight reports to any `Write` sink (stdout in the binary)
pub struct Reporter<W: Write> {
    out: W,
    format: ReportFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    pub fn write(&mut self, report: &InsightReport) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => self.write_text(report),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, report)?;
                writeln!(self.out)
            }
        }?;
        self.out.flush()
    }

    fn write_text(&mut self, report: &InsightReport) -> io::Result<()> {
        let forecast = &report.forecast;
        writeln!(self.out, "Stock Price Prediction: {}", report.ticker)?;
        writeln!(self.out, "  Last close:         {:.2}", forecast.last_close)?;
        writeln!(self.out, "  Predicted close:    {:.2}", forecast.price)?;
        writeln!(self.out, "  Predicted (scaled): {:.6}", forecast.scaled)?;
        writeln!(
            self.out,
            "  Training:           {} epochs on {} observations, final loss {:.6}",
            forecast.epochs, forecast.observations, forecast.final_loss
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "News Sentiment Analysis:")?;
        for score in &report.sentiment {
            writeln!(self.out, "  {:?}", score.headline)?;
            writeln!(
                self.out,
                "    negative: {:.4}  positive: {:.4}  ({})",
                score.negative,
                score.positive,
                score.dominant_label()
            )?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
