//! Text renderers for batches of report models.
//!
//! Styling lives in [`RenderConfig`] and is passed in explicitly; nothing
//! here reaches for global state.

mod pretty;
mod table;

use crate::OutputFormat;
use crate::commands::report::BatchOutcome;
use anyhow::Result;
use console::Color;
use perfbase_core::Rating;
use perfbase_core::extract::Measure;
use std::io::{self, Write};

/// Colours used by the pretty renderer
#[derive(Debug, Clone)]
pub struct Palette {
    pub section: Color,
    pub header: Color,
    pub good: Color,
    pub needs_work: Color,
    pub poor: Color,
    pub muted: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            section: Color::Cyan,
            header: Color::Blue,
            good: Color::Green,
            needs_work: Color::Yellow,
            poor: Color::Red,
            muted: Color::Color256(245),
        }
    }
}

impl Palette {
    pub fn for_rating(&self, rating: Rating) -> Option<Color> {
        match rating {
            Rating::Good => Some(self.good),
            Rating::NeedsWork => Some(self.needs_work),
            Rating::Poor => Some(self.poor),
            Rating::NotAvailable => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: OutputFormat,
    /// Decimal places for displayed numbers
    pub precision: usize,
    pub color: bool,
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            precision: 2,
            color: true,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    pub fn number(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    /// Known values at display precision, otherwise the "N/A" marker
    pub fn measure(&self, value: Measure) -> String {
        match value {
            Measure::Known(v) => self.number(v),
            Measure::NotAvailable => value.to_string(),
        }
    }

    /// Apply a colour (and optionally bold) when colour output is on
    pub fn paint(&self, text: impl std::fmt::Display, color: Option<Color>, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let mut style = console::Style::new();
        if let Some(color) = color {
            style = style.fg(color);
        }
        if bold {
            style = style.bold();
        }
        style.apply_to(text).to_string()
    }
}

/// Render a batch to stdout
pub fn render(outcome: &BatchOutcome, config: &RenderConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, outcome, config)?;
    out.flush()?;
    Ok(())
}

pub fn render_to<W: Write>(out: &mut W, outcome: &BatchOutcome, config: &RenderConfig) -> Result<()> {
    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
        }
        OutputFormat::Table => table::write_batch(out, outcome, config)?,
        OutputFormat::Pretty => pretty::write_batch(out, outcome, config)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::report::FileFailure;
    use perfbase_core::{CaptureReader, ReportAssembler};
    use std::path::PathBuf;

    fn outcome() -> BatchOutcome {
        let har = CaptureReader::from_str(
            r#"{"log": {
                "pages": [{"title": "Home", "pageTimings": {"onContentLoad": 420.5, "onLoad": -1}}],
                "entries": [
                    {"time": 120.5, "request": {"method": "GET", "url": "https://a.test/api/v1/orders?page=1,2"},
                     "response": {"status": 200, "content": {"size": 2048}}, "timings": {"wait": 90, "dns": -1}},
                    {"time": 30, "request": {"method": "GET", "url": "https://a.test/app.css"},
                     "response": {"status": 304, "content": {"size": 0}}}
                ]
            }}"#,
        )
        .unwrap();
        let audit = CaptureReader::from_str(
            r#"{"audits": {"first-contentful-paint": {"score": 0.95, "numericValue": 900, "displayValue": "0.9 s"}},
                "categories": {"performance": {"title": "Performance", "score": 0.62}},
                "finalDisplayedUrl": "https://a.test/"}"#,
        )
        .unwrap();
        let empty = CaptureReader::from_str(r#"{"log": {"entries": []}}"#).unwrap();

        let assembler = ReportAssembler::default();
        BatchOutcome {
            reports: vec![
                assembler.assemble("shop", &har),
                assembler.assemble("lighthouse-home", &audit),
                assembler.assemble("blank", &empty),
            ],
            failures: vec![FileFailure {
                file: PathBuf::from("broken.har"),
                error: "Invalid capture structure".to_string(),
            }],
        }
    }

    fn render_string(format: OutputFormat) -> String {
        let config = RenderConfig {
            format,
            color: false,
            ..RenderConfig::default()
        };
        let mut buf = Vec::new();
        render_to(&mut buf, &outcome(), &config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_pretty_output_sections() {
        let text = render_string(OutputFormat::Pretty);

        assert!(text.contains("shop"));
        assert!(text.contains("OBSERVED BASELINE"));
        assert!(text.contains("PAGE LOAD TIMINGS"));
        assert!(text.contains("CATEGORY SCORES"));
        assert!(text.contains("62"));
        assert!(text.contains("Needs Work"));
        assert!(text.contains("No valid requests"));
        assert!(text.contains("broken.har"));
    }

    #[test]
    fn test_table_output_is_comma_separated() {
        let text = render_string(OutputFormat::Table);

        assert!(text.contains("#,Method,Endpoint URL,Category,Status"));
        assert!(text.contains("\"https://a.test/api/v1/orders?page=1,2\""));
        assert!(text.contains("Average,75.25,1.00,45.00"));
        assert!(text.contains("Home,420.50,N/A"));
    }

    #[test]
    fn test_json_output_round_trips_markers() {
        let text = render_string(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["reports"][0]["kind"], "network");
        assert_eq!(value["reports"][0]["rows"][0]["dns_ms"], "N/A");
        assert_eq!(value["reports"][2]["baseline"]["state"], "empty");
        assert_eq!(value["failures"][0]["file"], "broken.har");
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        let config = RenderConfig {
            color: false,
            ..RenderConfig::default()
        };
        assert_eq!(config.paint("Good", Some(Color::Green), true), "Good");
        assert_eq!(config.number(1.0), "1.00");
    }
}
