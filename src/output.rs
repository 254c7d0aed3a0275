//! Report rendering: terminal tables, JSON, and markdown.

use crate::core::{AnomalyReport, CheckLabel, ResultTable};
use colored::*;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnomalyReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnomalyReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnomalyReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!("{} anomaly report", report.protocol).bold()
        )?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;

        for (label, table) in report.iter() {
            if table.is_empty() {
                writeln!(
                    self.writer,
                    "{}",
                    format!("No {} found.", title(*label).to_lowercase()).green()
                )?;
                continue;
            }
            writeln!(self.writer, "{}", title(*label).bold())?;
            let mut rendered = build_table(table);
            rendered.with(Style::rounded());
            writeln!(self.writer, "{rendered}")?;
        }
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnomalyReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# {} Anomaly Report", report.protocol)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;

        for (label, table) in report.iter() {
            writeln!(self.writer, "## {}", title(*label))?;
            writeln!(self.writer)?;
            if table.is_empty() {
                writeln!(self.writer, "_No {} found._", title(*label).to_lowercase())?;
            } else {
                let mut rendered = build_table(table);
                rendered.with(Style::markdown());
                writeln!(self.writer, "{rendered}")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

fn build_table(table: &ResultTable) -> tabled::Table {
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }
    builder.build()
}

/// Human heading for a label: `bgp_route_reflection` → "Bgp Route Reflection".
fn title(label: CheckLabel) -> String {
    label
        .as_str()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnomalyReport, Protocol};

    fn sample_report() -> AnomalyReport {
        let mut report = AnomalyReport::new(Protocol::Bgp);
        let mut sessions = ResultTable::new(vec!["Node".to_string(), "State".to_string()]);
        sessions.push_row(vec!["r1".to_string(), "ESTABLISHED".to_string()]);
        report.insert(CheckLabel::BgpSessions, sessions);
        report.insert(CheckLabel::UndefinedReferences, ResultTable::default());
        report
    }

    #[test]
    fn title_splits_on_underscores() {
        assert_eq!(title(CheckLabel::BgpRouteReflection), "Bgp Route Reflection");
        assert_eq!(title(CheckLabel::BgpSessions), "Bgp Sessions");
    }

    #[test]
    fn json_writer_emits_valid_json() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["protocol"], "Bgp");
    }

    #[test]
    fn markdown_writer_renders_headings_and_empty_notices() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.contains("# BGP Anomaly Report"));
        assert!(out.contains("## Bgp Sessions"));
        assert!(out.contains("_No undefined references found._"));
        assert!(out.contains("ESTABLISHED"));
    }

    #[test]
    fn terminal_writer_renders_rows_and_empty_notices() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.contains("ESTABLISHED"));
        assert!(out.contains("No undefined references found."));
    }
}
