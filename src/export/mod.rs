// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! History export to CSV and JSON lines

use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::history::HistoryRecord;
use crate::zones::Zone;

/// Output format for history exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("jsonl") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

const CSV_HEADER: &str = "timestamp,evaporator_temp,condenser_temp,ambient_temp,\
evaporator_status,condenser_status,ambient_status,overall_status,failure_mode";

/// Writes history records to a sink in the chosen format.
pub struct HistoryExporter {
    format: ExportFormat,
}

impl HistoryExporter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(
        &self,
        records: &[HistoryRecord],
        writer: &mut W,
    ) -> anyhow::Result<()> {
        match self.format {
            ExportFormat::Csv => self.write_csv(records, writer),
            ExportFormat::Json => self.write_json(records, writer),
        }
    }

    /// Export straight to a file path
    pub fn write_to_file(&self, records: &[HistoryRecord], path: &Path) -> anyhow::Result<()> {
        let mut file = std::fs::File::create(path)?;
        self.write(records, &mut file)?;
        info!("Exported {} records to {}", records.len(), path.display());
        Ok(())
    }

    fn write_csv<W: Write>(&self, records: &[HistoryRecord], writer: &mut W) -> anyhow::Result<()> {
        writeln!(writer, "{}", CSV_HEADER)?;
        for record in records {
            writeln!(
                writer,
                "{},{:.2},{:.2},{:.2},{},{},{},{},{}",
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                record.temps[Zone::Evaporator],
                record.temps[Zone::Condenser],
                record.temps[Zone::Ambient],
                record.statuses[Zone::Evaporator].as_str(),
                record.statuses[Zone::Condenser].as_str(),
                record.statuses[Zone::Ambient].as_str(),
                record.overall.as_str(),
                record.failure_mode,
            )?;
        }
        Ok(())
    }

    /// One JSON object per line, so downstream tools can stream it
    fn write_json<W: Write>(
        &self,
        records: &[HistoryRecord],
        writer: &mut W,
    ) -> anyhow::Result<()> {
        for record in records {
            serde_json::to_writer(&mut *writer, record)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{Status, ZoneMap};
    use chrono::{TimeZone, Utc};

    fn records() -> Vec<HistoryRecord> {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        vec![
            HistoryRecord::new(
                t0,
                ZoneMap::new(-18.25, 30.5, 24.0),
                ZoneMap::new(Status::Ok, Status::Ok, Status::Ok),
                false,
            ),
            HistoryRecord::new(
                t0 + chrono::Duration::seconds(5),
                ZoneMap::new(-8.0, 42.1, 24.1),
                ZoneMap::new(Status::Critical, Status::Warning, Status::Ok),
                true,
            ),
        ]
    }

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let mut out = Vec::new();
        HistoryExporter::new(ExportFormat::Csv)
            .write(&records(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "2023-11-14 22:13:20,-18.25,30.50,24.00,OK,OK,OK,OK,false"
        );
        assert_eq!(
            lines[2],
            "2023-11-14 22:13:25,-8.00,42.10,24.10,CRITICAL,WARNING,OK,CRITICAL,true"
        );
    }

    #[test]
    fn empty_export_is_header_only() {
        let mut out = Vec::new();
        HistoryExporter::new(ExportFormat::Csv)
            .write(&[], &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn json_lines_parse_back() {
        let mut out = Vec::new();
        HistoryExporter::new(ExportFormat::Json)
            .write(&records(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let parsed: Vec<HistoryRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].overall, Status::Critical);
        assert!(parsed[1].failure_mode);
    }

    #[test]
    fn format_inferred_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.json")),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.csv")),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out")),
            ExportFormat::Csv
        );
    }
}
