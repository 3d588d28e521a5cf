//! Durable attendance log — append-only CSV sink.
//!
//! One row per event: `Name,Roll Number,Action,Timestamp`. The file is
//! created with its header if absent at startup and never truncated.

use rollcall_core::ledger::LogEvent;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("log io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log write failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Destination for ledger events. Write failures are recoverable:
/// the frame loop warns and continues.
pub trait AttendanceSink {
    fn append(&mut self, event: &LogEvent) -> Result<(), SinkError>;
}

/// CSV-file attendance sink.
pub struct CsvAttendanceLog {
    path: PathBuf,
}

impl CsvAttendanceLog {
    /// Open the log, writing the header row if the file does not
    /// exist yet. Idempotent across restarts.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if !path.exists() {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(["Name", "Roll Number", "Action", "Timestamp"])?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "attendance log created");
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl AttendanceSink for CsvAttendanceLog {
    fn append(&mut self, event: &LogEvent) -> Result<(), SinkError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let timestamp = event.timestamp.format(TIMESTAMP_FORMAT).to_string();
        writer.write_record([
            event.name.as_str(),
            event.roll_number.as_str(),
            event.action.as_str(),
            timestamp.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use rollcall_core::ledger::Action;

    fn event(name: &str, roll: &str, action: Action) -> LogEvent {
        LogEvent {
            name: name.to_string(),
            roll_number: roll.to_string(),
            action,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_create_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance_log.csv");

        CsvAttendanceLog::create(&path).unwrap();
        CsvAttendanceLog::create(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(contents.lines().next().unwrap(), "Name,Roll Number,Action,Timestamp");
    }

    #[test]
    fn test_append_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance_log.csv");

        let mut log = CsvAttendanceLog::create(&path).unwrap();
        log.append(&event("Alice", "001", Action::Entry)).unwrap();
        log.append(&event("Alice", "001", Action::Exit)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Alice,001,Entry,"));
        assert!(lines[2].starts_with("Alice,001,Exit,"));

        // timestamp column matches YYYY-MM-DD HH:MM:SS
        let ts = lines[1].splitn(4, ',').nth(3).unwrap();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }

    #[test]
    fn test_existing_log_is_never_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance_log.csv");

        let mut log = CsvAttendanceLog::create(&path).unwrap();
        log.append(&event("Bob", "002", Action::Entry)).unwrap();
        drop(log);

        // restart
        let mut log = CsvAttendanceLog::create(&path).unwrap();
        log.append(&event("Carol", "003", Action::Entry)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("Bob,002,Entry,"));
        assert!(contents.contains("Carol,003,Entry,"));
    }
}
