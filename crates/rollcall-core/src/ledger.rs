//! Attendance ledger — dedup rules and Entry/Exit event emission.
//!
//! Entry is idempotent: one record and one log event per roll number
//! for the lifetime of the ledger. Exit is not deduplicated and does
//! not require a prior Entry; every qualifying exit sighting is
//! logged. The asymmetry is contractual, not an oversight.

use crate::gallery::Identity;
use crate::motion::Direction;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;

/// Presence classification carried by records and the live status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Present,
    Exit,
    Unknown,
}

/// Action recorded in the durable attendance log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Entry,
    Exit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Entry => "Entry",
            Action::Exit => "Exit",
        }
    }
}

/// One durable check-in record. Created by the first qualifying Entry
/// for a roll number; never removed or mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub name: String,
    pub roll_number: String,
    pub status: AttendanceStatus,
}

/// Latest per-frame classification, independent of ledger state.
/// Overwritten every processed frame; not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentStatus {
    pub name: String,
    pub roll_number: String,
    pub status: AttendanceStatus,
}

impl CurrentStatus {
    pub fn unknown() -> Self {
        Self {
            name: "Not Identified".to_string(),
            roll_number: String::new(),
            status: AttendanceStatus::Unknown,
        }
    }
}

impl Default for CurrentStatus {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Event bound for the durable log sink.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub name: String,
    pub roll_number: String,
    pub action: Action,
    pub timestamp: DateTime<Local>,
}

/// What a single `apply` call did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEffect {
    /// First qualifying Entry for this roll number: record created.
    Entry,
    /// Qualifying Entry for an already-present roll number: no-op.
    DuplicateEntry,
    /// Qualifying Exit sighting (records untouched).
    Exit,
    /// Nothing qualified this frame.
    None,
}

/// Check-in records plus the live status snapshot.
#[derive(Debug, Default)]
pub struct AttendanceLedger {
    records: BTreeMap<String, AttendanceRecord>,
    current: CurrentStatus,
}

impl AttendanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame's classification.
    ///
    /// `identity` is `Some` only for a qualifying match (score at or
    /// above the similarity threshold); `None` covers both an
    /// unknown face and a frame with no detection, and resets the
    /// live status. An unclassified direction leaves everything
    /// untouched.
    pub fn apply(
        &mut self,
        direction: Option<Direction>,
        identity: Option<&Identity>,
    ) -> (LedgerEffect, Option<LogEvent>) {
        let Some(identity) = identity else {
            self.current = CurrentStatus::unknown();
            return (LedgerEffect::None, None);
        };

        match direction {
            Some(Direction::Entering) => {
                if self.records.contains_key(&identity.roll_number) {
                    return (LedgerEffect::DuplicateEntry, None);
                }
                self.records.insert(
                    identity.roll_number.clone(),
                    AttendanceRecord {
                        name: identity.name.clone(),
                        roll_number: identity.roll_number.clone(),
                        status: AttendanceStatus::Present,
                    },
                );
                self.current = CurrentStatus {
                    name: identity.name.clone(),
                    roll_number: identity.roll_number.clone(),
                    status: AttendanceStatus::Present,
                };
                (LedgerEffect::Entry, Some(self.event(identity, Action::Entry)))
            }
            Some(Direction::Exiting) => {
                self.current = CurrentStatus {
                    name: identity.name.clone(),
                    roll_number: identity.roll_number.clone(),
                    status: AttendanceStatus::Exit,
                };
                (LedgerEffect::Exit, Some(self.event(identity, Action::Exit)))
            }
            None => (LedgerEffect::None, None),
        }
    }

    fn event(&self, identity: &Identity, action: Action) -> LogEvent {
        LogEvent {
            name: identity.name.clone(),
            roll_number: identity.roll_number.clone(),
            action,
            timestamp: Local::now(),
        }
    }

    pub fn current_status(&self) -> &CurrentStatus {
        &self.current
    }

    /// Snapshot of all check-in records, ordered by roll number.
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.values().cloned().collect()
    }

    pub fn is_present(&self, roll_number: &str) -> bool {
        self.records.contains_key(roll_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity {
            name: "Alice".to_string(),
            roll_number: "001".to_string(),
        }
    }

    #[test]
    fn test_entry_creates_record_and_event() {
        let mut ledger = AttendanceLedger::new();
        let (effect, event) = ledger.apply(Some(Direction::Entering), Some(&alice()));
        assert_eq!(effect, LedgerEffect::Entry);
        let event = event.unwrap();
        assert_eq!(event.action, Action::Entry);
        assert_eq!(event.roll_number, "001");
        assert!(ledger.is_present("001"));
        assert_eq!(ledger.current_status().status, AttendanceStatus::Present);
        assert_eq!(ledger.current_status().name, "Alice");
    }

    #[test]
    fn test_entry_is_deduplicated() {
        let mut ledger = AttendanceLedger::new();
        ledger.apply(Some(Direction::Entering), Some(&alice()));
        let (effect, event) = ledger.apply(Some(Direction::Entering), Some(&alice()));
        assert_eq!(effect, LedgerEffect::DuplicateEntry);
        assert!(event.is_none());
        assert_eq!(ledger.records().len(), 1);
    }

    #[test]
    fn test_exit_without_prior_entry_still_logs() {
        let mut ledger = AttendanceLedger::new();
        let (effect, event) = ledger.apply(Some(Direction::Exiting), Some(&alice()));
        assert_eq!(effect, LedgerEffect::Exit);
        assert_eq!(event.unwrap().action, Action::Exit);
        assert!(!ledger.is_present("001"));
        assert_eq!(ledger.current_status().status, AttendanceStatus::Exit);
    }

    #[test]
    fn test_exit_is_not_deduplicated() {
        let mut ledger = AttendanceLedger::new();
        ledger.apply(Some(Direction::Entering), Some(&alice()));
        let (_, first) = ledger.apply(Some(Direction::Exiting), Some(&alice()));
        let (_, second) = ledger.apply(Some(Direction::Exiting), Some(&alice()));
        assert!(first.is_some());
        assert!(second.is_some());
        // record survives exits
        assert!(ledger.is_present("001"));
    }

    #[test]
    fn test_no_direction_is_a_noop() {
        let mut ledger = AttendanceLedger::new();
        ledger.apply(Some(Direction::Entering), Some(&alice()));
        let before = ledger.current_status().clone();
        let (effect, event) = ledger.apply(None, Some(&alice()));
        assert_eq!(effect, LedgerEffect::None);
        assert!(event.is_none());
        assert_eq!(ledger.current_status().status, before.status);
        assert_eq!(ledger.current_status().name, before.name);
    }

    #[test]
    fn test_unknown_resets_current_status() {
        let mut ledger = AttendanceLedger::new();
        ledger.apply(Some(Direction::Entering), Some(&alice()));
        let (effect, event) = ledger.apply(Some(Direction::Entering), None);
        assert_eq!(effect, LedgerEffect::None);
        assert!(event.is_none());
        assert_eq!(ledger.current_status().status, AttendanceStatus::Unknown);
        assert_eq!(ledger.current_status().name, "Not Identified");
        // ledger itself untouched
        assert!(ledger.is_present("001"));
    }

    #[test]
    fn test_duplicate_entry_leaves_current_status_alone() {
        let mut ledger = AttendanceLedger::new();
        ledger.apply(Some(Direction::Entering), Some(&alice()));
        ledger.apply(Some(Direction::Exiting), Some(&alice()));
        // re-entry of a present roll number must not flip status back
        let (effect, _) = ledger.apply(Some(Direction::Entering), Some(&alice()));
        assert_eq!(effect, LedgerEffect::DuplicateEntry);
        assert_eq!(ledger.current_status().status, AttendanceStatus::Exit);
    }
}
