// History ledger: completed earning periods plus the change history describing
// every mutation made to them.
//
// Responsibilities
// - Own the reset records (index order is display order and CSV order).
// - Own the change history, newest first. Each entry holds a value copy of the ledger.
// - Own the row selection used by bulk deletion.
// - Decide each mutation and hand back the pre-mutation snapshot for undo.
//
// Boundaries
// - No input or output. Timestamps are passed in.

use crate::modules::earnings::core::decision::{Decision, NoOpReason};
use crate::modules::earnings::core::undo::UndoSnapshot;
use crate::shared::core::primitives::format_currency;
use serde::{Deserialize, Serialize};

pub const DELETION_NOTE: &str = "Deletion";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetRecord {
    pub time: String,
    pub earning: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeHistoryEntry {
    pub timestamp: String,
    pub records: Vec<ResetRecord>,
    pub note: Option<String>,
}

pub fn reset_note(reset_number: usize, earning: f64) -> String {
    format!(
        "Reset #{reset_number} - Earned {} at reset",
        format_currency(earning)
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLedger {
    records: Vec<ResetRecord>,
    history: Vec<ChangeHistoryEntry>,
    selected_rows: Vec<usize>,
}

impl HistoryLedger {
    pub fn from_records(records: Vec<ResetRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[ResetRecord] {
        &self.records
    }

    pub fn history(&self) -> &[ChangeHistoryEntry] {
        &self.history
    }

    pub fn selected_rows(&self) -> &[usize] {
        &self.selected_rows
    }

    pub fn total_earned(&self) -> f64 {
        self.records.iter().map(|record| record.earning).sum()
    }

    fn log_change(&mut self, timestamp: &str, note: String) {
        self.history.insert(
            0,
            ChangeHistoryEntry {
                timestamp: timestamp.to_string(),
                records: self.records.clone(),
                note: Some(note),
            },
        );
    }

    /// Commits an accrual period. Nothing is recorded or logged for a zero amount.
    /// Infinite and NaN amounts are refused.
    pub fn record_reset(&mut self, earning: f64, timestamp: &str) -> Decision {
        if !earning.is_finite() {
            return Decision::Ignored {
                reason: NoOpReason::NonFiniteEarning,
            };
        }
        if earning <= 0.0 {
            return Decision::Ignored {
                reason: NoOpReason::NothingEarned,
            };
        }
        let previous = self.records.clone();
        self.records.push(ResetRecord {
            time: timestamp.to_string(),
            earning,
        });
        self.log_change(timestamp, reset_note(self.records.len(), earning));

        Decision::Accepted {
            undo: Some(UndoSnapshot {
                records: previous,
                history: self.history.clone(),
                discards_newest: true,
            }),
            persist_ledger: true,
        }
    }

    /// Removes every row whose pre-deletion index is listed.
    pub fn delete_rows(&mut self, indices: &[usize], timestamp: &str) -> Decision {
        if indices.is_empty() {
            return Decision::Ignored {
                reason: NoOpReason::EmptySelection,
            };
        }
        if !indices.iter().any(|index| *index < self.records.len()) {
            return Decision::Ignored {
                reason: NoOpReason::NoMatchingRows,
            };
        }

        let previous = self.records.clone();
        self.records = previous
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, record)| record.clone())
            .collect();
        self.selected_rows.clear();
        self.log_change(timestamp, DELETION_NOTE.to_string());

        Decision::Accepted {
            undo: Some(UndoSnapshot {
                records: previous,
                history: self.history.clone(),
                discards_newest: true,
            }),
            persist_ledger: true,
        }
    }

    /// Overwrites the ledger with the records captured by a change history entry.
    pub fn revert(&mut self, entry_index: usize) -> Decision {
        if self.records.is_empty() {
            return Decision::Ignored {
                reason: NoOpReason::EmptyLedger,
            };
        }
        let Some(entry) = self.history.get(entry_index) else {
            return Decision::Ignored {
                reason: NoOpReason::UnknownEntry(entry_index),
            };
        };
        let restored = entry.records.clone();
        let previous = std::mem::replace(&mut self.records, restored);
        self.selected_rows.clear();

        Decision::Accepted {
            undo: Some(UndoSnapshot {
                records: previous,
                history: self.history.clone(),
                discards_newest: false,
            }),
            persist_ledger: true,
        }
    }

    /// Replaces a note in place. An empty note clears it. Not undoable.
    pub fn edit_note(&mut self, entry_index: usize, note: &str) -> Decision {
        let Some(entry) = self.history.get_mut(entry_index) else {
            return Decision::Ignored {
                reason: NoOpReason::UnknownEntry(entry_index),
            };
        };
        entry.note = if note.is_empty() {
            None
        } else {
            Some(note.to_string())
        };
        Decision::Accepted {
            undo: None,
            persist_ledger: false,
        }
    }

    /// Clears the change history. With nothing to clear the pending undo stays untouched.
    pub fn delete_change_history(&mut self) -> Decision {
        if self.history.is_empty() {
            return Decision::Ignored {
                reason: NoOpReason::EmptyHistory,
            };
        }
        let previous = std::mem::take(&mut self.history);
        Decision::Accepted {
            undo: Some(UndoSnapshot {
                records: self.records.clone(),
                history: previous,
                discards_newest: false,
            }),
            persist_ledger: false,
        }
    }

    pub fn toggle_row_selection(&mut self, index: usize) -> Decision {
        if index >= self.records.len() {
            return Decision::Ignored {
                reason: NoOpReason::UnknownRow(index),
            };
        }
        if let Some(position) = self.selected_rows.iter().position(|row| *row == index) {
            self.selected_rows.remove(position);
        } else {
            self.selected_rows.push(index);
        }
        Decision::Accepted {
            undo: None,
            persist_ledger: false,
        }
    }

    pub fn restore(&mut self, snapshot: UndoSnapshot) {
        let (records, history) = snapshot.restore();
        self.records = records;
        self.history = history;
        let len = self.records.len();
        self.selected_rows.retain(|row| *row < len);
    }
}
