// One-shot undo of the most recent ledger-mutating action.
//
// Boundaries
// - Holds value copies only; never aliases the live ledger.
// - Every arm bumps the generation. An expiry carrying an older generation is stale
//   and must be ignored, so a superseded countdown can never clear a newer snapshot.

use crate::modules::earnings::core::history::{ChangeHistoryEntry, ResetRecord};
use std::time::Duration;

pub const UNDO_WINDOW: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq)]
pub struct UndoSnapshot {
    /// Ledger as it was before the action.
    pub records: Vec<ResetRecord>,
    /// Change history as captured when the action completed.
    pub history: Vec<ChangeHistoryEntry>,
    /// Set when the action appended an entry to `history`; restoring drops it again.
    pub discards_newest: bool,
}

impl UndoSnapshot {
    pub fn restore(self) -> (Vec<ResetRecord>, Vec<ChangeHistoryEntry>) {
        let mut history = self.history;
        if self.discards_newest && !history.is_empty() {
            history.remove(0);
        }
        (self.records, history)
    }
}

#[derive(Debug, Default)]
pub struct UndoController {
    snapshot: Option<UndoSnapshot>,
    generation: u64,
}

impl UndoController {
    /// Replaces any pending snapshot and returns the generation the countdown must present.
    pub fn arm(&mut self, snapshot: UndoSnapshot) -> u64 {
        self.generation += 1;
        self.snapshot = Some(snapshot);
        self.generation
    }

    pub fn is_visible(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn take(&mut self) -> Option<UndoSnapshot> {
        self.snapshot.take()
    }

    /// Discards the snapshot if `generation` is still the latest arm.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.snapshot.is_none() {
            return false;
        }
        self.snapshot = None;
        true
    }
}
