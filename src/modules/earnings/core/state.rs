// TrackerState is the single application state record. Every action goes through
// one of its methods; nothing is derived implicitly.
//
// Boundaries
// - No input or output, no timers. The handler owns scheduling and persistence and
//   reacts to the returned Outcome.

use crate::modules::earnings::core::accrual::AccrualState;
use crate::modules::earnings::core::decision::{Decision, NoOpReason, Outcome};
use crate::modules::earnings::core::history::{ChangeHistoryEntry, HistoryLedger, ResetRecord};
use crate::modules::earnings::core::undo::UndoController;
use crate::modules::earnings::core::wage_config::WageConfig;
use crate::shared::core::primitives::format_currency;
use serde::Serialize;

#[derive(Debug, Default)]
pub struct TrackerState {
    wage: WageConfig,
    accrual: AccrualState,
    ledger: HistoryLedger,
    undo: UndoController,
    is_dark: bool,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerView {
    pub wage_config: WageConfig,
    pub can_start: bool,
    pub is_running: bool,
    pub earned_amount: f64,
    pub earned_display: String,
    pub records: Vec<ResetRecord>,
    pub change_history: Vec<ChangeHistoryEntry>,
    pub selected_rows: Vec<usize>,
    pub undo_visible: bool,
    pub total_earned: f64,
    pub total_earned_display: String,
    pub is_dark: bool,
}

impl TrackerState {
    pub fn new(records: Vec<ResetRecord>, is_dark: bool) -> Self {
        Self {
            ledger: HistoryLedger::from_records(records),
            is_dark,
            ..Self::default()
        }
    }

    pub fn accrual(&self) -> &AccrualState {
        &self.accrual
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn undo_visible(&self) -> bool {
        self.undo.is_visible()
    }

    fn commit(&mut self, decision: Decision) -> Outcome {
        match decision {
            Decision::Accepted {
                undo,
                persist_ledger,
            } => Outcome::Applied {
                persist_ledger,
                undo_generation: undo.map(|snapshot| self.undo.arm(snapshot)),
            },
            Decision::Ignored { reason } => Outcome::Ignored { reason },
        }
    }

    /// A different kind stops the timer and zeroes the live amount.
    pub fn set_wage_config(&mut self, config: WageConfig) -> Outcome {
        if config.kind() != self.wage.kind() {
            self.accrual.stop_and_zero();
        }
        self.wage = config;
        Outcome::applied()
    }

    pub fn toggle_running(&mut self) -> Outcome {
        if self.accrual.toggle(&self.wage) {
            Outcome::applied()
        } else {
            Outcome::Ignored {
                reason: NoOpReason::IncompleteWageConfig,
            }
        }
    }

    pub fn tick(&mut self) -> f64 {
        self.accrual.tick(&self.wage)
    }

    /// Always stops and zeroes the accrual, even when nothing gets recorded.
    pub fn reset(&mut self, timestamp: &str) -> Outcome {
        let earned = self.accrual.stop_and_zero();
        let decision = self.ledger.record_reset(earned, timestamp);
        self.commit(decision)
    }

    pub fn delete_selected(&mut self, indices: Option<Vec<usize>>, timestamp: &str) -> Outcome {
        let indices = indices.unwrap_or_else(|| self.ledger.selected_rows().to_vec());
        let decision = self.ledger.delete_rows(&indices, timestamp);
        self.commit(decision)
    }

    pub fn toggle_row_selection(&mut self, index: usize) -> Outcome {
        let decision = self.ledger.toggle_row_selection(index);
        self.commit(decision)
    }

    pub fn revert(&mut self, entry_index: usize) -> Outcome {
        let decision = self.ledger.revert(entry_index);
        self.commit(decision)
    }

    pub fn edit_note(&mut self, entry_index: usize, note: &str) -> Outcome {
        let decision = self.ledger.edit_note(entry_index, note);
        self.commit(decision)
    }

    pub fn delete_change_history(&mut self) -> Outcome {
        let decision = self.ledger.delete_change_history();
        self.commit(decision)
    }

    pub fn undo(&mut self) -> Outcome {
        match self.undo.take() {
            Some(snapshot) => {
                self.ledger.restore(snapshot);
                Outcome::Applied {
                    persist_ledger: true,
                    undo_generation: None,
                }
            }
            None => Outcome::Ignored {
                reason: NoOpReason::NothingToUndo,
            },
        }
    }

    pub fn expire_undo(&mut self, generation: u64) -> bool {
        self.undo.expire(generation)
    }

    pub fn view(&self) -> TrackerView {
        let total_earned = self.ledger.total_earned();
        TrackerView {
            wage_config: self.wage,
            can_start: self.wage.can_run(),
            is_running: self.accrual.is_running(),
            earned_amount: self.accrual.earned_amount(),
            earned_display: format_currency(self.accrual.earned_amount()),
            records: self.ledger.records().to_vec(),
            change_history: self.ledger.history().to_vec(),
            selected_rows: self.ledger.selected_rows().to_vec(),
            undo_visible: self.undo.is_visible(),
            total_earned,
            total_earned_display: format_currency(total_earned),
            is_dark: self.is_dark,
        }
    }
}
