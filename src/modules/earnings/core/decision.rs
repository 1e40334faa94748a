use crate::modules::earnings::core::undo::UndoSnapshot;

/// Why an action left the state untouched. None of these are faults.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    #[error("wage configuration is incomplete")]
    IncompleteWageConfig,

    #[error("nothing earned since the last reset")]
    NothingEarned,

    #[error("the earning is not a finite amount")]
    NonFiniteEarning,

    #[error("the ledger is empty")]
    EmptyLedger,

    #[error("the change history is already empty")]
    EmptyHistory,

    #[error("no rows selected")]
    EmptySelection,

    #[error("none of the selected rows exist")]
    NoMatchingRows,

    #[error("row {0} does not exist")]
    UnknownRow(usize),

    #[error("change history entry {0} does not exist")]
    UnknownEntry(usize),

    #[error("nothing to undo")]
    NothingToUndo,
}

/// What a ledger operation decided, before the undo controller is involved.
#[derive(Debug, PartialEq)]
pub enum Decision {
    Accepted {
        undo: Option<UndoSnapshot>,
        persist_ledger: bool,
    },
    Ignored {
        reason: NoOpReason,
    },
}

/// What a command did to the tracker as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied {
        persist_ledger: bool,
        undo_generation: Option<u64>,
    },
    Ignored {
        reason: NoOpReason,
    },
}

impl Outcome {
    pub fn applied() -> Self {
        Outcome::Applied {
            persist_ledger: false,
            undo_generation: None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}
