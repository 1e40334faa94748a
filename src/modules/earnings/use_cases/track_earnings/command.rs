use crate::modules::earnings::core::decision::Outcome;
use crate::modules::earnings::core::state::TrackerState;
use crate::modules::earnings::core::wage_config::WageConfig;

/// Every user action the tracker understands.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCommand {
    SetWageConfig(WageConfig),
    ToggleRunning,
    Reset,
    /// `None` deletes the current row selection.
    DeleteSelected { indices: Option<Vec<usize>> },
    ToggleRowSelection { index: usize },
    Revert { entry_index: usize },
    EditNote { entry_index: usize, note: String },
    DeleteChangeHistory,
    Undo,
}

impl TrackerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            TrackerCommand::SetWageConfig(_) => "set_wage_config",
            TrackerCommand::ToggleRunning => "toggle_running",
            TrackerCommand::Reset => "reset",
            TrackerCommand::DeleteSelected { .. } => "delete_selected",
            TrackerCommand::ToggleRowSelection { .. } => "toggle_row_selection",
            TrackerCommand::Revert { .. } => "revert",
            TrackerCommand::EditNote { .. } => "edit_note",
            TrackerCommand::DeleteChangeHistory => "delete_change_history",
            TrackerCommand::Undo => "undo",
        }
    }
}

/// Applies one command to the state. `timestamp` stamps any record or change history
/// entry the command creates.
pub fn apply(state: &mut TrackerState, command: TrackerCommand, timestamp: &str) -> Outcome {
    match command {
        TrackerCommand::SetWageConfig(config) => state.set_wage_config(config),
        TrackerCommand::ToggleRunning => state.toggle_running(),
        TrackerCommand::Reset => state.reset(timestamp),
        TrackerCommand::DeleteSelected { indices } => state.delete_selected(indices, timestamp),
        TrackerCommand::ToggleRowSelection { index } => state.toggle_row_selection(index),
        TrackerCommand::Revert { entry_index } => state.revert(entry_index),
        TrackerCommand::EditNote { entry_index, note } => state.edit_note(entry_index, &note),
        TrackerCommand::DeleteChangeHistory => state.delete_change_history(),
        TrackerCommand::Undo => state.undo(),
    }
}

#[cfg(test)]
mod tracker_command_tests {
    use super::*;
    use crate::modules::earnings::core::decision::NoOpReason;
    use crate::tests::fixtures::records::make_records;
    use crate::tests::fixtures::tracker::{FIXED_TIMESTAMP, hourly_config};
    use rstest::rstest;

    #[rstest]
    fn it_should_route_each_command_to_the_state() {
        let mut state = TrackerState::new(make_records(&[5.0, 6.0]), false);

        assert!(apply(&mut state, TrackerCommand::SetWageConfig(hourly_config()), FIXED_TIMESTAMP).is_applied());
        assert!(apply(&mut state, TrackerCommand::ToggleRunning, FIXED_TIMESTAMP).is_applied());
        assert!(state.accrual().is_running());

        apply(&mut state, TrackerCommand::ToggleRowSelection { index: 0 }, FIXED_TIMESTAMP);
        assert_eq!(state.ledger().selected_rows(), &[0]);

        apply(&mut state, TrackerCommand::DeleteSelected { indices: None }, FIXED_TIMESTAMP);
        assert_eq!(state.ledger().records().len(), 1);
        assert_eq!(state.ledger().history()[0].timestamp, FIXED_TIMESTAMP);

        apply(
            &mut state,
            TrackerCommand::EditNote {
                entry_index: 0,
                note: "trimmed".into(),
            },
            FIXED_TIMESTAMP,
        );
        assert_eq!(state.ledger().history()[0].note.as_deref(), Some("trimmed"));

        apply(&mut state, TrackerCommand::Undo, FIXED_TIMESTAMP);
        assert_eq!(state.ledger().records().len(), 2);
    }

    #[rstest]
    #[case(TrackerCommand::Revert { entry_index: 0 }, NoOpReason::UnknownEntry(0))]
    #[case(TrackerCommand::ToggleRowSelection { index: 7 }, NoOpReason::UnknownRow(7))]
    #[case(TrackerCommand::Undo, NoOpReason::NothingToUndo)]
    #[case(TrackerCommand::Reset, NoOpReason::NothingEarned)]
    #[case(TrackerCommand::DeleteSelected { indices: None }, NoOpReason::EmptySelection)]
    #[case(TrackerCommand::DeleteChangeHistory, NoOpReason::EmptyHistory)]
    fn it_should_report_ignored_commands(#[case] command: TrackerCommand, #[case] reason: NoOpReason) {
        let mut state = TrackerState::new(make_records(&[1.0]), false);
        assert_eq!(
            apply(&mut state, command, FIXED_TIMESTAMP),
            Outcome::Ignored { reason }
        );
    }

    #[rstest]
    #[case(TrackerCommand::Revert { entry_index: 0 }, NoOpReason::EmptyLedger)]
    #[case(TrackerCommand::DeleteSelected { indices: Some(vec![0]) }, NoOpReason::NoMatchingRows)]
    fn it_should_report_ignored_commands_on_an_emptied_ledger(
        #[case] command: TrackerCommand,
        #[case] reason: NoOpReason,
    ) {
        let mut state = TrackerState::new(make_records(&[1.0]), false);
        assert!(apply(&mut state, TrackerCommand::DeleteSelected { indices: Some(vec![0]) }, FIXED_TIMESTAMP).is_applied());
        let ledger_before = state.ledger().clone();

        assert_eq!(
            apply(&mut state, command, FIXED_TIMESTAMP),
            Outcome::Ignored { reason }
        );
        assert_eq!(state.ledger(), &ledger_before);
        assert!(state.undo_visible());
    }

    #[rstest]
    fn it_should_name_commands_for_logging() {
        assert_eq!(TrackerCommand::DeleteChangeHistory.name(), "delete_change_history");
        assert_eq!(
            TrackerCommand::SetWageConfig(hourly_config()).name(),
            "set_wage_config"
        );
    }
}
