// End to end undo checks across the whole tracker state.
//
// Every ledger mutating action followed immediately by undo must leave the records
// and the change history exactly as they were before the action.

use crate::modules::earnings::core::state::TrackerState;
use crate::modules::earnings::use_cases::track_earnings::command::{TrackerCommand, apply};
use crate::tests::fixtures::records::make_records;
use crate::tests::fixtures::tracker::{FIXED_TIMESTAMP, hourly_config};
use rstest::{fixture, rstest};

#[fixture]
fn before_each() -> TrackerState {
    let mut state = TrackerState::new(make_records(&[4.0, 8.0, 15.0]), false);
    apply(&mut state, TrackerCommand::SetWageConfig(hourly_config()), FIXED_TIMESTAMP);
    apply(
        &mut state,
        TrackerCommand::DeleteSelected {
            indices: Some(vec![1]),
        },
        FIXED_TIMESTAMP,
    );
    apply(
        &mut state,
        TrackerCommand::EditNote {
            entry_index: 0,
            note: "older change".into(),
        },
        FIXED_TIMESTAMP,
    );
    apply(&mut state, TrackerCommand::ToggleRunning, FIXED_TIMESTAMP);
    for _ in 0..25 {
        state.tick();
    }
    state
}

#[rstest]
#[case::reset(TrackerCommand::Reset)]
#[case::delete_selected(TrackerCommand::DeleteSelected { indices: Some(vec![0, 1]) })]
#[case::revert(TrackerCommand::Revert { entry_index: 0 })]
#[case::delete_change_history(TrackerCommand::DeleteChangeHistory)]
fn it_should_restore_records_and_history_exactly(
    before_each: TrackerState,
    #[case] command: TrackerCommand,
) {
    let mut state = before_each;
    let records_before = state.ledger().records().to_vec();
    let history_before = state.ledger().history().to_vec();

    assert!(apply(&mut state, command, FIXED_TIMESTAMP).is_applied());
    assert!(state.undo_visible());
    assert!(apply(&mut state, TrackerCommand::Undo, FIXED_TIMESTAMP).is_applied());

    assert_eq!(state.ledger().records(), records_before.as_slice());
    assert_eq!(state.ledger().history(), history_before.as_slice());
    assert!(!state.undo_visible());
}

#[rstest]
fn it_should_only_undo_the_latest_action(before_each: TrackerState) {
    let mut state = before_each;
    apply(&mut state, TrackerCommand::Reset, FIXED_TIMESTAMP);
    let after_reset = state.ledger().clone();

    apply(&mut state, TrackerCommand::DeleteChangeHistory, FIXED_TIMESTAMP);
    apply(&mut state, TrackerCommand::Undo, FIXED_TIMESTAMP);

    assert_eq!(state.ledger().records(), after_reset.records());
    assert_eq!(state.ledger().history(), after_reset.history());
    assert!(!apply(&mut state, TrackerCommand::Undo, FIXED_TIMESTAMP).is_applied());
}

#[rstest]
fn it_should_keep_the_total_in_step_with_the_ledger(before_each: TrackerState) {
    let mut state = before_each;
    apply(&mut state, TrackerCommand::Reset, FIXED_TIMESTAMP);
    let view = state.view();
    let sum: f64 = view.records.iter().map(|record| record.earning).sum();
    assert_eq!(view.total_earned, sum);
    assert!((view.total_earned - (4.0 + 15.0 + 0.025)).abs() < 1e-9);
}
