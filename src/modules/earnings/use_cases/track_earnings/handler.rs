// Application service for the earnings tracker.
//
// Responsibilities
// - Load the persisted ledger once at startup.
// - Apply commands to the single TrackerState under one lock.
// - Persist the ledger after every mutation that asks for it. Write failures are logged, never surfaced.
// - Keep the tick timer in step with the running flag and the undo countdown in step with the undo snapshot.

use crate::modules::earnings::adapters::outbound::reset_records::{
    load_reset_records, save_reset_records,
};
use crate::modules::earnings::core::decision::Outcome;
use crate::modules::earnings::core::state::{TrackerState, TrackerView};
use crate::modules::earnings::core::undo::UNDO_WINDOW;
use crate::modules::earnings::use_cases::export_history::csv_export::{
    CsvExport, ExportError, export,
};
use crate::modules::earnings::use_cases::track_earnings::command::{TrackerCommand, apply};
use crate::modules::earnings::use_cases::track_earnings::timers::{TickTimer, UndoCountdown};
use crate::shared::core::primitives::WallClock;
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Mutex as AsyncMutex;

#[derive(Debug, Clone, PartialEq)]
pub struct Handled {
    pub outcome: Outcome,
    pub view: TrackerView,
}

pub struct EarningsTracker {
    state: Arc<AsyncMutex<TrackerState>>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn WallClock>,
    tick_timer: Mutex<TickTimer>,
    undo_countdown: Mutex<UndoCountdown>,
}

fn lock_timer<T>(timer: &Mutex<T>) -> MutexGuard<'_, T> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}

impl EarningsTracker {
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn WallClock>,
        is_dark: bool,
    ) -> Self {
        let records = load_reset_records(&*store).await;
        tracing::info!(records = records.len(), "loaded reset records");
        Self {
            state: Arc::new(AsyncMutex::new(TrackerState::new(records, is_dark))),
            store,
            clock,
            tick_timer: Mutex::new(TickTimer::new()),
            undo_countdown: Mutex::new(UndoCountdown::new()),
        }
    }

    pub async fn handle(&self, command: TrackerCommand) -> Handled {
        let name = command.name();
        let timestamp = self.clock.timestamp();
        let mut state = self.state.lock().await;
        let outcome = apply(&mut state, command, &timestamp);

        match outcome {
            Outcome::Applied {
                persist_ledger,
                undo_generation,
            } => {
                if persist_ledger {
                    if let Err(error) = save_reset_records(&*self.store, state.ledger().records()).await {
                        tracing::warn!(command = name, %error, "could not persist reset records");
                    }
                    tracing::info!(
                        command = name,
                        records = state.ledger().records().len(),
                        "ledger changed"
                    );
                } else {
                    tracing::debug!(command = name, "applied");
                }
                if let Some(generation) = undo_generation {
                    self.arm_undo_countdown(generation);
                }
            }
            Outcome::Ignored { reason } => {
                tracing::debug!(command = name, %reason, "ignored");
            }
        }

        if !state.undo_visible() {
            lock_timer(&self.undo_countdown).cancel();
        }
        self.sync_tick_timer(state.accrual().is_running());

        Handled {
            outcome,
            view: state.view(),
        }
    }

    pub async fn view(&self) -> TrackerView {
        self.state.lock().await.view()
    }

    pub async fn export_csv(&self) -> Result<Option<CsvExport>, ExportError> {
        let state = self.state.lock().await;
        export(state.ledger().records())
    }

    fn sync_tick_timer(&self, is_running: bool) {
        let mut timer = lock_timer(&self.tick_timer);
        if !is_running {
            if timer.is_active() {
                tracing::debug!("tick timer stopped");
            }
            timer.cancel();
            return;
        }
        if timer.is_active() {
            return;
        }
        let state = Arc::clone(&self.state);
        timer.start(move || {
            let state = Arc::clone(&state);
            async move {
                let mut state = state.lock().await;
                if !state.accrual().is_running() {
                    return ControlFlow::Break(());
                }
                state.tick();
                ControlFlow::Continue(())
            }
        });
        tracing::debug!("tick timer started");
    }

    fn arm_undo_countdown(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        lock_timer(&self.undo_countdown).restart(UNDO_WINDOW, move || async move {
            if state.lock().await.expire_undo(generation) {
                tracing::debug!(generation, "undo window expired");
            }
        });
    }
}

#[cfg(test)]
mod earnings_tracker_handler_tests {
    use super::*;
    use crate::modules::earnings::adapters::outbound::reset_records::RESET_RECORDS_KEY;
    use crate::modules::earnings::core::decision::NoOpReason;
    use crate::modules::earnings::core::wage_config::{WageConfig, WageKind};
    use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
    use crate::tests::fixtures::tracker::{FIXED_TIMESTAMP, hourly_config, make_tracker};
    use rstest::{fixture, rstest};
    use std::time::Duration;

    #[fixture]
    fn before_each() -> Arc<InMemoryKeyValueStore> {
        Arc::new(InMemoryKeyValueStore::new())
    }

    async fn running(store: Arc<InMemoryKeyValueStore>) -> EarningsTracker {
        let tracker = make_tracker(store).await;
        tracker.handle(TrackerCommand::SetWageConfig(hourly_config())).await;
        tracker.handle(TrackerCommand::ToggleRunning).await;
        tracker
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_load_persisted_records() {
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            RESET_RECORDS_KEY,
            r#"[{"time":"T1","earning":3.5},{"time":"T2","earning":1.5}]"#,
        ));
        let view = make_tracker(store).await.view().await;
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.total_earned, 5.0);
        assert!(view.change_history.is_empty());
        assert!(!view.is_running);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_accrue_while_running(before_each: Arc<InMemoryKeyValueStore>) {
        let tracker = running(before_each).await;
        sleep_ms(1050).await;

        let view = tracker.view().await;
        assert!(view.is_running);
        assert!((view.earned_amount - 0.01).abs() < 1e-9);
        assert_eq!(view.earned_display, "$0.01");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_stop_accruing_when_toggled_off(before_each: Arc<InMemoryKeyValueStore>) {
        let tracker = running(before_each).await;
        sleep_ms(550).await;
        let stopped = tracker.handle(TrackerCommand::ToggleRunning).await.view;
        sleep_ms(1000).await;

        let view = tracker.view().await;
        assert!(!view.is_running);
        assert_eq!(view.earned_amount, stopped.earned_amount);
        assert!((view.earned_amount - 0.005).abs() < 1e-9);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_refuse_to_start_without_a_complete_wage(
        before_each: Arc<InMemoryKeyValueStore>,
    ) {
        let tracker = make_tracker(before_each).await;
        tracker
            .handle(TrackerCommand::SetWageConfig(WageConfig::unset(WageKind::Yearly)))
            .await;
        let handled = tracker.handle(TrackerCommand::ToggleRunning).await;

        assert_eq!(
            handled.outcome,
            Outcome::Ignored {
                reason: NoOpReason::IncompleteWageConfig
            }
        );
        sleep_ms(500).await;
        assert_eq!(tracker.view().await.earned_amount, 0.0);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_record_and_persist_a_reset(before_each: Arc<InMemoryKeyValueStore>) {
        let tracker = running(before_each.clone()).await;
        sleep_ms(1050).await;

        let view = tracker.handle(TrackerCommand::Reset).await.view;
        assert!(!view.is_running);
        assert_eq!(view.earned_amount, 0.0);
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].time, FIXED_TIMESTAMP);
        assert_eq!(
            view.change_history[0].note.as_deref(),
            Some("Reset #1 - Earned $0.01 at reset")
        );
        assert!(view.undo_visible);

        let persisted = load_reset_records(&*before_each).await;
        assert_eq!(persisted, view.records);

        sleep_ms(1000).await;
        assert_eq!(tracker.view().await.earned_amount, 0.0);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_hide_undo_after_the_window(before_each: Arc<InMemoryKeyValueStore>) {
        let tracker = running(before_each).await;
        sleep_ms(200).await;
        tracker.handle(TrackerCommand::Reset).await;

        sleep_ms(4900).await;
        assert!(tracker.view().await.undo_visible);
        sleep_ms(200).await;
        assert!(!tracker.view().await.undo_visible);

        let handled = tracker.handle(TrackerCommand::Undo).await;
        assert_eq!(
            handled.outcome,
            Outcome::Ignored {
                reason: NoOpReason::NothingToUndo
            }
        );
        assert_eq!(handled.view.records.len(), 1);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_restart_the_window_on_a_newer_action(
        before_each: Arc<InMemoryKeyValueStore>,
    ) {
        let tracker = running(before_each).await;
        sleep_ms(200).await;
        tracker.handle(TrackerCommand::Reset).await;
        sleep_ms(3000).await;
        tracker.handle(TrackerCommand::DeleteChangeHistory).await;

        sleep_ms(3000).await;
        assert!(tracker.view().await.undo_visible);
        sleep_ms(2100).await;
        assert!(!tracker.view().await.undo_visible);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_undo_a_reset_and_persist_the_restored_ledger(
        before_each: Arc<InMemoryKeyValueStore>,
    ) {
        let tracker = running(before_each.clone()).await;
        sleep_ms(200).await;
        tracker.handle(TrackerCommand::Reset).await;

        let view = tracker.handle(TrackerCommand::Undo).await.view;
        assert!(view.records.is_empty());
        assert!(view.change_history.is_empty());
        assert!(!view.undo_visible);
        assert!(load_reset_records(&*before_each).await.is_empty());
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn it_should_keep_working_when_the_store_is_offline() {
        let mut store = InMemoryKeyValueStore::new();
        store.toggle_offline();
        let tracker = running(Arc::new(store)).await;
        sleep_ms(300).await;

        let handled = tracker.handle(TrackerCommand::Reset).await;
        assert!(handled.outcome.is_applied());
        assert_eq!(handled.view.records.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_export_an_empty_ledger(before_each: Arc<InMemoryKeyValueStore>) {
        let tracker = make_tracker(before_each).await;
        assert_eq!(tracker.export_csv().await.unwrap(), None);
    }
}
