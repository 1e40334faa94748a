use async_graphql::{Context, Enum, Object, Result as GqlResult, SimpleObject};

use crate::modules::earnings::core::history::{ChangeHistoryEntry, ResetRecord};
use crate::modules::earnings::core::state::TrackerView;
use crate::modules::earnings::core::wage_config::{WageConfig, WageKind};
use crate::modules::earnings::use_cases::export_history::csv_export::CsvExport;
use crate::modules::earnings::use_cases::track_earnings::command::TrackerCommand;
use crate::shell::state::AppState;

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlWageKind {
    Hourly,
    Yearly,
}

impl From<GqlWageKind> for WageKind {
    fn from(v: GqlWageKind) -> Self {
        match v {
            GqlWageKind::Hourly => WageKind::Hourly,
            GqlWageKind::Yearly => WageKind::Yearly,
        }
    }
}

impl From<WageKind> for GqlWageKind {
    fn from(v: WageKind) -> Self {
        match v {
            WageKind::Hourly => GqlWageKind::Hourly,
            WageKind::Yearly => GqlWageKind::Yearly,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWageConfig {
    pub kind: GqlWageKind,
    pub rate: Option<f64>,
    pub hours_per_week: Option<f64>,
    pub hourly_rate: f64,
}

impl From<WageConfig> for GqlWageConfig {
    fn from(v: WageConfig) -> Self {
        Self {
            kind: v.kind().into(),
            rate: v.rate(),
            hours_per_week: v.hours_per_week(),
            hourly_rate: v.hourly_rate(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlResetRecord {
    pub time: String,
    pub earning: f64,
}

impl From<ResetRecord> for GqlResetRecord {
    fn from(v: ResetRecord) -> Self {
        Self {
            time: v.time,
            earning: v.earning,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlChangeHistoryEntry {
    pub timestamp: String,
    pub records: Vec<GqlResetRecord>,
    pub note: Option<String>,
}

impl From<ChangeHistoryEntry> for GqlChangeHistoryEntry {
    fn from(v: ChangeHistoryEntry) -> Self {
        Self {
            timestamp: v.timestamp,
            records: v.records.into_iter().map(Into::into).collect(),
            note: v.note,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTrackerView {
    pub wage_config: GqlWageConfig,
    pub can_start: bool,
    pub is_running: bool,
    pub earned_amount: f64,
    pub earned_display: String,
    pub records: Vec<GqlResetRecord>,
    pub change_history: Vec<GqlChangeHistoryEntry>,
    pub selected_rows: Vec<u64>,
    pub undo_visible: bool,
    pub total_earned: f64,
    pub total_earned_display: String,
    pub is_dark: bool,
}

impl From<TrackerView> for GqlTrackerView {
    fn from(v: TrackerView) -> Self {
        Self {
            wage_config: v.wage_config.into(),
            can_start: v.can_start,
            is_running: v.is_running,
            earned_amount: v.earned_amount,
            earned_display: v.earned_display,
            records: v.records.into_iter().map(Into::into).collect(),
            change_history: v.change_history.into_iter().map(Into::into).collect(),
            selected_rows: v.selected_rows.into_iter().map(|row| row as u64).collect(),
            undo_visible: v.undo_visible,
            total_earned: v.total_earned,
            total_earned_display: v.total_earned_display,
            is_dark: v.is_dark,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlCsvExport {
    pub filename: String,
    pub mime: String,
    pub body: String,
}

impl From<CsvExport> for GqlCsvExport {
    fn from(v: CsvExport) -> Self {
        Self {
            filename: v.filename.to_string(),
            mime: v.mime.to_string(),
            body: v.body,
        }
    }
}

fn to_index(value: i32) -> GqlResult<usize> {
    usize::try_from(value).map_err(|_| async_graphql::Error::new(format!("index must not be negative, got {value}")))
}

async fn dispatch(context: &Context<'_>, command: TrackerCommand) -> GqlTrackerView {
    let state = context.data_unchecked::<AppState>();
    state.tracker.handle(command).await.view.into()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn state(&self, context: &Context<'_>) -> GqlTrackerView {
        let state = context.data_unchecked::<AppState>();
        state.tracker.view().await.into()
    }

    /// Null when the ledger is empty.
    async fn export_csv(&self, context: &Context<'_>) -> GqlResult<Option<GqlCsvExport>> {
        let state = context.data_unchecked::<AppState>();
        let download = state
            .tracker
            .export_csv()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(download.map(Into::into))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn set_wage_config(
        &self,
        context: &Context<'_>,
        kind: GqlWageKind,
        rate: Option<f64>,
        hours_per_week: Option<f64>,
    ) -> GqlResult<GqlTrackerView> {
        let config = WageConfig::new(kind.into(), rate, hours_per_week)
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(dispatch(context, TrackerCommand::SetWageConfig(config)).await)
    }

    async fn toggle_running(&self, context: &Context<'_>) -> GqlTrackerView {
        dispatch(context, TrackerCommand::ToggleRunning).await
    }

    async fn reset(&self, context: &Context<'_>) -> GqlTrackerView {
        dispatch(context, TrackerCommand::Reset).await
    }

    /// Deletes the current selection when `indices` is omitted.
    async fn delete_selected(
        &self,
        context: &Context<'_>,
        indices: Option<Vec<i32>>,
    ) -> GqlResult<GqlTrackerView> {
        let indices = indices
            .map(|values| values.into_iter().map(to_index).collect::<GqlResult<Vec<_>>>())
            .transpose()?;
        Ok(dispatch(context, TrackerCommand::DeleteSelected { indices }).await)
    }

    async fn toggle_row_selection(&self, context: &Context<'_>, index: i32) -> GqlResult<GqlTrackerView> {
        let index = to_index(index)?;
        Ok(dispatch(context, TrackerCommand::ToggleRowSelection { index }).await)
    }

    async fn revert(&self, context: &Context<'_>, entry_index: i32) -> GqlResult<GqlTrackerView> {
        let entry_index = to_index(entry_index)?;
        Ok(dispatch(context, TrackerCommand::Revert { entry_index }).await)
    }

    async fn edit_note(
        &self,
        context: &Context<'_>,
        entry_index: i32,
        note: String,
    ) -> GqlResult<GqlTrackerView> {
        let entry_index = to_index(entry_index)?;
        Ok(dispatch(context, TrackerCommand::EditNote { entry_index, note }).await)
    }

    async fn delete_change_history(&self, context: &Context<'_>) -> GqlTrackerView {
        dispatch(context, TrackerCommand::DeleteChangeHistory).await
    }

    async fn undo(&self, context: &Context<'_>) -> GqlTrackerView {
        dispatch(context, TrackerCommand::Undo).await
    }
}
