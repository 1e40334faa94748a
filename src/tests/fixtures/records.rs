// Builders for reset records used across unit tests.

use crate::modules::earnings::core::history::ResetRecord;

pub struct ResetRecordBuilder {
    inner: ResetRecord,
}

impl Default for ResetRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ResetRecordBuilder {
    pub fn new() -> Self {
        Self {
            inner: ResetRecord {
                time: "1/15/2024, 9:30:00 AM".to_string(),
                earning: 12.5,
            },
        }
    }

    pub fn time(mut self, v: impl Into<String>) -> Self {
        self.inner.time = v.into();
        self
    }

    pub fn earning(mut self, v: f64) -> Self {
        self.inner.earning = v;
        self
    }

    pub fn build(self) -> ResetRecord {
        self.inner
    }
}

/// One record per earning, timed `T1`, `T2`, ... in order.
pub fn make_records(earnings: &[f64]) -> Vec<ResetRecord> {
    earnings
        .iter()
        .enumerate()
        .map(|(index, earning)| {
            ResetRecordBuilder::new()
                .time(format!("T{}", index + 1))
                .earning(*earning)
                .build()
        })
        .collect()
}

#[cfg(test)]
mod reset_record_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new() {
        let built = ResetRecordBuilder::default().build();
        assert_eq!(built.time, "1/15/2024, 9:30:00 AM");
        assert_eq!(built.earning, 12.5);
    }

    #[rstest]
    fn it_should_number_record_times_from_one() {
        let records = make_records(&[1.0, 2.0]);
        assert_eq!(records[0].time, "T1");
        assert_eq!(records[1].time, "T2");
        assert_eq!(records[1].earning, 2.0);
    }
}
