use std::fmt;

use crate::domain::error::RecordError;

/// One object change delivered by the storage notification source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub bucket: String,
    pub key: String,
}

impl NotificationRecord {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// The records of one invocation. `None` marks a record that arrived without
/// any object information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationBatch {
    pub records: Vec<Option<NotificationRecord>>,
}

impl NotificationBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<NotificationRecord>> for NotificationBatch {
    fn from(records: Vec<NotificationRecord>) -> Self {
        Self {
            records: records.into_iter().map(Some).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingRecord,
    EmptyKey,
    UnsupportedExtension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::MissingRecord => "record carries no object",
            SkipReason::EmptyKey => "object key is empty",
            SkipReason::UnsupportedExtension => "file extension isn't supported",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Skipped(SkipReason),
    Succeeded { destination_key: String },
    Failed(RecordError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a ProcessingOutcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut summary, outcome| {
                summary.total += 1;
                match outcome {
                    ProcessingOutcome::Skipped(_) => summary.skipped += 1,
                    ProcessingOutcome::Succeeded { .. } => summary.succeeded += 1,
                    ProcessingOutcome::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }
}
