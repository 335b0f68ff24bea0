//! Entry domain model, result state and repository contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Mutually exclusive result of a run. Wire values are the snake_case
/// names; the adapter is strict and rejects anything it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultState {
    Qualified,
    Nq,
    Excused,
    Absent,
    Withdrawn,
    Pending,
}

impl ResultState {
    /// Collapse the local flag set into a single state.
    ///
    /// Flags are checked in strict priority order; only the first true
    /// flag counts, so a corrupted row with two flags set still encodes
    /// deterministically.
    pub fn from_flags(
        qualified: bool,
        not_qualified: bool,
        excused: bool,
        absent: bool,
        withdrawn: bool,
    ) -> Self {
        if qualified {
            Self::Qualified
        } else if not_qualified {
            Self::Nq
        } else if excused {
            Self::Excused
        } else if absent {
            Self::Absent
        } else if withdrawn {
            Self::Withdrawn
        } else {
            Self::Pending
        }
    }

    /// Map a wire status string to a state, case-insensitively.
    ///
    /// Unrecognized values are an error, not a silent `Pending`.
    pub fn from_wire(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "qualified" => Ok(Self::Qualified),
            "nq" => Ok(Self::Nq),
            "excused" => Ok(Self::Excused),
            "absent" => Ok(Self::Absent),
            "withdrawn" => Ok(Self::Withdrawn),
            "pending" => Ok(Self::Pending),
            _ => Err(Error::UnknownWireValue {
                field: "status",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Qualified => "qualified",
            Self::Nq => "nq",
            Self::Excused => "excused",
            Self::Absent => "absent",
            Self::Withdrawn => "withdrawn",
            Self::Pending => "pending",
        }
    }

    /// A reason text accompanies NQ, excused and withdrawn results only.
    pub fn carries_reason(&self) -> bool {
        matches!(self, Self::Nq | Self::Excused | Self::Withdrawn)
    }

    pub fn is_scored(&self) -> bool {
        *self != Self::Pending
    }
}

/// One dog/handler pairing's participation in a class.
///
/// The armband number is the natural key within a class; the remote
/// replica enforces uniqueness on (class, armband).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i32,
    pub class_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub breed: Option<String>,
    pub handler: String,
    pub sort_order: i32,
    pub qualified: bool,
    pub not_qualified: bool,
    pub excused: bool,
    pub absent: bool,
    pub withdrawn: bool,
    pub reason: Option<String>,
    pub search_time: Option<String>,
    pub area_time1: Option<String>,
    pub area_time2: Option<String>,
    pub area_time3: Option<String>,
    pub area_time1_ms: i32,
    pub area_time2_ms: i32,
    pub area_time3_ms: i32,
    pub total_faults: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub placement: Option<i32>,
    pub total_score: Option<f64>,
}

impl Entry {
    pub fn result_state(&self) -> ResultState {
        ResultState::from_flags(
            self.qualified,
            self.not_qualified,
            self.excused,
            self.absent,
            self.withdrawn,
        )
    }

    /// An entry is scored once any non-pending result flag is set.
    pub fn is_scored(&self) -> bool {
        self.result_state().is_scored()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub class_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub breed: Option<String>,
    pub handler: String,
    pub sort_order: i32,
}

/// Scoring fields written back by the download reconciler. Applying this
/// sets exactly one result flag and clears the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResultUpdate {
    pub state: ResultState,
    pub reason: Option<String>,
    pub search_time: Option<String>,
    pub area_time1: Option<String>,
    pub area_time2: Option<String>,
    pub area_time3: Option<String>,
    pub total_faults: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    /// Per-area millisecond counters are zeroed for every non-qualified result.
    pub clear_area_millis: bool,
}

#[async_trait]
pub trait EntryRepositoryTrait: Send + Sync {
    fn get_entry(&self, entry_id: i32) -> Result<Entry>;
    fn find_entry(&self, entry_id: i32) -> Result<Option<Entry>>;
    fn list_entries_for_class(&self, class_id: i32) -> Result<Vec<Entry>>;
    fn list_entries_for_trial(&self, trial_id: i32) -> Result<Vec<Entry>>;
    async fn insert_entry(&self, new_entry: NewEntry) -> Result<Entry>;
    async fn update_entry(&self, entry: Entry) -> Result<Entry>;
    async fn delete_entry(&self, entry_id: i32) -> Result<usize>;
    async fn apply_result(&self, entry_id: i32, update: EntryResultUpdate) -> Result<()>;
}
