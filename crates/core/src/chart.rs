//! Chart-generation job records as returned by the listing service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Identifier of a chart job.
///
/// The service emits 64-bit ids, sometimes as JSON numbers and sometimes as strings
/// (to survive JavaScript number precision). Both forms are held as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChartId(pub String);

impl<'de> Deserialize<'de> for ChartId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChartId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

/// Generation status of a chart job. The server owns every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ChartStatus {
    /// Waiting in the generation queue
    Queued = 0,
    /// Picked up by a worker
    Generating = 1,
    /// Finished; `genChart` holds the chart spec
    Ready = 2,
    /// Finished with an error; `execMsg` says why
    Failed = 3,
}

impl ChartStatus {
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether the server will never move a job out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

impl TryFrom<i32> for ChartStatus {
    type Error = CoreError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Queued),
            1 => Ok(Self::Generating),
            2 => Ok(Self::Ready),
            3 => Ok(Self::Failed),
            other => Err(CoreError::UnknownStatus(other)),
        }
    }
}

impl fmt::Display for ChartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match *self {
            Self::Queued => "queued",
            Self::Generating => "generating",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One chart job from the listing.
///
/// `status` keeps the raw wire code so that a status this build doesn't know about
/// still reaches the renderer and can be reported there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub id: ChartId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub gen_chart: Option<String>,
    #[serde(default)]
    pub gen_result: Option<String>,
    pub status: i32,
    #[serde(default)]
    pub exec_msg: Option<String>,
    #[serde(default)]
    pub user_id: Option<ChartId>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl ChartRecord {
    /// Decoded generation status.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownStatus`] for codes outside 0..=3.
    pub fn status(&self) -> Result<ChartStatus, CoreError> {
        ChartStatus::try_from(self.status)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == ChartStatus::Ready.code()
    }
}
