use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::Position;

/// Visit status of a stop, mirroring the status slugs delivered by the
/// server payload. Unrecognized slugs map to `Unknown` rather than failing
/// the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopStatus {
    NotVisited,
    Arrived,
    Completed,
    Cancelled,
    CancelledByDriver,
    CancelledByCompany,
    DeliveryNotPossible,
    Failed,
    NobodyAtLocation,
    #[serde(other)]
    Unknown,
}

impl StopStatus {
    /// Cancelled stops keep their marker but drop out of segment adjacency.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::CancelledByDriver | Self::CancelledByCompany
        )
    }

    /// The vehicle has at least reached this stop.
    #[must_use]
    pub const fn is_past_not_visited(self) -> bool {
        !matches!(self, Self::NotVisited | Self::Unknown)
    }

    /// The visit at this stop has concluded (beyond mere arrival).
    #[must_use]
    pub const fn is_past_arrived(self) -> bool {
        self.is_past_not_visited() && !matches!(self, Self::Arrived)
    }

    /// Status slug as used in CSS class names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::NotVisited => "not-visited",
            Self::Arrived => "arrived",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::CancelledByDriver => "cancelled-by-driver",
            Self::CancelledByCompany => "cancelled-by-company",
            Self::DeliveryNotPossible => "delivery-not-possible",
            Self::Failed => "failed",
            Self::NobodyAtLocation => "nobody-at-location",
            Self::Unknown => "",
        }
    }
}

/// Closed set of stop variants. Replaces runtime type tests with exhaustive
/// matching when choosing marker treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Driver,
    Express,
    Position,
}

/// Promised delivery window for a stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// A pickup/delivery location on a route.
///
/// Constructed from a server payload snapshot and mutated in place by the
/// surrounding domain layer when live updates arrive; the visualization
/// layer only reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: Uuid,
    pub kind: StopKind,
    pub stop_number: u32,
    /// Preview ordinal assigned while assembling a merged route; overrides
    /// `stop_number` for display when present.
    #[serde(default)]
    pub new_stop_number: Option<u32>,
    pub address: String,
    #[serde(default)]
    pub position: Option<Position>,
    pub status: StopStatus,
    #[serde(default)]
    pub arrival_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub time_frame: Option<TimeFrame>,
    #[serde(default)]
    pub delayed: bool,
    #[serde(with = "option_duration_serde", default)]
    pub delay: Option<Duration>,
    #[serde(default)]
    pub alert: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(with = "option_duration_serde", default)]
    pub loading_time: Option<Duration>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Stop {
    /// Display ordinal: the merge preview number wins when set.
    #[must_use]
    pub fn effective_number(&self) -> u32 {
        self.new_stop_number.unwrap_or(self.stop_number)
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }
}

/// Serialize optional durations as whole seconds, matching the payload shape.
pub mod option_duration_serde {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    /// Forwards serializer errors.
    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) => serializer.serialize_some(&duration.num_seconds()),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    /// Forwards deserializer errors.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = Option::<i64>::deserialize(deserializer)?;
        Ok(seconds.map(Duration::seconds))
    }
}
