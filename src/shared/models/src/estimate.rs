use chrono::{DateTime, Duration, Utc};

/// Outcome of asking when a block was, or will be, produced.
///
/// A block at or below the latest height is reported from its exact header;
/// a future height is extrapolated from the recent average block time.
/// Durations are whole seconds, no sub-second precision is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimate {
    Past {
        produced_at: DateTime<Utc>,
        elapsed: Duration,
    },
    Future {
        eta: DateTime<Utc>,
        remaining: Duration,
    },
}
