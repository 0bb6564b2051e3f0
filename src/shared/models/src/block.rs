use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Height and timestamp of a single block, fetched fresh per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub height: u64,
    pub time: DateTime<Utc>,
}
