//! Block timestamp estimation.
//!
//! Future heights are extrapolated from the average block time over a fixed
//! window of recent blocks; past heights are reported from the exact block
//! header, never extrapolated.

use chrono::{DateTime, Duration, Utc};

use chain_models::{BlockRef, Estimate};

use crate::errors::{ChainError, Result};

/// How far behind the latest block the reference block is taken.
pub const REFERENCE_OFFSET: u64 = 100;

/// Height of the reference block used to derive the average block time.
///
/// Fails with `InsufficientHistory` while the chain is younger than the
/// offset, so callers never query height zero or wrap below it.
pub fn reference_height(latest_height: u64, offset: u64) -> Result<u64> {
    if latest_height <= offset {
        return Err(ChainError::InsufficientHistory {
            latest: latest_height,
            offset,
        });
    }
    Ok(latest_height - offset)
}

/// Reports how long ago an already-produced block was generated.
pub fn elapsed(block: &BlockRef, now: DateTime<Utc>) -> Estimate {
    Estimate::Past {
        produced_at: block.time,
        elapsed: now - block.time,
    }
}

/// Extrapolates the timestamp of a not-yet-produced block.
///
/// The average seconds-per-block over `reference..latest` is multiplied by
/// the number of blocks still to come and truncated to whole seconds before
/// being added to the latest block time. The truncation matches the
/// integer-second precision of the reported ETA.
pub fn estimate(target_height: u64, latest: &BlockRef, reference: &BlockRef) -> Result<Estimate> {
    if reference.height >= latest.height {
        return Err(ChainError::InvalidReferenceRange {
            reference: reference.height,
            latest: latest.height,
        });
    }

    let height_diff = (latest.height - reference.height) as f64;
    let time_diff = (latest.time - reference.time).num_seconds() as f64;
    let avg_block_seconds = time_diff / height_diff;

    let blocks_ahead = target_height.saturating_sub(latest.height) as f64;
    let eta_seconds = (avg_block_seconds * blocks_ahead) as i64;

    tracing::debug!(
        height_diff,
        time_diff,
        avg_block_seconds,
        blocks_ahead,
        "average block time"
    );

    // Absurd target heights overflow chrono's duration and timestamp
    // ranges; surface that as an input error instead of panicking.
    let too_far = || {
        ChainError::InvalidInput(format!(
            "block height {target_height} is too far ahead to estimate"
        ))
    };
    let remaining = Duration::try_seconds(eta_seconds).ok_or_else(too_far)?;
    let eta = latest.time.checked_add_signed(remaining).ok_or_else(too_far)?;
    Ok(Estimate::Future { eta, remaining })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn block(height: u64, secs: i64) -> BlockRef {
        BlockRef {
            height,
            time: at(secs),
        }
    }

    #[test]
    fn ten_second_blocks_extrapolate_linearly() {
        let latest = block(1000, 0);
        let reference = block(900, -1000);

        let estimate = estimate(1050, &latest, &reference).unwrap();
        assert_eq!(
            estimate,
            Estimate::Future {
                eta: at(500),
                remaining: Duration::seconds(500),
            }
        );
    }

    #[test]
    fn eta_is_monotonic_in_target_height() {
        let latest = block(1000, 0);
        let reference = block(900, -730);

        let mut previous = latest.time;
        for target in 1001..1100 {
            match estimate(target, &latest, &reference).unwrap() {
                Estimate::Future { eta, .. } => {
                    assert!(eta >= previous, "eta regressed at height {target}");
                    assert!(eta > latest.time);
                    previous = eta;
                }
                Estimate::Past { .. } => panic!("future target reported as past"),
            }
        }
    }

    #[test]
    fn fractional_average_truncates_to_whole_seconds() {
        // 100 blocks in 650 seconds: 6.5 s/block, 3 blocks ahead = 19.5 s.
        let latest = block(1000, 0);
        let reference = block(900, -650);

        let estimate = estimate(1003, &latest, &reference).unwrap();
        assert_eq!(
            estimate,
            Estimate::Future {
                eta: at(19),
                remaining: Duration::seconds(19),
            }
        );
    }

    #[test]
    fn absurdly_distant_target_height_is_rejected() {
        let latest = block(1000, 0);
        let reference = block(900, -1000);

        let err = estimate(u64::MAX, &latest, &reference).unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));
    }

    #[test]
    fn equal_reference_and_latest_heights_are_rejected() {
        let latest = block(1000, 0);
        let reference = block(1000, -10);

        let err = estimate(1050, &latest, &reference).unwrap_err();
        assert!(matches!(
            err,
            ChainError::InvalidReferenceRange {
                reference: 1000,
                latest: 1000
            }
        ));
    }

    #[test]
    fn reference_newer_than_latest_is_rejected() {
        let latest = block(1000, 0);
        let reference = block(1050, 100);

        assert!(matches!(
            estimate(1100, &latest, &reference),
            Err(ChainError::InvalidReferenceRange { .. })
        ));
    }

    #[test]
    fn young_chain_has_no_reference_height() {
        let err = reference_height(80, REFERENCE_OFFSET).unwrap_err();
        assert!(matches!(
            err,
            ChainError::InsufficientHistory {
                latest: 80,
                offset: REFERENCE_OFFSET
            }
        ));

        // Exactly at the offset there is still no strictly older block.
        assert!(reference_height(REFERENCE_OFFSET, REFERENCE_OFFSET).is_err());
        assert_eq!(
            reference_height(REFERENCE_OFFSET + 1, REFERENCE_OFFSET).unwrap(),
            1
        );
    }

    #[test]
    fn past_blocks_report_elapsed_time() {
        let produced = block(42, -3600);
        match elapsed(&produced, at(0)) {
            Estimate::Past {
                produced_at,
                elapsed,
            } => {
                assert_eq!(produced_at, at(-3600));
                assert_eq!(elapsed, Duration::seconds(3600));
            }
            Estimate::Future { .. } => panic!("past block reported as future"),
        }
    }
}
