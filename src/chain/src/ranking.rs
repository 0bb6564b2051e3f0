//! Validator ranking by delegated stake.

use chain_models::ValidatorSummary;

use crate::errors::{ChainError, Result};

/// 1-based rank of a validator in the set, ordered by descending delegated
/// shares. Equal-stake validators have no defined order among themselves.
///
/// Jailed status is ignored here; suppressing the rank of a jailed validator
/// is a presentation decision made by the caller.
pub fn rank(operator_address: &str, validators: &[ValidatorSummary]) -> Result<usize> {
    let mut by_stake: Vec<&ValidatorSummary> = validators.iter().collect();
    by_stake.sort_by(|a, b| {
        b.delegated_shares
            .partial_cmp(&a.delegated_shares)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    by_stake
        .iter()
        .position(|validator| validator.operator_address == operator_address)
        .map(|index| index + 1)
        .ok_or_else(|| {
            ChainError::NotFound(format!("validator {operator_address} is not in the active set"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(operator_address: &str, delegated_shares: f64, jailed: bool) -> ValidatorSummary {
        ValidatorSummary {
            operator_address: operator_address.to_string(),
            moniker: operator_address.to_uppercase(),
            details: String::new(),
            website: String::new(),
            security_contact: String::new(),
            commission_rate: 0.05,
            delegated_shares,
            jailed,
        }
    }

    #[test]
    fn ranks_by_descending_stake() {
        let set = vec![
            validator("a", 50.0, false),
            validator("b", 100.0, false),
            validator("c", 75.0, false),
        ];

        assert_eq!(rank("b", &set).unwrap(), 1);
        assert_eq!(rank("c", &set).unwrap(), 2);
        assert_eq!(rank("a", &set).unwrap(), 3);
    }

    #[test]
    fn extremes_get_first_and_last_rank() {
        let set: Vec<ValidatorSummary> = (1..=20)
            .map(|n| validator(&format!("val{n}"), n as f64 * 10.0, false))
            .collect();

        assert_eq!(rank("val20", &set).unwrap(), 1);
        assert_eq!(rank("val1", &set).unwrap(), set.len());
    }

    #[test]
    fn unknown_address_is_not_found() {
        let set = vec![validator("a", 50.0, false)];

        assert!(matches!(rank("ghost", &set), Err(ChainError::NotFound(_))));
    }

    #[test]
    fn jailed_validators_still_rank_by_stake() {
        let set = vec![
            validator("free", 10.0, false),
            validator("jailed", 90.0, true),
        ];

        assert_eq!(rank("jailed", &set).unwrap(), 1);
    }
}
