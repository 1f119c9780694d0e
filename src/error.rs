//! Errors reported by `Dict` operations

use std::collections::TryReserveError;

/// Failure outcomes of dictionary operations.
///
/// Every variant is reported before any state is mutated, so the dictionary stays
/// queryable after an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DictError {
    /// The key was rejected (empty keys are not stored)
    #[error("[Dict]Invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The slot table or a key/value copy could not be allocated
    #[error("[Dict]Allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),
    /// Doubling the capacity would overflow `usize`
    #[error("[Dict]Capacity overflow growing from {0} slots")]
    CapacityOverflow(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DictError::InvalidArgument("empty key").to_string(),
            "[Dict]Invalid argument: empty key"
        );
        assert_eq!(
            DictError::CapacityOverflow(8).to_string(),
            "[Dict]Capacity overflow growing from 8 slots"
        );
    }

    #[test]
    fn test_from_try_reserve_error() {
        let mut buf: Vec<u64> = Vec::new();
        let result = buf.try_reserve_exact(usize::MAX).map_err(DictError::from);

        assert!(matches!(result, Err(DictError::AllocationFailure(_))));
        assert!(result.is_err_and(|err| err.to_string().starts_with("[Dict]Allocation failure")));
    }
}
