use thiserror::Error;

/// Error type for disk simulation setup.
///
/// Every variant is raised before the scheduling loop starts; a run either completes or never
/// begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiskError {
    /// The address does not fall within the disk (negative, or past the last block)
    #[error("invalid address {address} (disk holds {capacity} blocks)")]
    InvalidAddress { address: i64, capacity: u64 },
    /// The configuration is inconsistent or out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A comma-separated descriptor could not be parsed
    #[error("malformed {field} descriptor {input:?}: {reason}")]
    Descriptor {
        field: &'static str,
        input: String,
        reason: String,
    },
}

impl DiskError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        DiskError::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DiskError::InvalidAddress {
            address: 40,
            capacity: 36,
        };
        assert_eq!(err.to_string(), "invalid address 40 (disk holds 36 blocks)");

        let err = DiskError::config("window must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: window must be at least 1"
        );
    }
}
