//! Error types for Simplus policies

use thiserror::Error;

/// Result type for policy operations
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Errors raised by policy implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// A capacity or MIPS figure that cannot describe a real resource
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    /// Shrinking a provisioner below what VMs already hold
    #[error("Capacity {requested} is below the {allocated} units already allocated")]
    CapacityBelowAllocation { requested: u64, allocated: u64 },

    /// Utilization parameters outside [0, 1] or not finite
    #[error("Invalid utilization: {0}")]
    InvalidUtilization(String),
}

impl PolicyError {
    /// Create an invalid capacity error
    pub fn invalid_capacity(msg: impl Into<String>) -> Self {
        Self::InvalidCapacity(msg.into())
    }

    /// Create an invalid utilization error
    pub fn invalid_utilization(msg: impl Into<String>) -> Self {
        Self::InvalidUtilization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PolicyError::CapacityBelowAllocation {
            requested: 10,
            allocated: 20,
        };
        assert_eq!(
            err.to_string(),
            "Capacity 10 is below the 20 units already allocated"
        );

        let err = PolicyError::invalid_utilization("max 1.5");
        assert_eq!(err.to_string(), "Invalid utilization: max 1.5");
    }
}
