use swayswap_types::AssetId;

/// Errors that abort initialization or deployment before any transaction is
/// submitted. They require an operator to fix the configuration or fund the
/// wallet before re-running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    #[error("missing required configuration: {}", missing.join(", "))]
    MissingConfig { missing: Vec<String> },

    #[error("invalid value for `{name}`: {reason}")]
    InvalidConfig { name: String, reason: String },

    #[error("insufficient balance of asset {asset}! required: {required}, available: {available}")]
    InsufficientBalance {
        asset: AssetId,
        required: u64,
        available: u64,
    },

    #[error("storage slot of `{contract}` references `{reference}`, which isn't deployed before it")]
    UnknownContractReference { contract: String, reference: String },
}

impl InitError {
    pub fn invalid_config<N, R>(name: N, reason: R) -> Self
    where
        N: Into<String>,
        R: ToString,
    {
        Self::InvalidConfig {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
