use {
    crate::TxId,
    std::{any::type_name, fmt::Display},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StdError {
    #[error("invalid hex string `{input}`: {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("data is of incorrect length! expecting: {expect}, got: {actual}")]
    IncorrectLength { expect: usize, actual: usize },

    #[error("invalid amount `{input}`: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("failed to serialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Serialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("unexpected query response! expecting: {expect}, got: {actual}")]
    UnexpectedResponse {
        expect: &'static str,
        actual: String,
    },

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error("transaction {tx_id} failed: {reason}")]
    TransactionFailed { tx_id: TxId, reason: String },
}

impl StdError {
    pub fn invalid_hex<I, R>(input: I, reason: R) -> Self
    where
        I: Into<String>,
        R: Display,
    {
        Self::InvalidHex {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_amount<I, R>(input: I, reason: R) -> Self
    where
        I: Into<String>,
        R: Display,
    {
        Self::InvalidAmount {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn serialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: Display,
    {
        Self::Serialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: Display,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

pub type StdResult<T> = core::result::Result<T, StdError>;
