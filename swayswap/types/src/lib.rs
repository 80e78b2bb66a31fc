mod amount;
mod bytes;
mod client;
pub mod contracts;
mod error;
mod hash;
mod identity;
mod query;
mod serializers;
mod signer;
mod tx;

pub use {
    amount::*, bytes::*, client::*, error::*, hash::*, identity::*, query::*, serializers::*,
    signer::*, tx::*,
};

// ---------------------------------- aliases ----------------------------------

/// The address of a wallet, derived from the wallet's public key.
pub type Addr = B256;

/// The address of a deployed contract.
pub type ContractId = B256;

/// Identifies a fungible asset. A token contract's asset ID equals its
/// contract ID.
pub type AssetId = B256;

/// The salt used in deriving a contract ID.
pub type Salt = B256;

/// The identifier of a transaction.
pub type TxId = B256;

/// Raw JSON value, as used in contract messages and return values.
pub type Json = serde_json::Value;

/// The chain's native asset, used to pay for gas and paired with every token
/// in the pools.
pub const BASE_ASSET_ID: AssetId = B256::ZERO;
