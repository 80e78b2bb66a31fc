//! Messages of the SwaySwap contract ABIs.
//!
//! Each contract exposes an `ExecuteMsg` enum, whose variants are submitted in
//! transactions, and a `QueryMsg` enum, whose variants are answered by
//! dry-running the contract against the latest state. Both encode to JSON as
//! `{"function_name": {...arguments}}`.

pub mod exchange;
pub mod registry;
pub mod router;
pub mod token;
