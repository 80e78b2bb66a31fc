use {
    crate::{ContractId, Identity},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Does nothing. Used in multi-calls to forward assets to the router
    /// ahead of a call that consumes them.
    Null {},
    /// Add the assets previously forwarded to the router into a pool.
    AddLiquidity {
        pool: ContractId,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        recipient: Identity,
    },
    /// Swap the forwarded asset for the other asset of the pool.
    ///
    /// Returns `u64`: the output amount.
    SwapExactInput {
        pool: ContractId,
        min_amount_out: u64,
        recipient: Identity,
    },
}
