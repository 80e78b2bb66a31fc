use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolInfo {
    pub eth_reserve: u64,
    pub token_reserve: u64,
    pub lp_token_supply: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns [`PoolInfo`].
    GetPoolInfo {},
}
