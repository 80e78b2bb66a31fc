use {
    crate::{Addr, AssetId},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Set the owner and the mint amount, and mint `mint_amount` of the token
    /// into the contract's own balance. Can only be done once.
    Initialize { mint_amount: u64, address: Addr },
    /// Mint more of the token into the contract's own balance. Owner only.
    MintCoins { mint_amount: u64 },
    /// Transfer some of the contract's balance to a wallet. Owner only.
    TransferTokenToOutput {
        coins: u64,
        asset_id: AssetId,
        address: Addr,
    },
    /// Mint the configured mint amount to the caller. Open to anyone.
    Mint {},
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns [`Addr`]; zero if the token isn't initialized.
    GetOwner {},
    /// Returns `u64`.
    GetMintAmount {},
    /// Returns `u64`: the contract's own balance of its token.
    GetBalance {},
}
