use {
    crate::ContractId,
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Set the exchange contract whose code all registered pools must match.
    /// Can only be done once.
    Initialize { template_exchange_id: ContractId },
    /// Register an exchange contract as a pool.
    AddExchangeContract { exchange_id: ContractId },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns [`ContractId`]; zero if the registry isn't initialized.
    ExchangeContractRoot {},
    /// Returns `bool`.
    IsPool { addr: ContractId },
}
