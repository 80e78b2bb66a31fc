use {
    crate::{Addr, AssetId, ContractId, Json, JsonSerExt, StdError, StdResult},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// Query a wallet's balance of a single asset.
    Balance(QueryBalanceRequest),
    /// Query the height of the latest block.
    BlockHeight(QueryBlockHeightRequest),
    /// Query whether a contract exists.
    Contract(QueryContractRequest),
    /// Dry-run a contract's read-only function against the latest state.
    ContractSmart(QueryContractSmartRequest),
}

impl Query {
    pub fn balance(owner: Addr, asset_id: AssetId) -> Self {
        Query::Balance(QueryBalanceRequest { owner, asset_id })
    }

    pub fn block_height() -> Self {
        Query::BlockHeight(QueryBlockHeightRequest {})
    }

    pub fn contract(contract: ContractId) -> Self {
        Query::Contract(QueryContractRequest { contract })
    }

    pub fn contract_smart<M>(contract: ContractId, msg: &M) -> StdResult<Self>
    where
        M: Serialize,
    {
        Ok(Query::ContractSmart(QueryContractSmartRequest {
            contract,
            msg: msg.to_json_value()?,
        }))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryBalanceRequest {
    pub owner: Addr,
    pub asset_id: AssetId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryBlockHeightRequest {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryContractRequest {
    pub contract: ContractId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryContractSmartRequest {
    pub contract: ContractId,
    pub msg: Json,
}

// --------------------------------- response ----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryResponse {
    Balance(u64),
    BlockHeight(u64),
    /// `true` if a contract exists at the given ID.
    Contract(bool),
    ContractSmart(Json),
}

macro_rules! generate_downcast {
    ($($fn_name:ident: $id:ident => $ret:ty),+ $(,)?) => {
        impl QueryResponse {
            $(
                pub fn $fn_name(self) -> StdResult<$ret> {
                    match self {
                        QueryResponse::$id(value) => Ok(value),
                        other => Err(StdError::UnexpectedResponse {
                            expect: stringify!($id),
                            actual: format!("{other:?}"),
                        }),
                    }
                }
            )+
        }
    };
}

generate_downcast! {
    as_balance: Balance => u64,
    as_block_height: BlockHeight => u64,
    as_contract: Contract => bool,
    as_contract_smart: ContractSmart => Json,
}
