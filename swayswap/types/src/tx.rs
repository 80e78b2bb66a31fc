use {
    crate::{
        Addr, AssetId, ContractId, HashExt, Json, JsonSerExt, Salt, StdError, StdResult, TxId,
        B256,
    },
    serde::{Deserialize, Serialize},
};

/// Gas limit used when the caller doesn't specify one.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Prefix of the contract ID preimage.
const CONTRACT_ID_SEED: &[u8] = b"FUEL";

// ---------------------------------- params -----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    pub gas_price: u64,
    pub gas_limit: u64,
    /// Number of outputs whose recipient is only known at execution time,
    /// e.g. assets a contract transfers to a wallet.
    pub variable_outputs: u8,
}

impl Default for TxParams {
    fn default() -> Self {
        Self {
            gas_price: 0,
            gas_limit: DEFAULT_GAS_LIMIT,
            variable_outputs: 0,
        }
    }
}

impl TxParams {
    pub fn with_gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_variable_outputs(mut self, variable_outputs: u8) -> Self {
        self.variable_outputs = variable_outputs;
        self
    }
}

// ----------------------------------- calls -----------------------------------

/// Assets sent along with a contract call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forward {
    pub amount: u64,
    pub asset_id: AssetId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract: ContractId,
    pub msg: Json,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<Forward>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// Other contracts the call may read from or call into. They must be
    /// declared as inputs of the transaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_contracts: Vec<ContractId>,
}

impl ContractCall {
    pub fn new<M>(contract: ContractId, msg: &M) -> StdResult<Self>
    where
        M: Serialize,
    {
        Ok(Self {
            contract,
            msg: msg.to_json_value()?,
            forward: None,
            gas_limit: None,
            external_contracts: vec![],
        })
    }
}

// ---------------------------------- storage ----------------------------------

/// A storage slot set at contract creation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StorageSlot {
    pub key: B256,
    pub value: B256,
}

/// Compute the ID a contract will be deployed at:
///
/// ```plain
/// contract_id := sha256("FUEL" | salt | sha256(bytecode) | state_root)
/// ```
///
/// where `state_root` is the SHA-256 of all storage slots' `key | value`,
/// sorted by key, or zero if there are no storage slots.
pub fn compute_contract_id(bytecode: &[u8], salt: Salt, storage_slots: &[StorageSlot]) -> ContractId {
    let mut preimage = Vec::with_capacity(CONTRACT_ID_SEED.len() + 3 * B256::LENGTH);
    preimage.extend_from_slice(CONTRACT_ID_SEED);
    preimage.extend_from_slice(salt.as_ref());
    preimage.extend_from_slice(bytecode.hash256().as_ref());
    preimage.extend_from_slice(state_root(storage_slots).as_ref());
    preimage.hash256()
}

fn state_root(storage_slots: &[StorageSlot]) -> B256 {
    if storage_slots.is_empty() {
        return B256::ZERO;
    }

    let mut sorted = storage_slots.to_vec();
    sorted.sort();

    sorted
        .iter()
        .flat_map(|slot| slot.key.into_array().into_iter().chain(slot.value.into_array()))
        .collect::<Vec<_>>()
        .hash256()
}

// ------------------------------------ tx -------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TxBody {
    /// Deploy a contract.
    Create {
        #[serde(with = "hex::serde")]
        bytecode: Vec<u8>,
        salt: Salt,
        storage_slots: Vec<StorageSlot>,
    },
    /// Execute one or more contract calls, atomically and in order.
    Script { calls: Vec<ContractCall> },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    pub sender: Addr,
    pub body: TxBody,
    pub params: TxParams,
}

impl UnsignedTx {
    /// The transaction ID, which is also the digest the sender signs.
    pub fn id(&self) -> StdResult<TxId> {
        self.to_json_vec().map(|bytes| bytes.hash256())
    }
}

/// A recoverable secp256k1 signature over the transaction ID.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
    pub recovery_id: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub unsigned: UnsignedTx,
    pub witness: Witness,
}

// ---------------------------------- outcome ----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Success,
    Failure { reason: String },
}

/// The result of a transaction that has been included in a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_id: TxId,
    pub block_height: u64,
    pub status: TxStatus,
    /// Return values of the calls, in order. Empty for `Create` transactions.
    #[serde(default)]
    pub returns: Vec<Json>,
    pub gas_used: u64,
}

impl TxOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TxStatus::Success)
    }

    /// Convert a failed outcome into an error.
    pub fn into_result(self) -> StdResult<Self> {
        match self.status {
            TxStatus::Success => Ok(self),
            TxStatus::Failure { reason } => Err(StdError::TransactionFailed {
                tx_id: self.tx_id,
                reason,
            }),
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::contracts::token, serde_json::json};

    #[test]
    fn contract_id_depends_on_every_input() {
        let slot = StorageSlot {
            key: B256::from_u64(1),
            value: B256::mock(7),
        };

        let base = compute_contract_id(b"code", Salt::from_u64(1), &[]);

        assert_ne!(base, compute_contract_id(b"other code", Salt::from_u64(1), &[]));
        assert_ne!(base, compute_contract_id(b"code", Salt::from_u64(2), &[]));
        assert_ne!(base, compute_contract_id(b"code", Salt::from_u64(1), &[slot]));
    }

    #[test]
    fn storage_slot_order_does_not_matter() {
        let a = StorageSlot {
            key: B256::from_u64(1),
            value: B256::mock(7),
        };
        let b = StorageSlot {
            key: B256::from_u64(2),
            value: B256::mock(8),
        };

        assert_eq!(
            compute_contract_id(b"code", Salt::ZERO, &[a, b]),
            compute_contract_id(b"code", Salt::ZERO, &[b, a]),
        );
    }

    #[test]
    fn calls_encode_function_name_and_arguments() {
        let call = ContractCall::new(B256::mock(1), &token::ExecuteMsg::MintCoins {
            mint_amount: 100,
        })
        .unwrap();

        assert_eq!(call.to_json_value().unwrap(), json!({
            "contract": B256::mock(1).to_string(),
            "msg": { "mint_coins": { "mint_amount": 100 } },
        }));
    }

    #[test]
    fn failed_outcome_becomes_error() {
        let outcome = TxOutcome {
            tx_id: B256::mock(9),
            block_height: 3,
            status: TxStatus::Failure {
                reason: "Revert(42)".to_string(),
            },
            returns: vec![],
            gas_used: 10,
        };

        assert!(matches!(
            outcome.into_result(),
            Err(StdError::TransactionFailed { reason, .. }) if reason == "Revert(42)"
        ));
    }
}
