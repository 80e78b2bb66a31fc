//! An in-memory chain implementing the client traits, for testing code that
//! talks to a node without running one.

mod contracts;

pub use contracts::{ExchangeState, MockContract, RegistryState, TokenState};

use {
    crate::recover_address,
    anyhow::bail,
    async_trait::async_trait,
    contracts::{MockState, TxContext},
    std::sync::{Mutex, MutexGuard},
    swayswap_types::{
        compute_contract_id, contracts::exchange::PoolInfo, Addr, AssetId, BroadcastClient,
        ContractId, Identity, Json, Query, QueryClient, QueryResponse, Tx, TxBody, TxOutcome,
        TxStatus,
    },
};

/// Gas charged per transaction by the mock chain. Gas prices are accepted but
/// no fee is deducted.
const MOCK_GAS_USED: u64 = 1_000;

/// A transaction the mock chain has processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTx {
    pub sender: Addr,
    /// For each call of a script transaction: the contract called and the name
    /// of the function. Empty for `Create` transactions.
    pub calls: Vec<(ContractId, String)>,
    /// For `Create` transactions: the ID of the deployed contract.
    pub created: Option<ContractId>,
    pub variable_outputs: u8,
    pub status: TxStatus,
}

#[derive(Default)]
struct Inner {
    state: MockState,
    height: u64,
    txs: Vec<RecordedTx>,
    requests: usize,
}

/// An in-memory chain emulating the SwaySwap contracts.
///
/// Script transactions are atomic: if any call fails, the chain state is
/// reverted, and the transaction is recorded with a failure status.
#[derive(Default)]
pub struct MockChain {
    inner: Mutex<Inner>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock means a test already panicked.
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn insert_contract(&self, id: ContractId, contract: MockContract) -> &Self {
        self.lock().state.contracts.insert(id, contract);
        self
    }

    /// Deploy an uninitialized token contract.
    pub fn add_token(&self, id: ContractId) -> &Self {
        self.insert_contract(id, MockContract::Token(TokenState::default()))
    }

    /// Deploy an empty exchange contract pairing the base asset with `token`.
    pub fn add_exchange(&self, id: ContractId, token: AssetId) -> &Self {
        self.insert_contract(
            id,
            MockContract::Exchange(ExchangeState {
                token,
                pool: PoolInfo::default(),
            }),
        )
    }

    pub fn add_router(&self, id: ContractId) -> &Self {
        self.insert_contract(id, MockContract::Router)
    }

    /// Deploy an uninitialized registry contract.
    pub fn add_registry(&self, id: ContractId) -> &Self {
        self.insert_contract(id, MockContract::Registry(RegistryState::default()))
    }

    /// Credit a wallet with some amount of an asset.
    pub fn fund(&self, owner: Addr, asset_id: AssetId, amount: u64) -> &Self {
        let mut inner = self.lock();
        let balance = inner
            .state
            .balances
            .entry((Identity::Address(owner), asset_id))
            .or_default();
        *balance = balance.saturating_add(amount);
        self
    }

    /// Replace the reserves of an existing exchange contract.
    pub fn set_pool_info(&self, id: ContractId, pool: PoolInfo) -> &Self {
        if let Some(MockContract::Exchange(exchange)) = self.lock().state.contracts.get_mut(&id) {
            exchange.pool = pool;
        }
        self
    }

    pub fn contract(&self, id: ContractId) -> Option<MockContract> {
        self.lock().state.contracts.get(&id).cloned()
    }

    pub fn pool_info(&self, id: ContractId) -> Option<PoolInfo> {
        match self.contract(id)? {
            MockContract::Exchange(exchange) => Some(exchange.pool),
            _ => None,
        }
    }

    pub fn balance(&self, owner: Identity, asset_id: AssetId) -> u64 {
        self.lock().state.balance(owner, asset_id)
    }

    /// All transactions processed so far, in order.
    pub fn transactions(&self) -> Vec<RecordedTx> {
        self.lock().txs.clone()
    }

    /// Names of the functions called by all transactions processed so far,
    /// in order, including those of failed transactions.
    pub fn called_functions(&self) -> Vec<String> {
        self.lock()
            .txs
            .iter()
            .flat_map(|tx| tx.calls.iter().map(|(_, name)| name.clone()))
            .collect()
    }

    /// Number of queries and transactions received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }
}

#[async_trait]
impl QueryClient for MockChain {
    type Error = anyhow::Error;

    async fn query_chain(&self, query: Query) -> anyhow::Result<QueryResponse> {
        let mut inner = self.lock();
        inner.requests += 1;

        let response = match query {
            Query::Balance(req) => QueryResponse::Balance(
                inner
                    .state
                    .balance(Identity::Address(req.owner), req.asset_id),
            ),
            Query::BlockHeight(_) => QueryResponse::BlockHeight(inner.height),
            Query::Contract(req) => {
                QueryResponse::Contract(inner.state.contracts.contains_key(&req.contract))
            },
            Query::ContractSmart(req) => match inner.state.query(req.contract, req.msg) {
                Ok(json) => QueryResponse::ContractSmart(json),
                Err(reason) => bail!("query failed: {reason}"),
            },
        };

        Ok(response)
    }
}

#[async_trait]
impl BroadcastClient for MockChain {
    type Error = anyhow::Error;

    async fn submit_and_await(&self, tx: Tx) -> anyhow::Result<TxOutcome> {
        let tx_id = tx.unsigned.id()?;
        let signer = recover_address(tx_id, &tx.witness)?;
        if signer != tx.unsigned.sender {
            bail!(
                "invalid signature: tx is sent from {} but signed by {signer}",
                tx.unsigned.sender
            );
        }

        let mut inner = self.lock();
        inner.requests += 1;
        inner.height += 1;

        let params = tx.unsigned.params;
        let mut record = RecordedTx {
            sender: tx.unsigned.sender,
            calls: vec![],
            created: None,
            variable_outputs: params.variable_outputs,
            status: TxStatus::Success,
        };

        let mut state = inner.state.clone();
        let result = match tx.unsigned.body {
            TxBody::Create {
                bytecode,
                salt,
                storage_slots,
            } => {
                let id = compute_contract_id(&bytecode, salt, &storage_slots);
                record.created = Some(id);
                if state.contracts.contains_key(&id) {
                    Err(format!("ContractIdAlreadyDeployed: {id}"))
                } else {
                    state.contracts.insert(id, MockContract::Opaque);
                    Ok(vec![])
                }
            },
            TxBody::Script { calls } => {
                let mut ctx = TxContext {
                    sender: tx.unsigned.sender,
                    variable_outputs: params.variable_outputs,
                    variable_outputs_used: 0,
                };
                record.calls = calls
                    .iter()
                    .map(|call| (call.contract, function_name(&call.msg)))
                    .collect();
                calls
                    .iter()
                    .map(|call| state.execute(&mut ctx, call))
                    .collect::<Result<Vec<_>, _>>()
            },
        };

        let returns = match result {
            Ok(returns) => {
                inner.state = state;
                returns
            },
            Err(reason) => {
                record.status = TxStatus::Failure { reason };
                vec![]
            },
        };

        let outcome = TxOutcome {
            tx_id,
            block_height: inner.height,
            status: record.status.clone(),
            returns,
            gas_used: MOCK_GAS_USED,
        };

        inner.txs.push(record);

        Ok(outcome)
    }
}

/// The function name of a contract message, i.e. the key of its single-entry
/// JSON object.
fn function_name(msg: &Json) -> String {
    msg.as_object()
        .and_then(|map| map.keys().next().cloned())
        .unwrap_or_default()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{ExchangeContract, RegistryContract, RouterContract, TokenContract, Wallet},
        swayswap_types::{
            contracts::token, BroadcastClientExt, ContractCall, QueryClientExt, Signer,
            StorageSlot, TxParams, B256, BASE_ASSET_ID,
        },
    };

    const TOKEN: ContractId = B256::mock(1);
    const EXCHANGE: ContractId = B256::mock(2);
    const ROUTER: ContractId = B256::mock(3);
    const REGISTRY: ContractId = B256::mock(4);

    fn setup() -> (MockChain, Wallet) {
        let chain = MockChain::new();
        let wallet = Wallet::new_random();
        chain
            .add_token(TOKEN)
            .add_exchange(EXCHANGE, TOKEN)
            .add_router(ROUTER)
            .add_registry(REGISTRY)
            .fund(wallet.address(), BASE_ASSET_ID, 1_000_000);
        (chain, wallet)
    }

    #[tokio::test]
    async fn initializing_token_mints_to_contract() {
        let (chain, wallet) = setup();
        let token = TokenContract::new(TOKEN, &chain, &wallet);

        token
            .initialize(500, wallet.address())
            .unwrap()
            .call()
            .await
            .unwrap();

        assert_eq!(token.get_owner().await.unwrap(), wallet.address());
        assert_eq!(token.get_balance().await.unwrap(), 500);

        // Initializing twice reverts.
        let err = token
            .initialize(500, wallet.address())
            .unwrap()
            .call()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AlreadyInitialized"));
        assert_eq!(chain.transactions()[1].status, TxStatus::Failure {
            reason: "AlreadyInitialized".to_string()
        });
    }

    #[tokio::test]
    async fn transfers_need_variable_outputs() {
        let (chain, wallet) = setup();
        let token = TokenContract::new(TOKEN, &chain, &wallet);
        token
            .initialize(500, wallet.address())
            .unwrap()
            .call()
            .await
            .unwrap();

        assert!(token
            .transfer_token_to_output(100, TOKEN, wallet.address())
            .unwrap()
            .call()
            .await
            .is_err());

        token
            .transfer_token_to_output(100, TOKEN, wallet.address())
            .unwrap()
            .tx_params(TxParams::default().with_variable_outputs(1))
            .call()
            .await
            .unwrap();

        assert_eq!(chain.balance(Identity::Address(wallet.address()), TOKEN), 100);
        assert_eq!(chain.balance(Identity::ContractId(TOKEN), TOKEN), 400);
    }

    #[tokio::test]
    async fn failed_multi_call_reverts_every_call() {
        let (chain, wallet) = setup();
        let router = RouterContract::new(ROUTER, &chain, &wallet);

        // The pool isn't declared as an input, so adding liquidity fails after
        // the base asset has been forwarded.
        let err = router
            .multi_call()
            .add_call(router.null().unwrap().forward(1_000, BASE_ASSET_ID))
            .add_call(
                router
                    .add_liquidity(
                        EXCHANGE,
                        1_000,
                        1_000,
                        0,
                        0,
                        Identity::Address(wallet.address()),
                    )
                    .unwrap(),
            )
            .tx_params(TxParams::default().with_variable_outputs(3))
            .call()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("ContractNotInInputs"));
        assert_eq!(
            chain.balance(Identity::Address(wallet.address()), BASE_ASSET_ID),
            1_000_000
        );
        assert_eq!(chain.called_functions(), ["null", "add_liquidity"]);
    }

    #[tokio::test]
    async fn adding_liquidity_and_swapping() {
        let (chain, wallet) = setup();
        chain.fund(wallet.address(), TOKEN, 4_000);
        let router = RouterContract::new(ROUTER, &chain, &wallet);
        let recipient = Identity::Address(wallet.address());

        router
            .multi_call()
            .add_call(router.null().unwrap().forward(1_000, BASE_ASSET_ID))
            .add_call(router.null().unwrap().forward(4_000, TOKEN))
            .add_call(
                router
                    .add_liquidity(EXCHANGE, 1_000, 4_000, 0, 0, recipient)
                    .unwrap(),
            )
            .add_contracts([EXCHANGE])
            .tx_params(TxParams::default().with_variable_outputs(3))
            .call()
            .await
            .unwrap();

        let exchange = ExchangeContract::new(EXCHANGE, &chain, &wallet);
        assert_eq!(exchange.get_pool_info().await.unwrap(), PoolInfo {
            eth_reserve: 1_000,
            token_reserve: 4_000,
            lp_token_supply: 2_000,
        });
        assert_eq!(chain.balance(recipient, EXCHANGE), 2_000);

        let outcome = router
            .swap_exact_input(EXCHANGE, 0, recipient)
            .unwrap()
            .forward(10, BASE_ASSET_ID)
            .add_contracts([EXCHANGE])
            .tx_params(TxParams::default().with_variable_outputs(2))
            .call()
            .await
            .unwrap();

        // 10 * 997 * 4000 / (1000 * 1000 + 10 * 997) = 39
        assert_eq!(outcome.returns, vec![serde_json::json!(39)]);
        assert_eq!(chain.balance(recipient, TOKEN), 39);
    }

    #[tokio::test]
    async fn registering_pools() {
        let (chain, wallet) = setup();
        let registry = RegistryContract::new(REGISTRY, &chain, &wallet);

        // Registering before initializing fails.
        assert!(registry
            .add_exchange_contract(EXCHANGE)
            .unwrap()
            .call()
            .await
            .is_err());

        registry
            .initialize(EXCHANGE)
            .unwrap()
            .add_contracts([EXCHANGE])
            .call()
            .await
            .unwrap();
        registry
            .add_exchange_contract(EXCHANGE)
            .unwrap()
            .add_contracts([EXCHANGE])
            .call()
            .await
            .unwrap();

        assert_eq!(registry.exchange_contract_root().await.unwrap(), EXCHANGE);
        assert!(registry.is_pool(EXCHANGE).await.unwrap());

        let err = registry
            .add_exchange_contract(EXCHANGE)
            .unwrap()
            .add_contracts([EXCHANGE])
            .call()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AlreadyRegistered"));
    }

    #[tokio::test]
    async fn creating_contracts() {
        let chain = MockChain::new();
        let wallet = Wallet::new_random();
        let slots = vec![StorageSlot {
            key: B256::from_u64(1),
            value: TOKEN,
        }];

        let (id, _) = chain
            .create_contract(&wallet, b"code".to_vec(), B256::ZERO, slots.clone(), TxParams::default())
            .await
            .unwrap();

        assert_eq!(id, compute_contract_id(b"code", B256::ZERO, &slots));
        assert!(chain.query_contract_exists(id).await.unwrap());

        // Deploying the same contract again fails.
        assert!(chain
            .create_contract(&wallet, b"code".to_vec(), B256::ZERO, slots, TxParams::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn rejecting_forged_signature() {
        let (chain, wallet) = setup();
        let mut tx = wallet
            .sign_body(TxBody::Script { calls: vec![] }, TxParams::default())
            .unwrap();
        tx.unsigned.sender = B256::mock(99);

        assert!(chain.submit_and_await(tx).await.is_err());
        assert!(chain.transactions().is_empty());
    }

    #[tokio::test]
    async fn only_owner_can_mint_coins() {
        let (chain, owner) = setup();
        let stranger = Wallet::new_random();

        TokenContract::new(TOKEN, &chain, &owner)
            .initialize(500, owner.address())
            .unwrap()
            .call()
            .await
            .unwrap();

        let err = chain
            .execute_calls(
                &stranger,
                vec![ContractCall::new(TOKEN, &token::ExecuteMsg::MintCoins {
                    mint_amount: 1,
                })
                .unwrap()],
                TxParams::default(),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("NotOwner"));
    }
}
