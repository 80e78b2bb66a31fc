use {
    crate::{ChainClient, Wallet},
    serde::{de::DeserializeOwned, Serialize},
    swayswap_types::{
        AssetId, BroadcastClientExt, ContractCall, ContractId, Forward, QueryClientExt, TxOutcome,
        TxParams,
    },
};

/// A deployed contract, bound to a client for reading its state, and to a
/// wallet for signing calls to it.
pub struct ContractHandle<'a, C> {
    id: ContractId,
    client: &'a C,
    wallet: &'a Wallet,
}

// Implemented manually, as deriving would require `C: Clone`.
impl<C> Clone for ContractHandle<'_, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            client: self.client,
            wallet: self.wallet,
        }
    }
}

impl<'a, C> ContractHandle<'a, C>
where
    C: ChainClient,
{
    pub fn new(id: ContractId, client: &'a C, wallet: &'a Wallet) -> Self {
        Self { id, client, wallet }
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    pub fn client(&self) -> &'a C {
        self.client
    }

    pub fn wallet(&self) -> &'a Wallet {
        self.wallet
    }

    /// Dry-run one of the contract's read-only functions.
    pub async fn query<M, R>(&self, msg: &M) -> anyhow::Result<R>
    where
        M: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.client.query_contract_smart(self.id, msg).await
    }

    /// Prepare a call to one of the contract's functions.
    pub fn call<M>(&self, msg: &M) -> anyhow::Result<CallHandler<'a, C>>
    where
        M: Serialize,
    {
        Ok(CallHandler {
            client: self.client,
            wallet: self.wallet,
            call: ContractCall::new(self.id, msg)?,
            params: TxParams::default(),
        })
    }

    /// Prepare a transaction making several calls in order, signed by this
    /// handle's wallet.
    pub fn multi_call(&self) -> MultiCallHandler<'a, C> {
        MultiCallHandler {
            client: self.client,
            wallet: self.wallet,
            calls: vec![],
            params: TxParams::default(),
        }
    }
}

// ----------------------------------- calls -----------------------------------

/// A single contract call, submitted in its own transaction by [`call`](Self::call),
/// or as part of a [`MultiCallHandler`].
pub struct CallHandler<'a, C> {
    client: &'a C,
    wallet: &'a Wallet,
    call: ContractCall,
    params: TxParams,
}

impl<C> CallHandler<'_, C>
where
    C: ChainClient,
{
    /// Send assets from the wallet to the contract along with the call.
    pub fn forward(mut self, amount: u64, asset_id: AssetId) -> Self {
        self.call.forward = Some(Forward { amount, asset_id });
        self
    }

    /// Limit the gas the call itself may consume.
    pub fn call_gas_limit(mut self, gas_limit: u64) -> Self {
        self.call.gas_limit = Some(gas_limit);
        self
    }

    /// Declare other contracts the call reads from or calls into.
    pub fn add_contracts<I>(mut self, contracts: I) -> Self
    where
        I: IntoIterator<Item = ContractId>,
    {
        self.call.external_contracts.extend(contracts);
        self
    }

    /// Set the parameters of the transaction, if the call is submitted on its
    /// own. Ignored when the call is part of a multi-call.
    pub fn tx_params(mut self, params: TxParams) -> Self {
        self.params = params;
        self
    }

    pub fn into_call(self) -> ContractCall {
        self.call
    }

    /// Submit the call in a transaction, and wait for it to be included.
    pub async fn call(self) -> anyhow::Result<TxOutcome> {
        self.client
            .execute_calls(self.wallet, vec![self.call], self.params)
            .await
    }
}

pub struct MultiCallHandler<'a, C> {
    client: &'a C,
    wallet: &'a Wallet,
    calls: Vec<ContractCall>,
    params: TxParams,
}

impl<'a, C> MultiCallHandler<'a, C>
where
    C: ChainClient,
{
    pub fn add_call(mut self, call: CallHandler<'a, C>) -> Self {
        self.calls.push(call.into_call());
        self
    }

    pub fn tx_params(mut self, params: TxParams) -> Self {
        self.params = params;
        self
    }

    /// Declare other contracts the calls read from or call into. Applied to
    /// the last call added so far.
    pub fn add_contracts<I>(mut self, contracts: I) -> Self
    where
        I: IntoIterator<Item = ContractId>,
    {
        if let Some(last) = self.calls.last_mut() {
            last.external_contracts.extend(contracts);
        }
        self
    }

    /// Submit all calls in a single transaction, and wait for it to be
    /// included. Either all calls succeed, or none takes effect.
    pub async fn call(self) -> anyhow::Result<TxOutcome> {
        anyhow::ensure!(!self.calls.is_empty(), "multi-call contains no calls");

        self.client
            .execute_calls(self.wallet, self.calls, self.params)
            .await
    }
}
