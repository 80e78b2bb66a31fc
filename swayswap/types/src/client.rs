use {
    crate::{
        compute_contract_id, Addr, AssetId, ContractCall, ContractId, JsonDeExt, Query,
        QueryResponse, Salt, Signer, StdError, StorageSlot, Tx, TxBody, TxOutcome, TxParams,
    },
    async_trait::async_trait,
    serde::{de::DeserializeOwned, Serialize},
};

// ---------------------------------- traits -----------------------------------

#[async_trait]
pub trait QueryClient {
    type Error;

    async fn query_chain(&self, query: Query) -> Result<QueryResponse, Self::Error>;
}

#[async_trait]
pub trait BroadcastClient {
    type Error;

    /// Submit a signed transaction, and wait until it's included in a block.
    async fn submit_and_await(&self, tx: Tx) -> Result<TxOutcome, Self::Error>;
}

// ----------------------------- extension traits ------------------------------

#[async_trait]
pub trait QueryClientExt: QueryClient
where
    Self::Error: From<StdError>,
{
    async fn query_balance(&self, owner: Addr, asset_id: AssetId) -> Result<u64, Self::Error> {
        self.query_chain(Query::balance(owner, asset_id))
            .await
            .and_then(|res| res.as_balance().map_err(Into::into))
    }

    async fn query_block_height(&self) -> Result<u64, Self::Error> {
        self.query_chain(Query::block_height())
            .await
            .and_then(|res| res.as_block_height().map_err(Into::into))
    }

    async fn query_contract_exists(&self, contract: ContractId) -> Result<bool, Self::Error> {
        self.query_chain(Query::contract(contract))
            .await
            .and_then(|res| res.as_contract().map_err(Into::into))
    }

    async fn query_contract_smart<M, R>(
        &self,
        contract: ContractId,
        msg: &M,
    ) -> Result<R, Self::Error>
    where
        M: Serialize + Sync,
        R: DeserializeOwned,
    {
        let query = Query::contract_smart(contract, msg)?;
        self.query_chain(query).await.and_then(|res| {
            res.as_contract_smart()
                .and_then(|json| json.deserialize_json())
                .map_err(Into::into)
        })
    }
}

impl<C> QueryClientExt for C
where
    C: QueryClient + Send + Sync,
    C::Error: From<StdError>,
{
}

#[async_trait]
pub trait BroadcastClientExt: BroadcastClient
where
    Self::Error: From<StdError>,
{
    /// Sign and submit a transaction executing the given calls in order, and
    /// wait for it to be included. A transaction that reverts is an error.
    async fn execute_calls<S>(
        &self,
        signer: &S,
        calls: Vec<ContractCall>,
        params: TxParams,
    ) -> Result<TxOutcome, Self::Error>
    where
        S: Signer + Sync,
    {
        let tx = signer.sign_body(TxBody::Script { calls }, params)?;
        let outcome = self.submit_and_await(tx).await?;
        outcome.into_result().map_err(Into::into)
    }

    /// Sign and submit a transaction deploying a contract, and wait for it to
    /// be included.
    ///
    /// Return the deployed contract's ID.
    async fn create_contract<S>(
        &self,
        signer: &S,
        bytecode: Vec<u8>,
        salt: Salt,
        storage_slots: Vec<StorageSlot>,
        params: TxParams,
    ) -> Result<(ContractId, TxOutcome), Self::Error>
    where
        S: Signer + Sync,
    {
        let contract_id = compute_contract_id(&bytecode, salt, &storage_slots);
        let tx = signer.sign_body(
            TxBody::Create {
                bytecode,
                salt,
                storage_slots,
            },
            params,
        )?;
        let outcome = self.submit_and_await(tx).await?.into_result()?;

        Ok((contract_id, outcome))
    }
}

impl<C> BroadcastClientExt for C
where
    C: BroadcastClient + Send + Sync,
    C::Error: From<StdError>,
{
}
