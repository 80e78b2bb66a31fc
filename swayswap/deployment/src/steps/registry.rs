use {
    crate::steps::IdempotentStep,
    async_trait::async_trait,
    swayswap_client::{ChainClient, RegistryContract},
    swayswap_types::{ContractId, TxOutcome, TxParams},
};

/// Initialize the registry with an exchange contract as the template all
/// registered pools must match. Done once the registry has a root.
pub struct InitializeRegistry<'a, C> {
    registry: RegistryContract<'a, C>,
    exchange: ContractId,
    params: TxParams,
}

impl<'a, C> InitializeRegistry<'a, C> {
    pub fn new(registry: RegistryContract<'a, C>, exchange: ContractId, params: TxParams) -> Self {
        Self {
            registry,
            exchange,
            params,
        }
    }
}

#[async_trait]
impl<'a, C> IdempotentStep for InitializeRegistry<'a, C>
where
    C: ChainClient,
{
    fn describe(&self) -> String {
        format!("initialize registry {}", self.registry.id())
    }

    async fn is_satisfied(&self) -> anyhow::Result<bool> {
        let root = self.registry.exchange_contract_root().await?;

        Ok(!root.is_zero())
    }

    async fn execute(&self) -> anyhow::Result<TxOutcome> {
        self.registry
            .initialize(self.exchange)?
            .add_contracts([self.exchange])
            .tx_params(self.params)
            .call()
            .await
    }
}

/// Register an exchange contract as a pool. Done once the registry
/// recognizes it.
pub struct RegisterPool<'a, C> {
    registry: RegistryContract<'a, C>,
    exchange: ContractId,
    params: TxParams,
}

impl<'a, C> RegisterPool<'a, C> {
    pub fn new(registry: RegistryContract<'a, C>, exchange: ContractId, params: TxParams) -> Self {
        Self {
            registry,
            exchange,
            params,
        }
    }
}

#[async_trait]
impl<'a, C> IdempotentStep for RegisterPool<'a, C>
where
    C: ChainClient,
{
    fn describe(&self) -> String {
        format!("register pool {}", self.exchange)
    }

    async fn is_satisfied(&self) -> anyhow::Result<bool> {
        self.registry.is_pool(self.exchange).await
    }

    async fn execute(&self) -> anyhow::Result<TxOutcome> {
        self.registry
            .add_exchange_contract(self.exchange)?
            .add_contracts([self.exchange])
            .tx_params(self.params)
            .call()
            .await
    }
}
