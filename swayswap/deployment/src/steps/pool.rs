use {
    crate::{steps::IdempotentStep, InitError},
    async_trait::async_trait,
    swayswap_client::{ChainClient, ExchangeContract, RouterContract},
    swayswap_types::{
        AssetId, Identity, QueryClientExt, Signer, TxOutcome, TxParams, BASE_ASSET_ID,
    },
};

/// Gas limit of the transaction seeding a pool.
pub const SEED_POOL_GAS_LIMIT: u64 = 100_000_000;

/// Outputs needed to seed a pool: the liquidity tokens, and the change of
/// both assets.
pub const SEED_POOL_VARIABLE_OUTPUTS: u8 = 3;

/// Seed a pool with its initial liquidity, through the router. Done once the
/// pool has issued liquidity tokens.
///
/// The base asset and the token are first forwarded to the router by two
/// calls to `null`, then added to the pool with zero minimums, which is only
/// safe because the pool is empty.
pub struct SeedPool<'a, C> {
    router: RouterContract<'a, C>,
    exchange: ExchangeContract<'a, C>,
    token: AssetId,
    eth_amount: u64,
    token_amount: u64,
    params: TxParams,
}

impl<'a, C> SeedPool<'a, C>
where
    C: ChainClient,
{
    pub fn new(
        router: RouterContract<'a, C>,
        exchange: ExchangeContract<'a, C>,
        token: AssetId,
        eth_amount: u64,
        token_amount: u64,
        params: TxParams,
    ) -> Self {
        Self {
            router,
            exchange,
            token,
            eth_amount,
            token_amount,
            params,
        }
    }

    /// Fail unless the deployer holds enough of both assets to seed the pool.
    pub async fn check_balances(&self) -> anyhow::Result<()> {
        let client = self.router.client();
        let deployer = self.router.wallet().address();

        let eth_balance = client.query_balance(deployer, BASE_ASSET_ID).await?;
        let token_balance = client.query_balance(deployer, self.token).await?;

        tracing::info!(%deployer, eth_balance, token_balance, "Deployer balances");

        for (asset, required, available) in [
            (BASE_ASSET_ID, self.eth_amount, eth_balance),
            (self.token, self.token_amount, token_balance),
        ] {
            if available < required {
                return Err(InitError::InsufficientBalance {
                    asset,
                    required,
                    available,
                }
                .into());
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<'a, C> IdempotentStep for SeedPool<'a, C>
where
    C: ChainClient,
{
    fn describe(&self) -> String {
        format!("seed pool {}", self.exchange.id())
    }

    async fn is_satisfied(&self) -> anyhow::Result<bool> {
        let pool_info = self.exchange.get_pool_info().await?;

        tracing::info!(
            pool = %self.exchange.id(),
            eth_reserve = pool_info.eth_reserve,
            token_reserve = pool_info.token_reserve,
            lp_token_supply = pool_info.lp_token_supply,
            "Pool info"
        );

        Ok(pool_info.lp_token_supply > 0)
    }

    async fn execute(&self) -> anyhow::Result<TxOutcome> {
        self.check_balances().await?;

        let pool = self.exchange.id();
        let recipient = Identity::Address(self.router.wallet().address());

        let outcome = self
            .router
            .multi_call()
            .add_call(self.router.null()?.forward(self.eth_amount, BASE_ASSET_ID))
            .add_call(self.router.null()?.forward(self.token_amount, self.token))
            .add_call(self.router.add_liquidity(
                pool,
                self.eth_amount,
                self.token_amount,
                0,
                0,
                recipient,
            )?)
            .add_contracts([pool])
            .tx_params(
                self.params
                    .with_gas_limit(SEED_POOL_GAS_LIMIT)
                    .with_variable_outputs(SEED_POOL_VARIABLE_OUTPUTS),
            )
            .call()
            .await?;

        let pool_info = self.exchange.get_pool_info().await?;

        tracing::info!(
            %pool,
            eth_reserve = pool_info.eth_reserve,
            token_reserve = pool_info.token_reserve,
            lp_token_supply = pool_info.lp_token_supply,
            "Pool seeded"
        );

        Ok(outcome)
    }
}
