use {
    crate::{
        steps::{
            ensure, test_swap, FundDeployer, InitializeRegistry, InitializeToken, RegisterPool,
            SeedPool, StepOutcome,
        },
        InitConfig, PoolConfig,
    },
    swayswap_client::{
        ChainClient, ExchangeContract, RegistryContract, RouterContract, TokenContract, Wallet,
    },
    swayswap_types::{Signer, TxParams},
};

/// What the initialization run did for one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    pub index: usize,
    pub token_initialized: StepOutcome,
    pub deployer_funded: StepOutcome,
    pub pool_seeded: StepOutcome,
    pub registry_initialized: StepOutcome,
    pub pool_registered: StepOutcome,
}

impl PoolReport {
    fn outcomes(&self) -> [&StepOutcome; 5] {
        [
            &self.token_initialized,
            &self.deployer_funded,
            &self.pool_seeded,
            &self.registry_initialized,
            &self.pool_registered,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub pools: Vec<PoolReport>,
}

impl InitReport {
    /// Number of transactions submitted, not counting test swaps.
    pub fn executed_count(&self) -> usize {
        self.pools
            .iter()
            .flat_map(PoolReport::outcomes)
            .filter(|outcome| outcome.is_executed())
            .count()
    }
}

/// Read the configuration from the given variables, connect to the node, and
/// initialize every pool.
///
/// The configuration is validated in full before connecting, so a missing or
/// invalid variable aborts the run before any request is made.
pub async fn init_from_vars<I, C, F>(vars: I, connect: F) -> anyhow::Result<InitReport>
where
    I: IntoIterator<Item = (String, String)>,
    C: ChainClient,
    F: FnOnce(&str) -> anyhow::Result<C>,
{
    let config = InitConfig::from_vars(vars).inspect_err(|err| {
        tracing::error!(%err, "Invalid configuration");
    })?;
    let wallet = config.wallet()?;
    let client = connect(&config.provider_url)?;

    init(&client, &wallet, &config).await
}

/// Initialize every configured pool, one after another: initialize the token,
/// fund the deployer with it, seed the pool, then register the pool.
pub async fn init<C>(client: &C, wallet: &Wallet, config: &InitConfig) -> anyhow::Result<InitReport>
where
    C: ChainClient,
{
    tracing::info!(
        deployer = %wallet.address(),
        router = %config.router,
        registry = %config.registry,
        pools = config.pools.len(),
        "Initializing contracts"
    );

    let params = TxParams::default().with_gas_price(config.gas_price);
    let router = RouterContract::new(config.router, client, wallet);
    let registry = RegistryContract::new(config.registry, client, wallet);

    let mut report = InitReport::default();

    for pool in &config.pools {
        let pool_report = init_pool(client, wallet, config, params, &router, &registry, pool).await?;
        report.pools.push(pool_report);
    }

    tracing::info!(
        transactions = report.executed_count(),
        "Initialization complete"
    );

    Ok(report)
}

async fn init_pool<C>(
    client: &C,
    wallet: &Wallet,
    config: &InitConfig,
    params: TxParams,
    router: &RouterContract<'_, C>,
    registry: &RegistryContract<'_, C>,
    pool: &PoolConfig,
) -> anyhow::Result<PoolReport>
where
    C: ChainClient,
{
    tracing::info!(
        index = pool.index,
        token = %pool.token,
        exchange = %pool.exchange,
        "Initializing pool"
    );

    let token = TokenContract::new(pool.token, client, wallet);
    let exchange = ExchangeContract::new(pool.exchange, client, wallet);

    let token_initialized = ensure(&InitializeToken::new(
        token.clone(),
        config.mint_amount,
        params,
    ))
    .await?;

    let deployer_funded = ensure(&FundDeployer::new(
        token.clone(),
        exchange.clone(),
        config.token_amount,
        params,
    ))
    .await?;

    let pool_seeded = ensure(&SeedPool::new(
        router.clone(),
        exchange.clone(),
        token.asset_id(),
        config.eth_amount,
        config.token_amount,
        params,
    ))
    .await?;

    if config.run_test_swap && pool_seeded.is_executed() {
        tracing::info!(pool = %pool.exchange, "Running test swap");

        match test_swap(router, pool.exchange).await {
            Ok(outcome) => {
                tracing::info!(tx_id = %outcome.tx_id, returns = ?outcome.returns, "Test swap done");
            },
            Err(err) => {
                tracing::warn!(%err, "Test swap failed");
            },
        }
    }

    let registry_initialized = ensure(&InitializeRegistry::new(
        registry.clone(),
        pool.exchange,
        params,
    ))
    .await?;

    let pool_registered = ensure(&RegisterPool::new(registry.clone(), pool.exchange, params)).await?;

    Ok(PoolReport {
        index: pool.index,
        token_initialized,
        deployer_funded,
        pool_seeded,
        registry_initialized,
        pool_registered,
    })
}
