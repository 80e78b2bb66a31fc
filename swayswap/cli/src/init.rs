use {
    clap::Parser,
    swayswap_client::HttpClient,
    swayswap_deployment::{init_from_vars, process_vars, RUN_TEST_SWAP},
};

#[derive(Parser)]
pub struct InitCmd {
    /// Swap a small amount in each freshly seeded pool, as a smoke test [env: RUN_TEST_SWAP]
    #[arg(long)]
    test_swap: bool,
}

impl InitCmd {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut vars = process_vars();

        if self.test_swap {
            vars.push((RUN_TEST_SWAP.to_string(), "true".to_string()));
        }

        let report = init_from_vars(vars, HttpClient::new).await?;

        for pool in &report.pools {
            tracing::info!(
                index = pool.index,
                token_initialized = pool.token_initialized.is_executed(),
                deployer_funded = pool.deployer_funded.is_executed(),
                pool_seeded = pool.pool_seeded.is_executed(),
                registry_initialized = pool.registry_initialized.is_executed(),
                pool_registered = pool.pool_registered.is_executed(),
                "Pool ready"
            );
        }

        Ok(())
    }
}
