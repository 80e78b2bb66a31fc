use {
    clap::Parser,
    std::path::{Path, PathBuf},
    swayswap_client::HttpClient,
    swayswap_deployment::{
        default_salt_base, deploy_contracts, replace_event_on_env, DeployConfig, DeployOptions,
        Manifest,
    },
};

#[derive(Parser)]
pub struct DeployCmd {
    /// Manifest listing the contracts to deploy
    #[arg(long, default_value = "swayswap.toml")]
    manifest: PathBuf,

    /// Salt base added to the salt offset of each salted contract [default: current unix time / 10]
    #[arg(long)]
    salt_base: Option<u64>,
}

impl DeployCmd {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = DeployConfig::from_env()?;
        let manifest = Manifest::load(&self.manifest)?;

        // Paths in the manifest are relative to its directory.
        let root = self
            .manifest
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let client = HttpClient::new(&config.provider_url)?;
        let wallet = config.wallet()?;

        let options = DeployOptions {
            salt_base: self.salt_base.unwrap_or_else(default_salt_base),
            gas_price: config.gas_price,
        };

        tracing::info!(
            manifest = %self.manifest.display(),
            contracts = manifest.contracts.len(),
            salt_base = options.salt_base,
            "Deploying contracts"
        );

        let event = deploy_contracts(&client, &wallet, &manifest, root, options).await?;

        let output = manifest.output_path(
            root,
            config.node_env.as_deref(),
            config.output_env.as_deref(),
        );
        replace_event_on_env(&output, &event)?;

        Ok(())
    }
}
