use {
    crate::env_file_name,
    anyhow::Context,
    config::{Config, File},
    serde::Deserialize,
    std::{
        path::{Path, PathBuf},
        time::{SystemTime, UNIX_EPOCH},
    },
    swayswap_types::{Salt, B256},
};

/// Directory the env file consumed by the frontend is written to, relative to
/// the manifest, unless the manifest says otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "./packages/app";

/// Lists the contracts to deploy, in order, and where to write their IDs.
///
/// ```toml
/// output_dir = "./packages/app"
///
/// [[contracts]]
/// name = "VITE_TOKEN_1_ID"
/// path = "./packages/contracts/token_contract"
/// salt = 1
///
/// [[contracts]]
/// name = "VITE_EXCHANGE_1_ID"
/// path = "./packages/contracts/exchange_contract"
/// salt = 1
/// storage_slots = [
///   { key = "0x0000000000000000000000000000000000000000000000000000000000000001", value = { contract = "VITE_TOKEN_1_ID" } },
/// ]
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub contracts: Vec<ContractManifest>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractManifest {
    /// Name of the env variable the contract ID is written to.
    pub name: String,
    /// Directory of the contract's project.
    pub path: PathBuf,
    /// Offset added to the salt base. If absent, the contract is deployed
    /// with a zero salt, so its ID is the same across deployments.
    #[serde(default)]
    pub salt: Option<u64>,
    #[serde(default)]
    pub storage_slots: Vec<StorageSlotManifest>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageSlotManifest {
    pub key: B256,
    pub value: StorageValue,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum StorageValue {
    Literal(B256),
    /// The ID of a contract deployed earlier in the same run.
    Contract { contract: String },
}

impl Manifest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .with_context(|| format!("failed to read manifest `{}`", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("invalid manifest `{}`", path.display()))
    }

    /// Path of the env file to write the contract IDs to. `output_env`
    /// overrides the file name, which otherwise depends on `NODE_ENV`.
    pub fn output_path(&self, root: &Path, node_env: Option<&str>, output_env: Option<&str>) -> PathBuf {
        root.join(&self.output_dir)
            .join(output_env.unwrap_or_else(|| env_file_name(node_env)))
    }
}

impl ContractManifest {
    /// The compiled contract: `<path>/out/debug/<project name>.bin`.
    pub fn bytecode_path(&self, root: &Path) -> PathBuf {
        let project = self.path.file_name().unwrap_or_default();
        let mut file_name = project.to_os_string();
        file_name.push(".bin");

        root.join(&self.path).join("out").join("debug").join(file_name)
    }

    pub fn salt(&self, salt_base: u64) -> Salt {
        match self.salt {
            Some(offset) => B256::from_u64(salt_base.saturating_add(offset)),
            None => Salt::ZERO,
        }
    }
}

/// Salt base that changes every ten seconds, so that redeploying yields new
/// contract IDs.
pub fn default_salt_base() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() / 10)
        .unwrap_or_default()
}

// ----------------------------------- tests -----------------------------------
