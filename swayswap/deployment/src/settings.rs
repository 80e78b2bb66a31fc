use {
    crate::InitError,
    config::{Config, Environment, Map},
    std::{fmt, str::FromStr},
    swayswap_client::Wallet,
    swayswap_types::{parse_amount, ContractId, B256},
};

pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:4000/v1";

/// Amount of each token minted into the token contract on initialization.
pub const DEFAULT_MINT_AMOUNT: u64 = 2_000_000_000_000;

/// Amount of each token seeded into its pool.
pub const DEFAULT_TOKEN_AMOUNT: u64 = 0x44364C5BB;

/// Amount of the base asset seeded into each pool.
pub const DEFAULT_ETH_AMOUNT: u64 = 0xE8F272;

pub const WALLET_SECRET: &str = "WALLET_SECRET";
pub const PROVIDER_URL: &str = "PROVIDER_URL";
pub const GAS_PRICE: &str = "GAS_PRICE";
pub const ROUTER_CONTRACT_ID: &str = "ROUTER_CONTRACT_ID";
pub const REGISTRY_CONTRACT_ID: &str = "REGISTRY_CONTRACT_ID";
pub const MINT_AMOUNT: &str = "MINT_AMOUNT";
pub const TOKEN_AMOUNT: &str = "TOKEN_AMOUNT";
pub const ETH_AMOUNT: &str = "ETH_AMOUNT";
pub const RUN_TEST_SWAP: &str = "RUN_TEST_SWAP";
pub const NODE_ENV: &str = "NODE_ENV";
pub const OUTPUT_ENV: &str = "OUTPUT_ENV";

/// Variables of the process environment. Those whose name or value isn't
/// valid unicode are ignored.
pub fn process_vars() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Name of the variable holding the token contract ID of the `index`-th pool.
pub fn token_var(index: usize) -> String {
    format!("VITE_TOKEN_{index}_ID")
}

/// Name of the variable holding the exchange contract ID of the `index`-th pool.
pub fn exchange_var(index: usize) -> String {
    format!("VITE_EXCHANGE_{index}_ID")
}

/// A token, and the exchange contract pairing it with the base asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// 1-based, as in the variable names.
    pub index: usize,
    pub token: ContractId,
    pub exchange: ContractId,
}

/// Everything the initialization run needs, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct InitConfig {
    pub wallet_secret: String,
    pub provider_url: String,
    pub gas_price: u64,
    pub router: ContractId,
    pub registry: ContractId,
    /// At least one pool. Processed in order.
    pub pools: Vec<PoolConfig>,
    pub mint_amount: u64,
    pub token_amount: u64,
    pub eth_amount: u64,
    pub run_test_swap: bool,
}

impl fmt::Debug for InitConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InitConfig")
            .field("wallet_secret", &"<redacted>")
            .field("provider_url", &self.provider_url)
            .field("gas_price", &self.gas_price)
            .field("router", &self.router)
            .field("registry", &self.registry)
            .field("pools", &self.pools)
            .field("mint_amount", &self.mint_amount)
            .field("token_amount", &self.token_amount)
            .field("eth_amount", &self.eth_amount)
            .field("run_test_swap", &self.run_test_swap)
            .finish()
    }
}

impl InitConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, InitError> {
        Self::from_vars(process_vars())
    }

    /// Read the configuration from the given variables.
    ///
    /// Every required variable is checked before any value is parsed, so that
    /// the error lists all missing variables at once.
    pub fn from_vars<I>(vars: I) -> Result<Self, InitError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = Vars::new(vars)?;
        let mut missing = Vec::new();

        let wallet_secret = vars.require(WALLET_SECRET, &mut missing);
        let router = vars.require(ROUTER_CONTRACT_ID, &mut missing);
        let registry = vars.require(REGISTRY_CONTRACT_ID, &mut missing);

        let mut pools = vec![(
            1,
            vars.require(&token_var(1), &mut missing),
            vars.require(&exchange_var(1), &mut missing),
        )];

        // Further pools are optional, but each must be configured in full.
        for index in 2.. {
            if vars.get(&token_var(index)).is_none() && vars.get(&exchange_var(index)).is_none() {
                break;
            }

            pools.push((
                index,
                vars.require(&token_var(index), &mut missing),
                vars.require(&exchange_var(index), &mut missing),
            ));
        }

        if !missing.is_empty() {
            return Err(InitError::MissingConfig { missing });
        }

        let pools = pools
            .into_iter()
            .map(|(index, token, exchange)| {
                Ok(PoolConfig {
                    index,
                    token: parse_id(&token_var(index), &token)?,
                    exchange: parse_id(&exchange_var(index), &exchange)?,
                })
            })
            .collect::<Result<Vec<_>, InitError>>()?;

        Ok(Self {
            wallet_secret,
            provider_url: vars
                .get(PROVIDER_URL)
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            gas_price: vars.amount(GAS_PRICE, 0)?,
            router: parse_id(ROUTER_CONTRACT_ID, &router)?,
            registry: parse_id(REGISTRY_CONTRACT_ID, &registry)?,
            pools,
            mint_amount: vars.amount(MINT_AMOUNT, DEFAULT_MINT_AMOUNT)?,
            token_amount: vars.amount(TOKEN_AMOUNT, DEFAULT_TOKEN_AMOUNT)?,
            eth_amount: vars.amount(ETH_AMOUNT, DEFAULT_ETH_AMOUNT)?,
            run_test_swap: vars.flag(RUN_TEST_SWAP)?,
        })
    }

    /// Recover the deployer's wallet from the configured secret.
    pub fn wallet(&self) -> Result<Wallet, InitError> {
        Wallet::from_hex(&self.wallet_secret)
            .map_err(|err| InitError::invalid_config(WALLET_SECRET, err))
    }
}

/// What deploying the contracts needs besides the manifest.
#[derive(Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub wallet_secret: String,
    pub provider_url: String,
    pub gas_price: u64,
    pub node_env: Option<String>,
    /// Name of the env file to write the contract IDs to, overriding the one
    /// chosen from `node_env`.
    pub output_env: Option<String>,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("wallet_secret", &"<redacted>")
            .field("provider_url", &self.provider_url)
            .field("gas_price", &self.gas_price)
            .field("node_env", &self.node_env)
            .field("output_env", &self.output_env)
            .finish()
    }
}

impl DeployConfig {
    pub fn from_env() -> Result<Self, InitError> {
        Self::from_vars(process_vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, InitError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = Vars::new(vars)?;
        let mut missing = Vec::new();

        let wallet_secret = vars.require(WALLET_SECRET, &mut missing);

        if !missing.is_empty() {
            return Err(InitError::MissingConfig { missing });
        }

        Ok(Self {
            wallet_secret,
            provider_url: vars
                .get(PROVIDER_URL)
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            gas_price: vars.amount(GAS_PRICE, 0)?,
            node_env: vars.get(NODE_ENV),
            output_env: vars.get(OUTPUT_ENV),
        })
    }

    pub fn wallet(&self) -> Result<Wallet, InitError> {
        Wallet::from_hex(&self.wallet_secret)
            .map_err(|err| InitError::invalid_config(WALLET_SECRET, err))
    }
}

fn parse_id(name: &str, value: &str) -> Result<ContractId, InitError> {
    let id = B256::from_str(value.trim()).map_err(|err| InitError::invalid_config(name, err))?;

    if id.is_zero() {
        return Err(InitError::invalid_config(name, "contract ID must not be zero"));
    }

    Ok(id)
}

// ----------------------------------- vars ------------------------------------

/// Raw variables, collected through the `config` crate's environment source.
///
/// Names are case-insensitive. Empty values are treated as absent.
struct Vars {
    inner: Config,
}

impl Vars {
    fn new<I>(vars: I) -> Result<Self, InitError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let source = vars
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect::<Map<_, _>>();

        let inner = Config::builder()
            .add_source(Environment::default().source(Some(source)))
            .build()
            .map_err(|err| InitError::invalid_config("environment", err))?;

        Ok(Self { inner })
    }

    fn get(&self, name: &str) -> Option<String> {
        self.inner
            .get_string(&name.to_lowercase())
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Return the variable's value, or record it as missing and return an
    /// empty string.
    fn require(&self, name: &str, missing: &mut Vec<String>) -> String {
        self.get(name).unwrap_or_else(|| {
            missing.push(name.to_string());
            String::new()
        })
    }

    fn amount(&self, name: &str, default: u64) -> Result<u64, InitError> {
        match self.get(name) {
            Some(value) => parse_amount(&value).map_err(|err| InitError::invalid_config(name, err)),
            None => Ok(default),
        }
    }

    fn flag(&self, name: &str) -> Result<bool, InitError> {
        match self.get(name).map(|value| value.to_lowercase()).as_deref() {
            None | Some("0" | "false" | "no") => Ok(false),
            Some("1" | "true" | "yes") => Ok(true),
            Some(other) => Err(InitError::invalid_config(
                name,
                format!("expecting a boolean, got `{other}`"),
            )),
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    const SECRET: &str = "0x8a8b0ab692eb223f6a2927ad56e63c2ae22a8bc9a5bdfeb1d8127819ddcce177";

    fn id(index: u8) -> String {
        B256::mock(index).to_string()
    }

    fn required_vars() -> Vec<(String, String)> {
        vec![
            (WALLET_SECRET.to_string(), SECRET.to_string()),
            (ROUTER_CONTRACT_ID.to_string(), id(1)),
            (REGISTRY_CONTRACT_ID.to_string(), id(2)),
            (token_var(1), id(3)),
            (exchange_var(1), id(4)),
        ]
    }

    fn without(names: &[&str]) -> Vec<(String, String)> {
        required_vars()
            .into_iter()
            .filter(|(name, _)| !names.contains(&name.as_str()))
            .collect()
    }

    #[test]
    fn reading_defaults() {
        let config = InitConfig::from_vars(required_vars()).unwrap();

        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.gas_price, 0);
        assert_eq!(config.router, B256::mock(1));
        assert_eq!(config.registry, B256::mock(2));
        assert_eq!(config.pools, vec![PoolConfig {
            index: 1,
            token: B256::mock(3),
            exchange: B256::mock(4),
        }]);
        assert_eq!(config.mint_amount, 2_000_000_000_000);
        assert_eq!(config.token_amount, 18_310_546_875);
        assert_eq!(config.eth_amount, 15_266_418);
        assert!(!config.run_test_swap);
        assert!(config.wallet().is_ok());
    }

    #[test_case(&[WALLET_SECRET]; "no wallet secret")]
    #[test_case(&[ROUTER_CONTRACT_ID, REGISTRY_CONTRACT_ID]; "no router nor registry")]
    #[test_case(&["VITE_TOKEN_1_ID"]; "no token")]
    #[test_case(&[WALLET_SECRET, ROUTER_CONTRACT_ID, REGISTRY_CONTRACT_ID, "VITE_TOKEN_1_ID", "VITE_EXCHANGE_1_ID"]; "nothing")]
    fn listing_every_missing_variable(names: &[&str]) {
        assert_eq!(
            InitConfig::from_vars(without(names)),
            Err(InitError::MissingConfig {
                missing: names.iter().map(|name| name.to_string()).collect(),
            })
        );
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut vars = without(&[WALLET_SECRET]);
        vars.push((WALLET_SECRET.to_string(), "  ".to_string()));

        assert_eq!(
            InitConfig::from_vars(vars),
            Err(InitError::MissingConfig {
                missing: vec![WALLET_SECRET.to_string()],
            })
        );
    }

    #[test]
    fn discovering_further_pools() {
        let mut vars = required_vars();
        vars.push((token_var(2), id(5)));
        vars.push((exchange_var(2), id(6)));
        // Pool 4 is ignored, as pool 3 isn't configured.
        vars.push((token_var(4), id(7)));
        vars.push((exchange_var(4), id(8)));

        let config = InitConfig::from_vars(vars).unwrap();

        assert_eq!(
            config.pools.iter().map(|pool| pool.index).collect::<Vec<_>>(),
            [1, 2]
        );
        assert_eq!(config.pools[1].token, B256::mock(5));
        assert_eq!(config.pools[1].exchange, B256::mock(6));
    }

    #[test]
    fn half_configured_pool_is_missing_its_other_half() {
        let mut vars = required_vars();
        vars.push((token_var(2), id(5)));

        assert_eq!(
            InitConfig::from_vars(vars),
            Err(InitError::MissingConfig {
                missing: vec![exchange_var(2)],
            })
        );
    }

    #[test_case(MINT_AMOUNT, "1000", 1000; "decimal mint amount")]
    #[test_case(TOKEN_AMOUNT, "0x10", 16; "hex token amount")]
    #[test_case(ETH_AMOUNT, "0XFF", 255; "upper case hex prefix")]
    #[test_case(GAS_PRICE, "1", 1; "gas price")]
    fn parsing_amounts(name: &str, value: &str, expected: u64) {
        let mut vars = required_vars();
        vars.push((name.to_string(), value.to_string()));

        let config = InitConfig::from_vars(vars).unwrap();

        let actual = match name {
            MINT_AMOUNT => config.mint_amount,
            TOKEN_AMOUNT => config.token_amount,
            ETH_AMOUNT => config.eth_amount,
            _ => config.gas_price,
        };
        assert_eq!(actual, expected);
    }

    #[test_case(TOKEN_AMOUNT, "lots"; "invalid amount")]
    #[test_case(ROUTER_CONTRACT_ID, "0x1234"; "short contract id")]
    #[test_case(REGISTRY_CONTRACT_ID, "0x0000000000000000000000000000000000000000000000000000000000000000"; "zero contract id")]
    #[test_case(RUN_TEST_SWAP, "maybe"; "invalid flag")]
    fn rejecting_invalid_values(name: &str, value: &str) {
        let mut vars = without(&[name]);
        vars.push((name.to_string(), value.to_string()));

        assert!(matches!(
            InitConfig::from_vars(vars),
            Err(InitError::InvalidConfig { name: actual, .. }) if actual == name
        ));
    }

    #[test]
    fn rejecting_invalid_wallet_secret() {
        let mut vars = without(&[WALLET_SECRET]);
        vars.push((WALLET_SECRET.to_string(), "0xdeadbeef".to_string()));

        let config = InitConfig::from_vars(vars).unwrap();

        assert!(matches!(
            config.wallet(),
            Err(InitError::InvalidConfig { name, .. }) if name == WALLET_SECRET
        ));
    }

    #[test]
    fn reading_deploy_config() {
        let config = DeployConfig::from_vars([
            (WALLET_SECRET.to_string(), SECRET.to_string()),
            (GAS_PRICE.to_string(), "0x2".to_string()),
            (NODE_ENV.to_string(), "test".to_string()),
        ])
        .unwrap();

        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.gas_price, 2);
        assert_eq!(config.node_env.as_deref(), Some("test"));
        assert_eq!(config.output_env, None);
        assert!(config.wallet().is_ok());

        assert_eq!(
            DeployConfig::from_vars([(OUTPUT_ENV.to_string(), ".env.local".to_string())]),
            Err(InitError::MissingConfig {
                missing: vec![WALLET_SECRET.to_string()],
            })
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = InitConfig::from_vars(required_vars()).unwrap();

        assert!(!format!("{config:?}").contains(&SECRET[2..]));
    }
}
