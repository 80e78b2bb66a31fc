use {
    crate::DeployEvent,
    anyhow::Context,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Directory holding the env files shared with the local node setup.
pub const DOCKER_ENV_DIR: &str = "./docker";

/// Name of the env file to use: `.env.test` when `NODE_ENV` is `test`,
/// `.env` otherwise.
pub fn env_file_name(node_env: Option<&str>) -> &'static str {
    if node_env == Some("test") {
        ".env.test"
    } else {
        ".env"
    }
}

/// The env file to load variables from, unless one is given explicitly:
/// `./docker/.env`, or `./docker/.env.test` when `NODE_ENV` is `test`.
pub fn default_env_file(node_env: Option<&str>) -> PathBuf {
    Path::new(DOCKER_ENV_DIR).join(env_file_name(node_env))
}

/// Load variables from an env file into the process environment. Variables
/// already set in the process take precedence.
///
/// Returns `false` if the file doesn't exist.
pub fn load_env_file(path: &Path) -> anyhow::Result<bool> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Env file not found, skipping");
        return Ok(false);
    }

    dotenvy::from_path(path)
        .with_context(|| format!("failed to load env file `{}`", path.display()))?;

    tracing::info!(path = %path.display(), "Loaded env file");

    Ok(true)
}

/// Write the ID of every contract in the deploy event into an env file, as
/// `NAME=0x...` lines.
///
/// The first line setting a variable of the same name is replaced; otherwise
/// the line is appended. Every other line is kept as is. The file is created
/// if it doesn't exist.
pub fn replace_event_on_env(path: &Path, event: &DeployEvent) -> anyhow::Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read `{}`", path.display()));
        },
    };

    let mut lines = existing.lines().map(str::to_string).collect::<Vec<_>>();

    for contract in &event.contracts {
        let line = format!("{}={}", contract.name, contract.contract_id);

        match lines.iter_mut().find(|current| sets_var(current, &contract.name)) {
            Some(current) => *current = line,
            None => lines.push(line),
        }
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory `{}`", parent.display()))?;
    }

    let mut content = lines.join("\n");
    content.push('\n');

    fs::write(path, content).with_context(|| format!("failed to write `{}`", path.display()))?;

    tracing::info!(
        path = %path.display(),
        count = event.contracts.len(),
        "Wrote contract IDs to env file"
    );

    Ok(())
}

/// Whether the line assigns a value to the variable, e.g. `NAME=...` or
/// `export NAME = ...`.
fn sets_var(line: &str, name: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line);

    line.split_once('=')
        .is_some_and(|(key, _)| key.trim() == name)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::DeployedContract, swayswap_types::B256, test_case::test_case};

    fn event(contracts: &[(&str, u8)]) -> DeployEvent {
        DeployEvent {
            contracts: contracts
                .iter()
                .map(|(name, index)| DeployedContract {
                    name: name.to_string(),
                    contract_id: B256::mock(*index),
                })
                .collect(),
        }
    }

    #[test_case(None => ".env"; "unset")]
    #[test_case(Some("development") => ".env"; "development")]
    #[test_case(Some("test") => ".env.test"; "test")]
    fn choosing_env_file(node_env: Option<&str>) -> &'static str {
        env_file_name(node_env)
    }

    #[test_case("ROUTER_CONTRACT_ID=0x01", true; "plain")]
    #[test_case("  ROUTER_CONTRACT_ID = 0x01", true; "spaces")]
    #[test_case("export ROUTER_CONTRACT_ID=0x01", true; "exported")]
    #[test_case("ROUTER_CONTRACT_ID_OLD=0x01", false; "longer name")]
    #[test_case("# ROUTER_CONTRACT_ID=0x01", false; "commented out")]
    #[test_case("ROUTER_CONTRACT_ID", false; "no value")]
    fn matching_lines(line: &str, expected: bool) {
        assert_eq!(sets_var(line, "ROUTER_CONTRACT_ID"), expected);
    }

    #[test]
    fn replacing_and_appending_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# Contracts\nVITE_TOKEN_1_ID=0xold\n\nVITE_FUEL_PROVIDER_URL=http://localhost:4000/graphql\nVITE_TOKEN_1_ID=0xduplicate\n",
        )
        .unwrap();

        replace_event_on_env(
            &path,
            &event(&[("VITE_TOKEN_1_ID", 1), ("ROUTER_CONTRACT_ID", 2)]),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!(
                "# Contracts\nVITE_TOKEN_1_ID={}\n\nVITE_FUEL_PROVIDER_URL=http://localhost:4000/graphql\nVITE_TOKEN_1_ID=0xduplicate\nROUTER_CONTRACT_ID={}\n",
                B256::mock(1),
                B256::mock(2),
            )
        );
    }

    #[test]
    fn creating_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages/app/.env.test");

        replace_event_on_env(&path, &event(&[("REGISTRY_CONTRACT_ID", 7)])).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("REGISTRY_CONTRACT_ID={}\n", B256::mock(7))
        );
    }

    #[test]
    fn loading_env_file_keeps_process_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "SWAYSWAP_ENV_TEST_LOADED=from_file\nSWAYSWAP_ENV_TEST_KEPT=from_file\n",
        )
        .unwrap();
        std::env::set_var("SWAYSWAP_ENV_TEST_KEPT", "from_process");

        assert!(load_env_file(&path).unwrap());
        assert_eq!(std::env::var("SWAYSWAP_ENV_TEST_LOADED").unwrap(), "from_file");
        assert_eq!(std::env::var("SWAYSWAP_ENV_TEST_KEPT").unwrap(), "from_process");

        assert!(!load_env_file(&dir.path().join("missing.env")).unwrap());
    }
}
