use {
    std::{fs, path::Path},
    swayswap_client::{testing::MockChain, Wallet},
    swayswap_deployment::{
        deploy_contracts, replace_event_on_env, DeployOptions, InitError, Manifest,
    },
    swayswap_types::{compute_contract_id, StorageSlot, B256},
};

const MANIFEST: &str = r#"
output_dir = "./packages/app"

[[contracts]]
name = "ROUTER_CONTRACT_ID"
path = "./packages/contracts/router_contract"

[[contracts]]
name = "VITE_TOKEN_1_ID"
path = "./packages/contracts/token_contract"
salt = 1

[[contracts]]
name = "VITE_EXCHANGE_1_ID"
path = "./packages/contracts/exchange_contract"
salt = 1
storage_slots = [
  { key = "0x0000000000000000000000000000000000000000000000000000000000000001", value = { contract = "VITE_TOKEN_1_ID" } },
]
"#;

const SALT_BASE: u64 = 166_000_000;

fn write_bytecode(root: &Path, project: &str, bytecode: &[u8]) {
    let dir = root.join("packages/contracts").join(project).join("out/debug");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{project}.bin")), bytecode).unwrap();
}

/// A project directory with a manifest and compiled contracts.
fn setup_project(manifest: &str) -> (tempfile::TempDir, Manifest) {
    let dir = tempfile::tempdir().unwrap();
    write_bytecode(dir.path(), "router_contract", b"router");
    write_bytecode(dir.path(), "token_contract", b"token");
    write_bytecode(dir.path(), "exchange_contract", b"exchange");

    let manifest_path = dir.path().join("swayswap.toml");
    fs::write(&manifest_path, manifest).unwrap();
    let manifest = Manifest::load(&manifest_path).unwrap();

    (dir, manifest)
}

fn options() -> DeployOptions {
    DeployOptions {
        salt_base: SALT_BASE,
        gas_price: 0,
    }
}

#[tokio::test]
async fn deploying_contracts_in_order() {
    let (dir, manifest) = setup_project(MANIFEST);
    let chain = MockChain::new();
    let wallet = Wallet::new_random();

    let event = deploy_contracts(&chain, &wallet, &manifest, dir.path(), options())
        .await
        .unwrap();

    let router = compute_contract_id(b"router", B256::ZERO, &[]);
    let token = compute_contract_id(b"token", B256::from_u64(SALT_BASE + 1), &[]);
    let exchange = compute_contract_id(b"exchange", B256::from_u64(SALT_BASE + 1), &[
        StorageSlot {
            key: B256::from_u64(1),
            value: token,
        },
    ]);

    assert_eq!(event.contract_id("ROUTER_CONTRACT_ID"), Some(router));
    assert_eq!(event.contract_id("VITE_TOKEN_1_ID"), Some(token));
    assert_eq!(event.contract_id("VITE_EXCHANGE_1_ID"), Some(exchange));
    assert_eq!(
        chain
            .transactions()
            .iter()
            .map(|tx| tx.created)
            .collect::<Vec<_>>(),
        [Some(router), Some(token), Some(exchange)]
    );
}

#[tokio::test]
async fn existing_contracts_are_not_deployed_again() {
    let (dir, manifest) = setup_project(MANIFEST);
    let chain = MockChain::new();
    let wallet = Wallet::new_random();

    let first = deploy_contracts(&chain, &wallet, &manifest, dir.path(), options())
        .await
        .unwrap();
    let second = deploy_contracts(&chain, &wallet, &manifest, dir.path(), options())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(chain.transactions().len(), 3);

    // A new salt base yields new IDs for the salted contracts only.
    let third = deploy_contracts(&chain, &wallet, &manifest, dir.path(), DeployOptions {
        salt_base: SALT_BASE + 1,
        gas_price: 0,
    })
    .await
    .unwrap();

    assert_eq!(
        third.contract_id("ROUTER_CONTRACT_ID"),
        first.contract_id("ROUTER_CONTRACT_ID")
    );
    assert_ne!(
        third.contract_id("VITE_TOKEN_1_ID"),
        first.contract_id("VITE_TOKEN_1_ID")
    );
    assert_eq!(chain.transactions().len(), 5);
}

#[tokio::test]
async fn referencing_later_contract_fails_before_submitting() {
    let (dir, manifest) = setup_project(
        r#"
[[contracts]]
name = "VITE_EXCHANGE_1_ID"
path = "./packages/contracts/exchange_contract"
storage_slots = [
  { key = "0x0000000000000000000000000000000000000000000000000000000000000001", value = { contract = "VITE_TOKEN_1_ID" } },
]

[[contracts]]
name = "VITE_TOKEN_1_ID"
path = "./packages/contracts/token_contract"
"#,
    );
    let chain = MockChain::new();
    let wallet = Wallet::new_random();

    let err = deploy_contracts(&chain, &wallet, &manifest, dir.path(), options())
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<InitError>(),
        Some(&InitError::UnknownContractReference {
            contract: "VITE_EXCHANGE_1_ID".to_string(),
            reference: "VITE_TOKEN_1_ID".to_string(),
        })
    );
    assert_eq!(chain.request_count(), 0);
}

#[tokio::test]
async fn missing_bytecode_is_an_error() {
    let (dir, manifest) = setup_project(
        r#"
[[contracts]]
name = "VAULT_CONTRACT_ID"
path = "./packages/contracts/vault_contract"
"#,
    );
    let chain = MockChain::new();
    let wallet = Wallet::new_random();

    let err = deploy_contracts(&chain, &wallet, &manifest, dir.path(), options())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("VAULT_CONTRACT_ID"));
    assert!(chain.transactions().is_empty());
}

#[tokio::test]
async fn writing_deployed_ids_to_env_file() {
    let (dir, manifest) = setup_project(MANIFEST);
    let chain = MockChain::new();
    let wallet = Wallet::new_random();

    let output = manifest.output_path(dir.path(), None, None);
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(
        &output,
        "VITE_FUEL_PROVIDER_URL=http://localhost:4000/graphql\nVITE_TOKEN_1_ID=0xstale\n",
    )
    .unwrap();

    let event = deploy_contracts(&chain, &wallet, &manifest, dir.path(), options())
        .await
        .unwrap();
    replace_event_on_env(&output, &event).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines = content.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "VITE_FUEL_PROVIDER_URL=http://localhost:4000/graphql");
    assert_eq!(
        lines[1],
        format!("VITE_TOKEN_1_ID={}", event.contract_id("VITE_TOKEN_1_ID").unwrap())
    );
    assert!(lines[2].starts_with("ROUTER_CONTRACT_ID=0x"));
    assert!(lines[3].starts_with("VITE_EXCHANGE_1_ID=0x"));
}
