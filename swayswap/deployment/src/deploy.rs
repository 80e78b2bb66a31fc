use {
    crate::{ContractManifest, InitError, Manifest, StorageValue},
    anyhow::Context,
    std::{fs, path::Path},
    swayswap_client::{ChainClient, Wallet},
    swayswap_types::{
        compute_contract_id, BroadcastClientExt, ContractId, QueryClientExt, Salt, StorageSlot,
        TxParams,
    },
};

/// A contract deployed, or found already deployed, during a deploy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub contract_id: ContractId,
}

/// Emitted once every contract in the manifest is deployed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployEvent {
    pub contracts: Vec<DeployedContract>,
}

impl DeployEvent {
    pub fn contract_id(&self, name: &str) -> Option<ContractId> {
        self.contracts
            .iter()
            .find(|contract| contract.name == name)
            .map(|contract| contract.contract_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    pub salt_base: u64,
    pub gas_price: u64,
}

/// Deploy the contracts listed in the manifest, in order. Paths in the
/// manifest are relative to `root`.
///
/// A contract the node already has is not deployed again, so re-running with
/// the same salt base is a no-op.
pub async fn deploy_contracts<C>(
    client: &C,
    wallet: &Wallet,
    manifest: &Manifest,
    root: &Path,
    options: DeployOptions,
) -> anyhow::Result<DeployEvent>
where
    C: ChainClient,
{
    let mut event = DeployEvent::default();

    for contract in &manifest.contracts {
        let storage_slots = resolve_storage_slots(contract, &event)?;

        let bytecode_path = contract.bytecode_path(root);
        let bytecode = fs::read(&bytecode_path).with_context(|| {
            format!(
                "failed to read bytecode of `{}` from `{}`",
                contract.name,
                bytecode_path.display()
            )
        })?;

        let contract_id = get_or_deploy_contract(
            client,
            wallet,
            &contract.name,
            bytecode,
            contract.salt(options.salt_base),
            storage_slots,
            TxParams::default().with_gas_price(options.gas_price),
        )
        .await?;

        event.contracts.push(DeployedContract {
            name: contract.name.clone(),
            contract_id,
        });
    }

    Ok(event)
}

/// Deploy a contract, unless one with the same ID already exists.
pub async fn get_or_deploy_contract<C>(
    client: &C,
    wallet: &Wallet,
    name: &str,
    bytecode: Vec<u8>,
    salt: Salt,
    storage_slots: Vec<StorageSlot>,
    params: TxParams,
) -> anyhow::Result<ContractId>
where
    C: ChainClient,
{
    let contract_id = compute_contract_id(&bytecode, salt, &storage_slots);

    if client.query_contract_exists(contract_id).await? {
        tracing::info!(name, %contract_id, "Contract already deployed, skipping");
        return Ok(contract_id);
    }

    tracing::info!(name, %contract_id, %salt, "Deploying contract");

    let (contract_id, outcome) = client
        .create_contract(wallet, bytecode, salt, storage_slots, params)
        .await?;

    tracing::info!(
        name,
        %contract_id,
        tx_id = %outcome.tx_id,
        block_height = outcome.block_height,
        "Contract deployed"
    );

    Ok(contract_id)
}

fn resolve_storage_slots(
    contract: &ContractManifest,
    deployed: &DeployEvent,
) -> Result<Vec<StorageSlot>, InitError> {
    contract
        .storage_slots
        .iter()
        .map(|slot| {
            let value = match &slot.value {
                StorageValue::Literal(value) => *value,
                StorageValue::Contract { contract: reference } => deployed
                    .contract_id(reference)
                    .ok_or_else(|| InitError::UnknownContractReference {
                        contract: contract.name.clone(),
                        reference: reference.clone(),
                    })?,
            };

            Ok(StorageSlot {
                key: slot.key,
                value,
            })
        })
        .collect()
}
