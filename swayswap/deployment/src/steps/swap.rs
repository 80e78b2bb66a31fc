use {
    swayswap_client::{ChainClient, RouterContract},
    swayswap_types::{ContractId, Identity, Signer, TxOutcome, TxParams, BASE_ASSET_ID},
};

/// Amount of the base asset swapped by the test swap.
pub const TEST_SWAP_AMOUNT: u64 = 10;

/// Swap a small amount of the base asset in a freshly seeded pool, as a
/// smoke test. The output amount isn't checked.
pub async fn test_swap<C>(router: &RouterContract<'_, C>, pool: ContractId) -> anyhow::Result<TxOutcome>
where
    C: ChainClient,
{
    let recipient = Identity::Address(router.wallet().address());

    router
        .swap_exact_input(pool, 0, recipient)?
        .forward(TEST_SWAP_AMOUNT, BASE_ASSET_ID)
        .call_gas_limit(10_000_000)
        .add_contracts([pool])
        .tx_params(
            TxParams::default()
                .with_gas_price(1)
                .with_gas_limit(100_000_000)
                .with_variable_outputs(2),
        )
        .call()
        .await
}
