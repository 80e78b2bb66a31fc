use {
    crate::ChainClient,
    swayswap_types::contracts::exchange::{PoolInfo, QueryMsg},
};

contract_handle! {
    /// Handle to an exchange contract, i.e. a pool pairing the base asset with
    /// one token.
    ExchangeContract
}

impl<C> ExchangeContract<'_, C>
where
    C: ChainClient,
{
    pub async fn get_pool_info(&self) -> anyhow::Result<PoolInfo> {
        self.query(&QueryMsg::GetPoolInfo {}).await
    }
}
