use {
    crate::{CallHandler, ChainClient},
    swayswap_types::{contracts::token, Addr, AssetId},
};

contract_handle! {
    /// Handle to a token contract. The token's asset ID is its contract ID.
    TokenContract
}

impl<'a, C> TokenContract<'a, C>
where
    C: ChainClient,
{
    pub fn asset_id(&self) -> AssetId {
        self.id()
    }

    pub async fn get_owner(&self) -> anyhow::Result<Addr> {
        self.query(&token::QueryMsg::GetOwner {}).await
    }

    pub async fn get_balance(&self) -> anyhow::Result<u64> {
        self.query(&token::QueryMsg::GetBalance {}).await
    }

    pub fn initialize(&self, mint_amount: u64, address: Addr) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&token::ExecuteMsg::Initialize {
            mint_amount,
            address,
        })
    }

    pub fn transfer_token_to_output(
        &self,
        coins: u64,
        asset_id: AssetId,
        address: Addr,
    ) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&token::ExecuteMsg::TransferTokenToOutput {
            coins,
            asset_id,
            address,
        })
    }
}
