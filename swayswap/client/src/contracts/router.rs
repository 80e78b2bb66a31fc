use {
    crate::{CallHandler, ChainClient},
    swayswap_types::{contracts::router::ExecuteMsg, ContractId, Identity},
};

contract_handle! {
    /// Handle to the router contract, the entry point for adding liquidity
    /// and swapping.
    RouterContract
}

impl<'a, C> RouterContract<'a, C>
where
    C: ChainClient,
{
    pub fn null(&self) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&ExecuteMsg::Null {})
    }

    pub fn add_liquidity(
        &self,
        pool: ContractId,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        recipient: Identity,
    ) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&ExecuteMsg::AddLiquidity {
            pool,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            recipient,
        })
    }

    pub fn swap_exact_input(
        &self,
        pool: ContractId,
        min_amount_out: u64,
        recipient: Identity,
    ) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&ExecuteMsg::SwapExactInput {
            pool,
            min_amount_out,
            recipient,
        })
    }
}
