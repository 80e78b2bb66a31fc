use {
    crate::{CallHandler, ChainClient},
    swayswap_types::{
        contracts::registry::{ExecuteMsg, QueryMsg},
        ContractId,
    },
};

contract_handle! {
    /// Handle to the registry contract, which records the exchange contracts
    /// recognized as pools.
    RegistryContract
}

impl<'a, C> RegistryContract<'a, C>
where
    C: ChainClient,
{
    pub async fn exchange_contract_root(&self) -> anyhow::Result<ContractId> {
        self.query(&QueryMsg::ExchangeContractRoot {}).await
    }

    pub async fn is_pool(&self, addr: ContractId) -> anyhow::Result<bool> {
        self.query(&QueryMsg::IsPool { addr }).await
    }

    pub fn initialize(&self, template_exchange_id: ContractId) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&ExecuteMsg::Initialize {
            template_exchange_id,
        })
    }

    pub fn add_exchange_contract(
        &self,
        exchange_id: ContractId,
    ) -> anyhow::Result<CallHandler<'a, C>> {
        self.call(&ExecuteMsg::AddExchangeContract { exchange_id })
    }
}
