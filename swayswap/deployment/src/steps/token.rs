use {
    crate::steps::IdempotentStep,
    async_trait::async_trait,
    swayswap_client::{ChainClient, ExchangeContract, TokenContract},
    swayswap_types::{QueryClientExt, Signer, TxOutcome, TxParams},
};

/// Set the deployer as the token's owner, minting the initial supply into
/// the token contract. Done once the token has an owner.
pub struct InitializeToken<'a, C> {
    token: TokenContract<'a, C>,
    mint_amount: u64,
    params: TxParams,
}

impl<'a, C> InitializeToken<'a, C> {
    pub fn new(token: TokenContract<'a, C>, mint_amount: u64, params: TxParams) -> Self {
        Self {
            token,
            mint_amount,
            params,
        }
    }
}

#[async_trait]
impl<'a, C> IdempotentStep for InitializeToken<'a, C>
where
    C: ChainClient,
{
    fn describe(&self) -> String {
        format!("initialize token {}", self.token.id())
    }

    async fn is_satisfied(&self) -> anyhow::Result<bool> {
        let owner = self.token.get_owner().await?;

        Ok(!owner.is_zero())
    }

    async fn execute(&self) -> anyhow::Result<TxOutcome> {
        self.token
            .initialize(self.mint_amount, self.token.wallet().address())?
            .tx_params(self.params)
            .call()
            .await
    }
}

/// Transfer the amount of the token needed to seed its pool, from the token
/// contract's minted supply to the deployer.
///
/// Done once the deployer holds that amount, or once the pool is seeded.
pub struct FundDeployer<'a, C> {
    token: TokenContract<'a, C>,
    exchange: ExchangeContract<'a, C>,
    amount: u64,
    params: TxParams,
}

impl<'a, C> FundDeployer<'a, C> {
    pub fn new(
        token: TokenContract<'a, C>,
        exchange: ExchangeContract<'a, C>,
        amount: u64,
        params: TxParams,
    ) -> Self {
        Self {
            token,
            exchange,
            amount,
            params,
        }
    }
}

#[async_trait]
impl<'a, C> IdempotentStep for FundDeployer<'a, C>
where
    C: ChainClient,
{
    fn describe(&self) -> String {
        format!("fund deployer with {} of token {}", self.amount, self.token.id())
    }

    async fn is_satisfied(&self) -> anyhow::Result<bool> {
        if self.exchange.get_pool_info().await?.lp_token_supply > 0 {
            return Ok(true);
        }

        let balance = self
            .token
            .client()
            .query_balance(self.token.wallet().address(), self.token.asset_id())
            .await?;

        Ok(balance >= self.amount)
    }

    async fn execute(&self) -> anyhow::Result<TxOutcome> {
        self.token
            .transfer_token_to_output(
                self.amount,
                self.token.asset_id(),
                self.token.wallet().address(),
            )?
            .tx_params(self.params.with_variable_outputs(1))
            .call()
            .await
    }
}
