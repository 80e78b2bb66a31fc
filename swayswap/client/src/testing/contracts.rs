//! In-memory emulation of the SwaySwap contracts.
//!
//! Only the behavior the deployment tooling relies on is emulated. Errors are
//! returned as strings, which become the failure reason of the transaction.

use {
    std::collections::{BTreeMap, BTreeSet},
    swayswap_types::{
        contracts::{exchange, exchange::PoolInfo, registry, router, token},
        Addr, AssetId, ContractCall, ContractId, Identity, Json, JsonDeExt, JsonSerExt,
        BASE_ASSET_ID,
    },
};

pub type CallResult<T> = Result<T, String>;

#[derive(Debug, Clone)]
pub enum MockContract {
    Token(TokenState),
    Exchange(ExchangeState),
    Router,
    Registry(RegistryState),
    /// A contract deployed through a `Create` transaction, whose logic isn't
    /// emulated.
    Opaque,
}

#[derive(Debug, Clone, Default)]
pub struct TokenState {
    pub owner: Option<Addr>,
    pub mint_amount: u64,
}

#[derive(Debug, Clone)]
pub struct ExchangeState {
    pub token: AssetId,
    pub pool: PoolInfo,
}

#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    pub root: Option<ContractId>,
    pub pools: BTreeSet<ContractId>,
}

/// The chain state a transaction executes against. Cloned before each
/// transaction, so that a failing transaction can be reverted.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    pub contracts: BTreeMap<ContractId, MockContract>,
    pub balances: BTreeMap<(Identity, AssetId), u64>,
}

/// Context of the transaction a call executes in.
pub struct TxContext {
    pub sender: Addr,
    pub variable_outputs: u8,
    pub variable_outputs_used: u8,
}

impl TxContext {
    fn use_variable_output(&mut self) -> CallResult<()> {
        if self.variable_outputs_used >= self.variable_outputs {
            return Err("OutputNotFound: not enough variable outputs".to_string());
        }

        self.variable_outputs_used += 1;

        Ok(())
    }
}

impl MockState {
    pub fn balance(&self, owner: Identity, asset_id: AssetId) -> u64 {
        self.balances
            .get(&(owner, asset_id))
            .copied()
            .unwrap_or_default()
    }

    pub fn credit(&mut self, owner: Identity, asset_id: AssetId, amount: u64) -> CallResult<()> {
        let balance = self.balances.entry((owner, asset_id)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| "ArithmeticOverflow".to_string())?;
        Ok(())
    }

    pub fn debit(&mut self, owner: Identity, asset_id: AssetId, amount: u64) -> CallResult<()> {
        let balance = self.balances.entry((owner, asset_id)).or_default();
        *balance = balance.checked_sub(amount).ok_or_else(|| {
            format!("NotEnoughBalance: {owner} holds {balance} of {asset_id}, needs {amount}")
        })?;
        Ok(())
    }

    fn contract(&self, id: ContractId) -> CallResult<&MockContract> {
        self.contracts
            .get(&id)
            .ok_or_else(|| format!("ContractNotFound: {id}"))
    }

    fn exchange(&self, id: ContractId) -> CallResult<&ExchangeState> {
        match self.contract(id)? {
            MockContract::Exchange(exchange) => Ok(exchange),
            _ => Err(format!("InvalidContractCode: {id} is not an exchange")),
        }
    }

    // ---------------------------------- query ----------------------------------

    pub fn query(&self, contract: ContractId, msg: Json) -> CallResult<Json> {
        match self.contract(contract)? {
            MockContract::Token(state) => match decode::<token::QueryMsg>(msg)? {
                token::QueryMsg::GetOwner {} => encode(&state.owner.unwrap_or_default()),
                token::QueryMsg::GetMintAmount {} => encode(&state.mint_amount),
                token::QueryMsg::GetBalance {} => {
                    encode(&self.balance(Identity::ContractId(contract), contract))
                },
            },
            MockContract::Exchange(state) => match decode::<exchange::QueryMsg>(msg)? {
                exchange::QueryMsg::GetPoolInfo {} => encode(&state.pool),
            },
            MockContract::Registry(state) => match decode::<registry::QueryMsg>(msg)? {
                registry::QueryMsg::ExchangeContractRoot {} => {
                    encode(&state.root.unwrap_or_default())
                },
                registry::QueryMsg::IsPool { addr } => encode(&state.pools.contains(&addr)),
            },
            MockContract::Router | MockContract::Opaque => {
                Err(format!("contract {contract} has no read-only functions"))
            },
        }
    }

    // --------------------------------- execute ---------------------------------

    pub fn execute(&mut self, ctx: &mut TxContext, call: &ContractCall) -> CallResult<Json> {
        if let Some(forward) = call.forward {
            self.debit(Identity::Address(ctx.sender), forward.asset_id, forward.amount)?;
            self.credit(
                Identity::ContractId(call.contract),
                forward.asset_id,
                forward.amount,
            )?;
        }

        match self.contract(call.contract)?.clone() {
            MockContract::Token(state) => {
                let msg = decode(call.msg.clone())?;
                self.execute_token(ctx, call.contract, state, msg)
            },
            MockContract::Router => {
                let msg = decode(call.msg.clone())?;
                self.execute_router(ctx, call, msg)
            },
            MockContract::Registry(state) => {
                let msg = decode(call.msg.clone())?;
                self.execute_registry(call, state, msg)
            },
            MockContract::Exchange(_) | MockContract::Opaque => Err(format!(
                "contract {} has no emulated entry points",
                call.contract
            )),
        }
    }

    fn execute_token(
        &mut self,
        ctx: &mut TxContext,
        contract: ContractId,
        mut state: TokenState,
        msg: token::ExecuteMsg,
    ) -> CallResult<Json> {
        match msg {
            token::ExecuteMsg::Initialize {
                mint_amount,
                address,
            } => {
                if state.owner.is_some() {
                    return Err("AlreadyInitialized".to_string());
                }

                state.owner = Some(address);
                state.mint_amount = mint_amount;
                self.credit(Identity::ContractId(contract), contract, mint_amount)?;
            },
            token::ExecuteMsg::MintCoins { mint_amount } => {
                ensure_owner(&state, ctx.sender)?;
                self.credit(Identity::ContractId(contract), contract, mint_amount)?;
            },
            token::ExecuteMsg::TransferTokenToOutput {
                coins,
                asset_id,
                address,
            } => {
                ensure_owner(&state, ctx.sender)?;
                ctx.use_variable_output()?;
                self.debit(Identity::ContractId(contract), asset_id, coins)?;
                self.credit(Identity::Address(address), asset_id, coins)?;
            },
            token::ExecuteMsg::Mint {} => {
                if state.owner.is_none() {
                    return Err("NotInitialized".to_string());
                }

                ctx.use_variable_output()?;
                self.credit(Identity::Address(ctx.sender), contract, state.mint_amount)?;
            },
        }

        self.contracts.insert(contract, MockContract::Token(state));

        Ok(Json::Null)
    }

    fn execute_router(
        &mut self,
        ctx: &mut TxContext,
        call: &ContractCall,
        msg: router::ExecuteMsg,
    ) -> CallResult<Json> {
        let router = Identity::ContractId(call.contract);

        match msg {
            router::ExecuteMsg::Null {} => Ok(Json::Null),
            router::ExecuteMsg::AddLiquidity {
                pool,
                amount_a_desired,
                amount_b_desired,
                amount_a_min,
                amount_b_min,
                recipient,
            } => {
                ensure_declared(call, pool)?;

                let mut exchange = self.exchange(pool)?.clone();
                let reserves = exchange.pool;

                let (amount_a, amount_b) = if reserves.lp_token_supply == 0 {
                    (amount_a_desired, amount_b_desired)
                } else {
                    let amount_b_optimal =
                        mul_div(amount_a_desired, reserves.token_reserve, reserves.eth_reserve)?;
                    if amount_b_optimal <= amount_b_desired {
                        if amount_b_optimal < amount_b_min {
                            return Err("InsufficientBAmount".to_string());
                        }
                        (amount_a_desired, amount_b_optimal)
                    } else {
                        let amount_a_optimal =
                            mul_div(amount_b_desired, reserves.eth_reserve, reserves.token_reserve)?;
                        if amount_a_optimal < amount_a_min {
                            return Err("InsufficientAAmount".to_string());
                        }
                        (amount_a_optimal, amount_b_desired)
                    }
                };

                let liquidity = if reserves.lp_token_supply == 0 {
                    isqrt(amount_a as u128 * amount_b as u128)
                } else {
                    mul_div(amount_a, reserves.lp_token_supply, reserves.eth_reserve)?.min(
                        mul_div(amount_b, reserves.lp_token_supply, reserves.token_reserve)?,
                    )
                };

                if liquidity == 0 {
                    return Err("InsufficientLiquidityMinted".to_string());
                }

                self.debit(router, BASE_ASSET_ID, amount_a)?;
                self.debit(router, exchange.token, amount_b)?;

                exchange.pool.eth_reserve += amount_a;
                exchange.pool.token_reserve += amount_b;
                exchange.pool.lp_token_supply += liquidity;
                self.contracts.insert(pool, MockContract::Exchange(exchange));

                ctx.use_variable_output()?;
                self.credit(recipient, pool, liquidity)?;

                encode(&liquidity)
            },
            router::ExecuteMsg::SwapExactInput {
                pool,
                min_amount_out,
                recipient,
            } => {
                ensure_declared(call, pool)?;

                let forward = call
                    .forward
                    .ok_or_else(|| "NoAssetsForwarded".to_string())?;
                let mut exchange = self.exchange(pool)?.clone();

                let (reserve_in, reserve_out, asset_out) = if forward.asset_id == BASE_ASSET_ID {
                    (
                        exchange.pool.eth_reserve,
                        exchange.pool.token_reserve,
                        exchange.token,
                    )
                } else if forward.asset_id == exchange.token {
                    (
                        exchange.pool.token_reserve,
                        exchange.pool.eth_reserve,
                        BASE_ASSET_ID,
                    )
                } else {
                    return Err(format!("InvalidAsset: {}", forward.asset_id));
                };

                // Constant product with a 0.3% fee.
                let amount_in_with_fee = forward.amount as u128 * 997;
                let amount_out = (amount_in_with_fee * reserve_out as u128
                    / (reserve_in as u128 * 1000 + amount_in_with_fee))
                    as u64;

                if amount_out == 0 || amount_out < min_amount_out {
                    return Err("InsufficientOutputAmount".to_string());
                }

                if asset_out == BASE_ASSET_ID {
                    exchange.pool.token_reserve += forward.amount;
                    exchange.pool.eth_reserve -= amount_out;
                } else {
                    exchange.pool.eth_reserve += forward.amount;
                    exchange.pool.token_reserve -= amount_out;
                }
                self.contracts.insert(pool, MockContract::Exchange(exchange));

                self.debit(router, forward.asset_id, forward.amount)?;
                ctx.use_variable_output()?;
                self.credit(recipient, asset_out, amount_out)?;

                encode(&amount_out)
            },
        }
    }

    fn execute_registry(
        &mut self,
        call: &ContractCall,
        mut state: RegistryState,
        msg: registry::ExecuteMsg,
    ) -> CallResult<Json> {
        match msg {
            registry::ExecuteMsg::Initialize {
                template_exchange_id,
            } => {
                if state.root.is_some() {
                    return Err("AlreadyInitialized".to_string());
                }

                ensure_declared(call, template_exchange_id)?;
                self.exchange(template_exchange_id)?;

                state.root = Some(template_exchange_id);
            },
            registry::ExecuteMsg::AddExchangeContract { exchange_id } => {
                if state.root.is_none() {
                    return Err("NotInitialized".to_string());
                }

                ensure_declared(call, exchange_id)?;
                self.exchange(exchange_id)?;

                if !state.pools.insert(exchange_id) {
                    return Err("AlreadyRegistered".to_string());
                }
            },
        }

        self.contracts
            .insert(call.contract, MockContract::Registry(state));

        Ok(Json::Null)
    }
}

fn ensure_owner(state: &TokenState, sender: Addr) -> CallResult<()> {
    if state.owner != Some(sender) {
        return Err(format!("NotOwner: {sender}"));
    }

    Ok(())
}

fn ensure_declared(call: &ContractCall, contract: ContractId) -> CallResult<()> {
    if !call.external_contracts.contains(&contract) {
        return Err(format!("ContractNotInInputs: {contract}"));
    }

    Ok(())
}

fn decode<T>(msg: Json) -> CallResult<T>
where
    T: serde::de::DeserializeOwned,
{
    msg.deserialize_json().map_err(|err| err.to_string())
}

fn encode<T>(value: &T) -> CallResult<Json>
where
    T: serde::Serialize,
{
    value.to_json_value().map_err(|err| err.to_string())
}

fn mul_div(a: u64, b: u64, c: u64) -> CallResult<u64> {
    if c == 0 {
        return Err("DivisionByZero".to_string());
    }

    u64::try_from(a as u128 * b as u128 / c as u128).map_err(|_| "ArithmeticOverflow".to_string())
}

fn isqrt(n: u128) -> u64 {
    if n < 2 {
        return n as u64;
    }

    // Newton's method.
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }

    x as u64
}
