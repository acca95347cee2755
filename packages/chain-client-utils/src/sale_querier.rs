//! The read interface the swap engine runs against.
//!
//! Everything the engine needs from the chain goes through [`SaleQuerier`]:
//! pool snapshots, swap simulations, balances, token metadata, tax
//! parameters and fee estimation. Failures propagate to the caller as-is;
//! retry policy belongs to the UI layer.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use cosmrs::{cosmwasm::MsgExecuteContract, tx::Fee};
use cosmwasm_std::{Decimal, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg, TokenInfoResponse};

use bootswap_lbp_utils::pair::{
    Asset, AssetInfo, FactoryQueryMsg, PairsResponse, PoolResponse, QueryMsg,
    ReverseSimulationResponse, SimulationResponse,
};

use crate::common::error::ChainClientError;
use crate::cosmos::{
    base_client::BaseClient, treasury::TreasuryClient, wasm_client::WasmClient,
};
use crate::terra::TerraClient;

#[async_trait]
pub trait SaleQuerier {
    /// Live reserves and issued shares of a pair.
    async fn pool(&self, pair_addr: &str) -> Result<PoolResponse, ChainClientError>;

    /// Forward simulation: the ask-side amount received for offering
    /// `offer_amount` of `offer_asset`, at the current block time.
    async fn simulation(
        &self,
        pair_addr: &str,
        offer_amount: Uint128,
        offer_asset: AssetInfo,
    ) -> Result<SimulationResponse, ChainClientError>;

    /// Reverse simulation: the offer-side amount required to receive
    /// `ask_amount` of `ask_asset`.
    async fn reverse_simulation(
        &self,
        pair_addr: &str,
        ask_amount: Uint128,
        ask_asset: AssetInfo,
    ) -> Result<ReverseSimulationResponse, ChainClientError>;

    /// Current `(native_weight, token_weight)` of a pair.
    ///
    /// The pair has no dedicated weights query; a zero-amount forward
    /// simulation offering the native coin reports the weights in effect
    /// without moving the curve, so the offer weight is the native weight.
    async fn weights(
        &self,
        pair_addr: &str,
        native_denom: &str,
    ) -> Result<(Decimal, Decimal), ChainClientError> {
        let simulation = self
            .simulation(
                pair_addr,
                Uint128::zero(),
                AssetInfo::NativeToken {
                    denom: native_denom.to_string(),
                },
            )
            .await?;

        Ok((simulation.offer_weight, simulation.ask_weight))
    }

    /// Native coin balance; zero for a denom the account does not hold.
    async fn native_balance(
        &self,
        address: &str,
        denom: &str,
    ) -> Result<Uint128, ChainClientError>;

    /// cw20 token balance of `address`.
    async fn token_balance(
        &self,
        token_addr: &str,
        address: &str,
    ) -> Result<Uint128, ChainClientError>;

    /// cw20 token metadata (name, symbol, decimals).
    async fn token_info(&self, token_addr: &str) -> Result<TokenInfoResponse, ChainClientError>;

    /// Every sale pair registered with the factory.
    async fn lbp_pairs(&self, factory_addr: &str) -> Result<PairsResponse, ChainClientError>;

    /// Current stability tax rate.
    async fn tax_rate(&self) -> Result<Decimal, ChainClientError>;

    /// Per-denom stability tax cap, in base units.
    async fn tax_cap(&self, denom: &str) -> Result<Uint128, ChainClientError>;

    /// Node-side fee estimate for a one-message transaction.
    async fn estimate_fee(&self, msg: MsgExecuteContract) -> Result<Fee, ChainClientError>;
}

fn unix_now() -> Result<u64, ChainClientError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|err| ChainClientError::ClientError(err.to_string()))
}

#[async_trait]
impl SaleQuerier for TerraClient {
    async fn pool(&self, pair_addr: &str) -> Result<PoolResponse, ChainClientError> {
        self.query_contract_state(pair_addr, QueryMsg::Pool {}).await
    }

    async fn simulation(
        &self,
        pair_addr: &str,
        offer_amount: Uint128,
        offer_asset: AssetInfo,
    ) -> Result<SimulationResponse, ChainClientError> {
        let query = QueryMsg::Simulation {
            offer_asset: Asset {
                info: offer_asset,
                amount: offer_amount,
            },
            block_time: unix_now()?,
        };

        self.query_contract_state(pair_addr, query).await
    }

    async fn reverse_simulation(
        &self,
        pair_addr: &str,
        ask_amount: Uint128,
        ask_asset: AssetInfo,
    ) -> Result<ReverseSimulationResponse, ChainClientError> {
        let query = QueryMsg::ReverseSimulation {
            ask_asset: Asset {
                info: ask_asset,
                amount: ask_amount,
            },
            block_time: unix_now()?,
        };

        self.query_contract_state(pair_addr, query).await
    }

    async fn native_balance(
        &self,
        address: &str,
        denom: &str,
    ) -> Result<Uint128, ChainClientError> {
        self.query_balance(address, denom).await
    }

    async fn token_balance(
        &self,
        token_addr: &str,
        address: &str,
    ) -> Result<Uint128, ChainClientError> {
        let response: BalanceResponse = self
            .query_contract_state(
                token_addr,
                Cw20QueryMsg::Balance {
                    address: address.to_string(),
                },
            )
            .await?;

        Ok(response.balance)
    }

    async fn token_info(&self, token_addr: &str) -> Result<TokenInfoResponse, ChainClientError> {
        self.query_contract_state(token_addr, Cw20QueryMsg::TokenInfo {})
            .await
    }

    async fn lbp_pairs(&self, factory_addr: &str) -> Result<PairsResponse, ChainClientError> {
        self.query_contract_state(factory_addr, FactoryQueryMsg::Pairs {})
            .await
    }

    async fn tax_rate(&self) -> Result<Decimal, ChainClientError> {
        self.query_tax_rate().await
    }

    async fn tax_cap(&self, denom: &str) -> Result<Uint128, ChainClientError> {
        self.query_tax_cap(denom).await
    }

    async fn estimate_fee(&self, msg: MsgExecuteContract) -> Result<Fee, ChainClientError> {
        self.estimate_execute_fee(&msg).await
    }
}
