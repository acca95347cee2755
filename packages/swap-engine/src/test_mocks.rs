//! A scriptable in-memory chain for engine tests: constant-product swap
//! curve, canned fee/tax parameters, and call recording.

use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cosmrs::{cosmwasm::MsgExecuteContract, tx::Fee, AccountId, Coin};
use cosmwasm_std::{Addr, Decimal, Uint128};
use cw20::TokenInfoResponse;

use bootswap_chain_client_utils::{
    common::{error::ChainClientError, transaction::TransactionResponse},
    sale_querier::SaleQuerier,
};
use bootswap_lbp_utils::pair::{
    AssetInfo, PairInfo, PairsResponse, PoolResponse, ReverseSimulationResponse,
    SimulationResponse, WeightedAsset, WeightedAssetInfo,
};

use crate::sink::ExceptionSink;
use crate::submit::SwapSubmitter;

pub fn test_wallet() -> AccountId {
    AccountId::new("terra", &[1u8; 20]).unwrap()
}

fn pair_account() -> AccountId {
    AccountId::new("terra", &[2u8; 20]).unwrap()
}

fn token_account() -> AccountId {
    AccountId::new("terra", &[3u8; 20]).unwrap()
}

fn lp_account() -> AccountId {
    AccountId::new("terra", &[4u8; 20]).unwrap()
}

/// The sale token side deliberately comes first so that anything assuming
/// "native is index 0" breaks loudly.
pub fn test_pair() -> PairInfo {
    PairInfo {
        asset_infos: [
            WeightedAssetInfo {
                info: AssetInfo::Token {
                    contract_addr: Addr::unchecked(token_account().to_string()),
                },
                start_weight: Uint128::new(98),
                end_weight: Uint128::new(40),
            },
            WeightedAssetInfo {
                info: AssetInfo::NativeToken {
                    denom: "uusd".to_string(),
                },
                start_weight: Uint128::new(2),
                end_weight: Uint128::new(60),
            },
        ],
        contract_addr: Addr::unchecked(pair_account().to_string()),
        liquidity_token: Addr::unchecked(lp_account().to_string()),
        start_time: 1_638_316_800,
        end_time: 1_638_921_600,
    }
}

pub fn sale_token_info() -> TokenInfoResponse {
    TokenInfoResponse {
        name: "Foo Token".to_string(),
        symbol: "FOO".to_string(),
        decimals: 5,
        total_supply: Uint128::new(10_000_000_000_000),
    }
}

pub fn uusd_fee(amount: u128, gas: u64) -> Fee {
    Fee::from_amount_and_gas(
        Coin {
            denom: "uusd".parse().unwrap(),
            amount,
        },
        gas,
    )
}

/// Sink that records what was reported instead of logging it.
#[derive(Default, Clone)]
pub struct TestSink(pub Arc<Mutex<Vec<String>>>);

impl ExceptionSink for TestSink {
    fn report(&self, err: &dyn std::error::Error) {
        self.0.lock().unwrap().push(err.to_string());
    }
}

pub struct MockChain {
    pub native_balance: Uint128,
    pub token_balance: Uint128,
    pub tax_rate: Decimal,
    pub tax_cap: Uint128,
    pub estimated_fee: Fee,
    pub native_reserve: Uint128,
    pub token_reserve: Uint128,
    pub native_weight: Decimal,
    pub token_weight: Decimal,
    /// When set, forward simulations return this instead of the curve.
    pub forced_return: Option<Uint128>,
    pub fail_simulation: bool,
    pub fail_estimate: bool,
    pub tx_found: bool,
    pub simulation_requests: Mutex<Vec<AssetInfo>>,
    pub estimate_calls: Mutex<u32>,
    pub broadcasts: Mutex<Vec<(MsgExecuteContract, Fee)>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            native_balance: Uint128::new(1_000_000_000),
            token_balance: Uint128::new(1_000_000_000),
            tax_rate: Decimal::permille(1),
            tax_cap: Uint128::new(1_000_000),
            estimated_fee: uusd_fee(30_000, 200_000),
            native_reserve: Uint128::new(50_000_000),
            token_reserve: Uint128::new(2_450_000_000),
            native_weight: Decimal::from_str("5.8").unwrap(),
            token_weight: Decimal::from_str("94.2").unwrap(),
            forced_return: None,
            fail_simulation: false,
            fail_estimate: false,
            tx_found: true,
            simulation_requests: Mutex::new(Vec::new()),
            estimate_calls: Mutex::new(0),
            broadcasts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_native_balance(mut self, balance: Uint128) -> Self {
        self.native_balance = balance;
        self
    }

    pub fn with_token_balance(mut self, balance: Uint128) -> Self {
        self.token_balance = balance;
        self
    }

    pub fn with_tax(mut self, rate: Decimal, cap: Uint128) -> Self {
        self.tax_rate = rate;
        self.tax_cap = cap;
        self
    }

    pub fn with_estimated_fee(mut self, fee: Fee) -> Self {
        self.estimated_fee = fee;
        self
    }

    pub fn with_pool(mut self, native_reserve: Uint128, token_reserve: Uint128) -> Self {
        self.native_reserve = native_reserve;
        self.token_reserve = token_reserve;
        self
    }

    pub fn with_weights(mut self, native_weight: Decimal, token_weight: Decimal) -> Self {
        self.native_weight = native_weight;
        self.token_weight = token_weight;
        self
    }

    pub fn with_forced_return(mut self, amount: Uint128) -> Self {
        self.forced_return = Some(amount);
        self
    }

    pub fn failing_simulation(mut self) -> Self {
        self.fail_simulation = true;
        self
    }

    pub fn failing_estimate(mut self) -> Self {
        self.fail_estimate = true;
        self
    }

    pub fn with_tx_found(mut self, found: bool) -> Self {
        self.tx_found = found;
        self
    }

    /// `(in_reserve, out_reserve)` for a given offer side.
    fn reserves_for_offer(&self, offer: &AssetInfo) -> (Uint128, Uint128) {
        if offer.is_native() {
            (self.native_reserve, self.token_reserve)
        } else {
            (self.token_reserve, self.native_reserve)
        }
    }

    fn weights_for_offer(&self, offer: &AssetInfo) -> (Decimal, Decimal) {
        if offer.is_native() {
            (self.native_weight, self.token_weight)
        } else {
            (self.token_weight, self.native_weight)
        }
    }
}

#[async_trait]
impl SaleQuerier for MockChain {
    async fn pool(&self, _pair_addr: &str) -> Result<PoolResponse, ChainClientError> {
        let pair = test_pair();
        let native = pair.native_asset_info().unwrap();
        let token = pair.sale_asset_info().unwrap();

        Ok(PoolResponse {
            assets: [
                WeightedAsset {
                    info: token.info.clone(),
                    amount: self.token_reserve,
                    start_weight: token.start_weight,
                    end_weight: token.end_weight,
                },
                WeightedAsset {
                    info: native.info.clone(),
                    amount: self.native_reserve,
                    start_weight: native.start_weight,
                    end_weight: native.end_weight,
                },
            ],
            total_share: Uint128::new(60_000_000),
        })
    }

    async fn simulation(
        &self,
        _pair_addr: &str,
        offer_amount: Uint128,
        offer_asset: AssetInfo,
    ) -> Result<SimulationResponse, ChainClientError> {
        if self.fail_simulation {
            return Err(ChainClientError::QueryError("node unavailable".to_string()));
        }

        self.simulation_requests
            .lock()
            .unwrap()
            .push(offer_asset.clone());

        let (offer_weight, ask_weight) = self.weights_for_offer(&offer_asset);

        let return_amount = match self.forced_return {
            Some(amount) => amount,
            None => {
                let (in_reserve, out_reserve) = self.reserves_for_offer(&offer_asset);
                out_reserve.multiply_ratio(offer_amount, in_reserve + offer_amount)
            }
        };

        Ok(SimulationResponse {
            return_amount,
            spread_amount: Uint128::zero(),
            commission_amount: Uint128::zero(),
            ask_weight,
            offer_weight,
        })
    }

    async fn reverse_simulation(
        &self,
        _pair_addr: &str,
        ask_amount: Uint128,
        ask_asset: AssetInfo,
    ) -> Result<ReverseSimulationResponse, ChainClientError> {
        if self.fail_simulation {
            return Err(ChainClientError::QueryError("node unavailable".to_string()));
        }

        // the offer side is the other one
        let (out_reserve, in_reserve) = self.reserves_for_offer(&ask_asset);
        let (ask_weight, offer_weight) = self.weights_for_offer(&ask_asset);

        if ask_amount >= out_reserve {
            return Err(ChainClientError::QueryError(
                "ask exceeds pool reserve".to_string(),
            ));
        }

        let offer_amount =
            in_reserve.multiply_ratio(ask_amount, out_reserve - ask_amount) + Uint128::one();

        Ok(ReverseSimulationResponse {
            offer_amount,
            spread_amount: Uint128::zero(),
            commission_amount: Uint128::zero(),
            ask_weight,
            offer_weight,
        })
    }

    async fn native_balance(
        &self,
        _address: &str,
        _denom: &str,
    ) -> Result<Uint128, ChainClientError> {
        Ok(self.native_balance)
    }

    async fn token_balance(
        &self,
        _token_addr: &str,
        _address: &str,
    ) -> Result<Uint128, ChainClientError> {
        Ok(self.token_balance)
    }

    async fn token_info(&self, _token_addr: &str) -> Result<TokenInfoResponse, ChainClientError> {
        Ok(sale_token_info())
    }

    async fn lbp_pairs(&self, _factory_addr: &str) -> Result<PairsResponse, ChainClientError> {
        Ok(PairsResponse {
            pairs: vec![test_pair()],
        })
    }

    async fn tax_rate(&self) -> Result<Decimal, ChainClientError> {
        Ok(self.tax_rate)
    }

    async fn tax_cap(&self, _denom: &str) -> Result<Uint128, ChainClientError> {
        Ok(self.tax_cap)
    }

    async fn estimate_fee(&self, _msg: MsgExecuteContract) -> Result<Fee, ChainClientError> {
        if self.fail_estimate {
            return Err(ChainClientError::QueryError(
                "fee estimation unavailable".to_string(),
            ));
        }

        *self.estimate_calls.lock().unwrap() += 1;
        Ok(self.estimated_fee.clone())
    }
}

#[async_trait]
impl SwapSubmitter for MockChain {
    async fn broadcast_swap(
        &self,
        msg: MsgExecuteContract,
        fee: Fee,
    ) -> Result<TransactionResponse, ChainClientError> {
        self.broadcasts.lock().unwrap().push((msg, fee));

        Ok(TransactionResponse {
            hash: "123ABC".to_string(),
            code: 0,
            block_height: 4_200_000,
            gas_used: 180_000,
        })
    }

    async fn find_swap_tx(
        &self,
        tx_hash: &str,
        _interval: Duration,
        _max_attempts: u32,
    ) -> Result<TransactionResponse, ChainClientError> {
        if self.tx_found {
            Ok(TransactionResponse {
                hash: tx_hash.to_string(),
                code: 0,
                block_height: 4_200_001,
                gas_used: 180_000,
            })
        } else {
            Err(ChainClientError::TransactionPending(tx_hash.to_string()))
        }
    }
}
