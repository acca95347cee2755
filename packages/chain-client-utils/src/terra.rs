use crate::cosmos::{
    base_client::BaseClient, grpc_client::GrpcSigningClient, treasury::TreasuryClient,
    wasm_client::WasmClient,
};
use async_trait::async_trait;

const CHAIN_PREFIX: &str = "terra";
const CHAIN_DENOM: &str = "uusd";

// Terra station's classic defaults for uusd-denominated fees.
const DEFAULT_GAS_PRICE: f64 = 0.15;
const DEFAULT_GAS_ADJUSTMENT: f64 = 1.4;

/// Client for a Terra-style chain, paying fees in `uusd`. All connection and
/// fee parameters are explicit constructor state; nothing is read from
/// ambient globals.
pub struct TerraClient {
    grpc_url: String,
    mnemonic: String,
    chain_id: String,
    gas_price: f64,
    gas_adjustment: f64,
}

impl TerraClient {
    pub fn new(grpc_url: &str, grpc_port: &str, mnemonic: &str, chain_id: &str) -> Self {
        Self {
            grpc_url: format!("{grpc_url}:{grpc_port}"),
            mnemonic: mnemonic.to_string(),
            chain_id: chain_id.to_string(),
            gas_price: DEFAULT_GAS_PRICE,
            gas_adjustment: DEFAULT_GAS_ADJUSTMENT,
        }
    }

    pub fn with_gas_price(mut self, gas_price: f64, gas_adjustment: f64) -> Self {
        self.gas_price = gas_price;
        self.gas_adjustment = gas_adjustment;
        self
    }
}

#[async_trait]
impl BaseClient for TerraClient {}

#[async_trait]
impl WasmClient for TerraClient {}

#[async_trait]
impl TreasuryClient for TerraClient {}

#[async_trait]
impl GrpcSigningClient for TerraClient {
    fn grpc_url(&self) -> String {
        self.grpc_url.to_string()
    }

    fn mnemonic(&self) -> String {
        self.mnemonic.to_string()
    }

    fn chain_prefix(&self) -> String {
        CHAIN_PREFIX.to_string()
    }

    fn chain_id(&self) -> String {
        self.chain_id.to_string()
    }

    fn chain_denom(&self) -> String {
        CHAIN_DENOM.to_string()
    }

    fn gas_price(&self) -> f64 {
        self.gas_price
    }

    fn gas_adjustment(&self) -> f64 {
        self.gas_adjustment
    }
}
