// The LBP factory and pair contracts predate the API types published on
// crates.io for current AMMs, so the messages we exchange with them are
// redefined here with CosmWasm 2.x types.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal, Uint128};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PairError {
    #[error("pair has no native token side")]
    MissingNativeSide,
    #[error("pair has no contract token side")]
    MissingTokenSide,
}

/// This enum describes an asset on the chain (native coin or CW20 token).
#[cw_serde]
#[derive(Hash, Eq)]
pub enum AssetInfo {
    /// Non-native token
    Token { contract_addr: Addr },
    /// Native coin
    NativeToken { denom: String },
}

impl AssetInfo {
    pub fn is_native(&self) -> bool {
        matches!(self, AssetInfo::NativeToken { .. })
    }
}

/// An asset paired with an amount in the asset's smallest unit.
#[cw_serde]
pub struct Asset {
    pub info: AssetInfo,
    pub amount: Uint128,
}

/// One side of an LBP pair: the asset plus its weight at the start and end
/// of the sale window. Weights are integer percentages.
#[cw_serde]
pub struct WeightedAssetInfo {
    pub info: AssetInfo,
    pub start_weight: Uint128,
    pub end_weight: Uint128,
}

/// One side of a live pool snapshot: a [`WeightedAssetInfo`] plus the
/// current reserve amount.
#[cw_serde]
pub struct WeightedAsset {
    pub info: AssetInfo,
    pub amount: Uint128,
    pub start_weight: Uint128,
    pub end_weight: Uint128,
}

/// The main parameters of an LBP pair.
///
/// The order of `asset_infos` is NOT guaranteed by the factory. Callers must
/// discover the native and sale sides through [`PairInfo::native_asset_info`]
/// and [`PairInfo::sale_asset_info`], never by position.
#[cw_serde]
pub struct PairInfo {
    pub asset_infos: [WeightedAssetInfo; 2],
    pub contract_addr: Addr,
    pub liquidity_token: Addr,
    /// Sale window start, unix seconds
    pub start_time: u64,
    /// Sale window end, unix seconds
    pub end_time: u64,
}

impl PairInfo {
    pub fn native_asset_info(&self) -> Result<&WeightedAssetInfo, PairError> {
        self.asset_infos
            .iter()
            .find(|asset| asset.info.is_native())
            .ok_or(PairError::MissingNativeSide)
    }

    pub fn sale_asset_info(&self) -> Result<&WeightedAssetInfo, PairError> {
        self.asset_infos
            .iter()
            .find(|asset| !asset.info.is_native())
            .ok_or(PairError::MissingTokenSide)
    }

    pub fn native_denom(&self) -> Result<&str, PairError> {
        match &self.native_asset_info()?.info {
            AssetInfo::NativeToken { denom } => Ok(denom),
            AssetInfo::Token { .. } => Err(PairError::MissingNativeSide),
        }
    }

    /// Contract address of the cw20 token being sold.
    pub fn sale_token_addr(&self) -> Result<&Addr, PairError> {
        match &self.sale_asset_info()?.info {
            AssetInfo::Token { contract_addr } => Ok(contract_addr),
            AssetInfo::NativeToken { .. } => Err(PairError::MissingTokenSide),
        }
    }
}

/// A live snapshot of a pair's reserves and issued LP shares.
#[cw_serde]
pub struct PoolResponse {
    pub assets: [WeightedAsset; 2],
    pub total_share: Uint128,
}

impl PoolResponse {
    pub fn native_asset(&self) -> Result<&WeightedAsset, PairError> {
        self.assets
            .iter()
            .find(|asset| asset.info.is_native())
            .ok_or(PairError::MissingNativeSide)
    }

    pub fn sale_asset(&self) -> Result<&WeightedAsset, PairError> {
        self.assets
            .iter()
            .find(|asset| !asset.info.is_native())
            .ok_or(PairError::MissingTokenSide)
    }
}

/// Result of a forward simulation: how much of the ask asset a given offer
/// yields. The pair also reports the weights in effect at `block_time`,
/// which is how current weights are read (with a zero offer amount).
#[cw_serde]
pub struct SimulationResponse {
    pub return_amount: Uint128,
    pub spread_amount: Uint128,
    pub commission_amount: Uint128,
    pub ask_weight: Decimal,
    pub offer_weight: Decimal,
}

/// Result of a reverse simulation: how much must be offered to receive a
/// given ask amount.
#[cw_serde]
pub struct ReverseSimulationResponse {
    pub offer_amount: Uint128,
    pub spread_amount: Uint128,
    pub commission_amount: Uint128,
    pub ask_weight: Decimal,
    pub offer_weight: Decimal,
}

#[cw_serde]
pub struct PairsResponse {
    pub pairs: Vec<PairInfo>,
}

/// Execute messages accepted by the pair contract. Swapping from the native
/// side attaches the offered coins as funds on the same message.
#[cw_serde]
pub enum ExecuteMsg {
    Swap {
        offer_asset: Asset,
        belief_price: Option<Decimal>,
        max_spread: Option<Decimal>,
        to: Option<String>,
    },
}

/// Payload embedded in a cw20 `send` to the pair contract. The pair inspects
/// it on receipt, so swapping from the token side needs no direct call.
#[cw_serde]
pub enum Cw20HookMsg {
    Swap {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PairInfo)]
    Pair {},
    #[returns(PoolResponse)]
    Pool {},
    #[returns(SimulationResponse)]
    Simulation { offer_asset: Asset, block_time: u64 },
    #[returns(ReverseSimulationResponse)]
    ReverseSimulation { ask_asset: Asset, block_time: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum FactoryQueryMsg {
    /// All pairs ever registered with the factory, scheduled or not.
    #[returns(PairsResponse)]
    Pairs {},
}
