//! Fresh spot price for a pair: reserves from the pool query, weights from a
//! zero-amount simulation, combined through the weighted-pool formula.
//!
//! Callers re-query on a bounded cadence (30s works well) and on pair
//! changes; nothing is cached here.

use std::time::Duration;

use cosmwasm_std::Decimal;

use bootswap_chain_client_utils::sale_querier::SaleQuerier;
use bootswap_lbp_utils::{math::calc_price, pair::PairInfo};

use crate::error::SwapError;

/// How often the UI should refresh pool snapshots and the spot price.
pub const POOL_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

pub async fn query_spot_price<Q>(
    querier: &Q,
    pair: &PairInfo,
    token_decimals: u32,
) -> Result<Decimal, SwapError>
where
    Q: SaleQuerier + Sync,
{
    let pair_addr = pair.contract_addr.as_str();
    let native_denom = pair.native_denom()?;

    let pool = querier.pool(pair_addr).await?;
    let (native_weight, token_weight) = querier.weights(pair_addr, native_denom).await?;

    let native_reserve = pool.native_asset()?.amount;
    let token_reserve = pool.sale_asset()?.amount;

    calc_price(
        native_reserve,
        token_reserve,
        native_weight,
        token_weight,
        token_decimals,
    )
    .map_err(|_| SwapError::AmountRange)
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::Uint128;
    use std::str::FromStr;

    use super::*;
    use crate::test_mocks::MockChain;
    use crate::test_mocks::test_pair;

    #[tokio::test]
    async fn combines_pool_reserves_with_simulated_weights() {
        let chain = MockChain::new()
            .with_pool(Uint128::new(50_000_000), Uint128::new(2_450_000_000))
            .with_weights(
                Decimal::from_str("5.8").unwrap(),
                Decimal::from_str("94.2").unwrap(),
            );

        let price = query_spot_price(&chain, &test_pair(), 6).await.unwrap();

        let expected = calc_price(
            Uint128::new(50_000_000),
            Uint128::new(2_450_000_000),
            Decimal::from_str("5.8").unwrap(),
            Decimal::from_str("94.2").unwrap(),
            6,
        )
        .unwrap();
        assert_eq!(price, expected);
    }
}
