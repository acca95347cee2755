//! Sale-window helpers: classify pairs against the clock and interpolate the
//! weight curve between its endpoints.

use cosmwasm_std::{Decimal, Uint128};

use crate::pair::{PairInfo, WeightedAssetInfo};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScheduleError {
    #[error("weight out of representable range")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleStatus {
    Scheduled,
    Live,
    Completed,
}

/// Where a pair's sale window sits relative to `now` (unix seconds).
pub fn sale_status(pair: &PairInfo, now: u64) -> SaleStatus {
    if now < pair.start_time {
        SaleStatus::Scheduled
    } else if now < pair.end_time {
        SaleStatus::Live
    } else {
        SaleStatus::Completed
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartitionedSales {
    pub scheduled: Vec<PairInfo>,
    pub live: Vec<PairInfo>,
    pub completed: Vec<PairInfo>,
}

/// Split a factory listing into scheduled, live and completed sales.
pub fn partition_sales(pairs: Vec<PairInfo>, now: u64) -> PartitionedSales {
    let mut partitioned = PartitionedSales::default();

    for pair in pairs {
        match sale_status(&pair, now) {
            SaleStatus::Scheduled => partitioned.scheduled.push(pair),
            SaleStatus::Live => partitioned.live.push(pair),
            SaleStatus::Completed => partitioned.completed.push(pair),
        }
    }

    partitioned
}

/// A side's weight at `now`, linearly interpolated between its start and end
/// weights over the sale window and clamped outside it.
///
/// This is the display/charting approximation of the curve. Live pricing
/// reads the weights the pair itself reports via a zero-amount simulation.
pub fn interpolated_weight(
    asset: &WeightedAssetInfo,
    start_time: u64,
    end_time: u64,
    now: u64,
) -> Result<Decimal, ScheduleError> {
    let start = weight_decimal(asset.start_weight)?;
    let end = weight_decimal(asset.end_weight)?;

    if end_time <= start_time || now <= start_time {
        return Ok(start);
    }
    if now >= end_time {
        return Ok(end);
    }

    let progress = Decimal::checked_from_ratio(now - start_time, end_time - start_time)
        .map_err(|_| ScheduleError::OutOfRange)?;

    // Weights move monotonically between the endpoints, in either direction.
    let travelled = if end >= start {
        (end - start)
            .checked_mul(progress)
            .map_err(|_| ScheduleError::OutOfRange)?
    } else {
        (start - end)
            .checked_mul(progress)
            .map_err(|_| ScheduleError::OutOfRange)?
    };

    if end >= start {
        start.checked_add(travelled).map_err(|_| ScheduleError::OutOfRange)
    } else {
        start.checked_sub(travelled).map_err(|_| ScheduleError::OutOfRange)
    }
}

fn weight_decimal(weight: Uint128) -> Result<Decimal, ScheduleError> {
    Decimal::from_atomics(weight, 0).map_err(|_| ScheduleError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::Addr;
    use std::str::FromStr;

    use super::*;
    use crate::pair::AssetInfo;

    fn pair(start_time: u64, end_time: u64) -> PairInfo {
        PairInfo {
            asset_infos: [
                WeightedAssetInfo {
                    info: AssetInfo::NativeToken {
                        denom: "uusd".to_string(),
                    },
                    start_weight: Uint128::new(2),
                    end_weight: Uint128::new(60),
                },
                WeightedAssetInfo {
                    info: AssetInfo::Token {
                        contract_addr: Addr::unchecked("terra1token"),
                    },
                    start_weight: Uint128::new(98),
                    end_weight: Uint128::new(40),
                },
            ],
            contract_addr: Addr::unchecked("terra1pair"),
            liquidity_token: Addr::unchecked("terra1lp"),
            start_time,
            end_time,
        }
    }

    #[test]
    fn classifies_sales_against_the_clock() {
        let sale = pair(100, 200);

        assert_eq!(sale_status(&sale, 99), SaleStatus::Scheduled);
        assert_eq!(sale_status(&sale, 100), SaleStatus::Live);
        assert_eq!(sale_status(&sale, 199), SaleStatus::Live);
        assert_eq!(sale_status(&sale, 200), SaleStatus::Completed);
    }

    #[test]
    fn partitions_factory_listing() {
        let listing = vec![pair(100, 200), pair(300, 400), pair(10, 50)];

        let partitioned = partition_sales(listing, 150);

        assert_eq!(partitioned.live, vec![pair(100, 200)]);
        assert_eq!(partitioned.scheduled, vec![pair(300, 400)]);
        assert_eq!(partitioned.completed, vec![pair(10, 50)]);
    }

    #[test]
    fn interpolates_rising_and_falling_weights() {
        let sale = pair(0, 1000);
        let native = sale.native_asset_info().unwrap();
        let token = sale.sale_asset_info().unwrap();

        // native goes 2 -> 60, token 98 -> 40
        assert_eq!(
            interpolated_weight(native, 0, 1000, 500).unwrap(),
            Decimal::from_str("31").unwrap()
        );
        assert_eq!(
            interpolated_weight(token, 0, 1000, 500).unwrap(),
            Decimal::from_str("69").unwrap()
        );
    }

    #[test]
    fn clamps_outside_the_sale_window() {
        let sale = pair(100, 200);
        let native = sale.native_asset_info().unwrap();

        assert_eq!(
            interpolated_weight(native, 100, 200, 50).unwrap(),
            Decimal::from_str("2").unwrap()
        );
        assert_eq!(
            interpolated_weight(native, 100, 200, 500).unwrap(),
            Decimal::from_str("60").unwrap()
        );
    }
}
