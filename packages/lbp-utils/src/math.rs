use cosmwasm_std::{Decimal, Uint128};

use crate::NATIVE_DECIMALS;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PricingError {
    #[error("pool reserve or weight is zero")]
    ZeroPoolValue,
    #[error("price out of representable range")]
    OutOfRange,
}

/// Spot price of one sale-token unit in native-token units, from the
/// weighted constant-product formula:
///
/// ```text
/// price = (native_reserve / 10^6 / native_weight)
///       / (token_reserve / 10^token_decimals / token_weight)
/// ```
///
/// Reserves are base-unit amounts straight from the pool query. Weights are
/// the weights currently in effect (the pair interpolates them over the sale
/// window). `token_decimals` comes from the sale token's cw20 info; sale
/// tokens do not necessarily share the native 6-decimal precision.
pub fn calc_price(
    native_reserve: Uint128,
    token_reserve: Uint128,
    native_weight: Decimal,
    token_weight: Decimal,
    token_decimals: u32,
) -> Result<Decimal, PricingError> {
    if native_reserve.is_zero()
        || token_reserve.is_zero()
        || native_weight.is_zero()
        || token_weight.is_zero()
    {
        return Err(PricingError::ZeroPoolValue);
    }

    let native_units = Decimal::from_atomics(native_reserve, NATIVE_DECIMALS)
        .map_err(|_| PricingError::OutOfRange)?;
    let token_units = Decimal::from_atomics(token_reserve, token_decimals)
        .map_err(|_| PricingError::OutOfRange)?;

    let native_side = native_units
        .checked_div(native_weight)
        .map_err(|_| PricingError::OutOfRange)?;
    let token_side = token_units
        .checked_div(token_weight)
        .map_err(|_| PricingError::OutOfRange)?;

    native_side
        .checked_div(token_side)
        .map_err(|_| PricingError::OutOfRange)
}
