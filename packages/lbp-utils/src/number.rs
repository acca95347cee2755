//! Conversions between user-facing decimal strings and base-unit amounts.
//!
//! Amounts entered in the swap form arrive as decimal strings and leave as
//! integer base units, and vice versa for simulation results. All conversion
//! goes through fixed-point [`Decimal`] atomics so no rounding drift can
//! creep in.

use std::str::FromStr;

use cosmwasm_std::{Decimal, Uint128};

/// Parse a display-precision decimal string into base units, flooring any
/// precision beyond `decimals`. Returns `None` for anything unparseable
/// (empty input, signs, exponents, more than 18 fractional digits).
pub fn parse_display_amount(input: &str, decimals: u32) -> Option<Uint128> {
    let value = Decimal::from_str(input.trim()).ok()?;

    let scale = Uint128::from(10u128.pow(Decimal::DECIMAL_PLACES - decimals));
    value.atomics().checked_div(scale).ok()
}

/// Render a base-unit amount as a display string in the asset's precision,
/// with insignificant zeroes already stripped ("2100", not "2100.00000").
/// `None` if the amount exceeds the representable decimal range.
pub fn format_base_amount(amount: Uint128, decimals: u32) -> Option<String> {
    Decimal::from_atomics(amount, decimals)
        .ok()
        .map(|value| value.to_string())
}

/// The smallest representable display amount of an asset, e.g. 0.000001 for
/// a 6-decimal asset. Input below this is not a swappable amount.
pub fn smallest_display_unit(decimals: u32) -> Decimal {
    Decimal::from_atomics(1u128, decimals).unwrap_or_else(|_| Decimal::raw(1))
}

/// Strip insignificant trailing zeroes from a decimal string:
/// "2000.123000" -> "2000.123", "2000.000" -> "2000". Integer strings pass
/// through untouched, and the operation is idempotent.
pub fn drop_insignificant_zeroes(input: &str) -> String {
    if !input.contains('.') {
        return input.to_string();
    }

    input.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Display symbols for the native coins sales are denominated in.
pub fn native_token_symbol(denom: &str) -> Option<&'static str> {
    match denom {
        "uusd" => Some("UST"),
        "uluna" => Some("LUNA"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_amounts_into_base_units() {
        assert_eq!(
            parse_display_amount("42", 6),
            Some(Uint128::new(42_000_000))
        );
        assert_eq!(
            parse_display_amount("0.5", 5),
            Some(Uint128::new(50_000))
        );
        // precision beyond the asset's decimals floors away
        assert_eq!(parse_display_amount("0.1234567", 6), Some(Uint128::new(123_456)));
        assert_eq!(parse_display_amount(" 7 ", 6), Some(Uint128::new(7_000_000)));
    }

    #[test]
    fn rejects_unparseable_input() {
        for input in ["", "abc", "1.2.3", "-4", "1e6"] {
            assert_eq!(parse_display_amount(input, 6), None, "input {input:?}");
        }
    }

    #[test]
    fn formats_base_amounts_without_insignificant_zeroes() {
        assert_eq!(format_base_amount(Uint128::new(210_000_000), 5).unwrap(), "2100");
        assert_eq!(format_base_amount(Uint128::new(123_450), 6).unwrap(), "0.12345");
        assert_eq!(format_base_amount(Uint128::zero(), 6).unwrap(), "0");
    }

    #[test]
    fn drops_insignificant_zeroes() {
        assert_eq!(drop_insignificant_zeroes("2000.123000"), "2000.123");
        assert_eq!(drop_insignificant_zeroes("2000.000"), "2000");
        assert_eq!(drop_insignificant_zeroes("2000"), "2000");
    }

    #[test]
    fn dropping_insignificant_zeroes_is_idempotent() {
        for input in ["2000.123000", "2000.000", "2000", "0.5", "1.010"] {
            let once = drop_insignificant_zeroes(input);
            assert_eq!(drop_insignificant_zeroes(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn smallest_unit_matches_precision() {
        assert_eq!(smallest_display_unit(6).to_string(), "0.000001");
        assert_eq!(smallest_display_unit(0).to_string(), "1");
    }
}
