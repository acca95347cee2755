pub mod math;
pub mod number;
pub mod pair;
pub mod schedule;

/// Decimal precision of the chain's native coins (`uusd`, `uluna`, ...).
///
/// Sale tokens carry their own precision in their cw20 token info and must
/// never be assumed to share this one.
pub const NATIVE_DECIMALS: u32 = 6;
