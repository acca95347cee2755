//! Gas and stability-tax arithmetic.
//!
//! Swapping the entire native balance cannot just estimate a fee for the
//! full amount: the fee comes out of the same balance. The amount is backed
//! out instead: estimate gas on a nominal swap, then solve for the largest
//! spendable amount whose tax still fits in what is left.

use std::collections::BTreeMap;

use cosmrs::{tx::Fee, AccountId, Coin};
use cosmwasm_std::{Decimal, Uint128};
use cw20::Cw20ExecuteMsg;

use bootswap_chain_client_utils::sale_querier::SaleQuerier;
use bootswap_lbp_utils::pair::PairInfo;

use crate::error::SwapError;
use crate::msg::{build_swap_from_native_token_msg, PendingTransaction};

/// Fee to attach when swapping the wallet's entire native balance.
///
/// Best-effort by construction: gas is estimated on a 1-base-unit swap and
/// the tax is solved algebraically, so the result can be off by a unit when
/// the node's own rounding disagrees. The guarantees that DO hold: the fee
/// never exceeds the balance, and `balance - fee` is the exact amount to
/// offer so that amount + fee consumes the whole balance.
///
/// With `remaining = balance - gas`, the offered amount `a` must satisfy
/// `a + tax(a) = remaining` where `tax(a) = min(a * rate, cap)`:
///   - uncapped: `tax = ceil(remaining * rate / (1 + rate))`
///   - capped:   `tax = cap` (so the offerable amount is `remaining - cap`)
pub async fn fee_for_max_native_token<Q>(
    querier: &Q,
    pair: &PairInfo,
    wallet: &AccountId,
    native_balance: Uint128,
) -> Result<Fee, SwapError>
where
    Q: SaleQuerier + Sync,
{
    let denom = pair.native_denom()?;

    // nominal 1-unit swap: realistic gas without meaningful tax
    let probe = build_swap_from_native_token_msg(pair, wallet, Uint128::one())?;
    let gas_fee = querier.estimate_fee(probe).await?;

    let gas_amount = fee_coin_amount(&gas_fee, denom)?;
    let remaining = native_balance
        .checked_sub(gas_amount)
        .map_err(|_| SwapError::FeeExceedsBalance)?;

    let tax_rate = querier.tax_rate().await?;
    let tax_cap = querier.tax_cap(denom).await?;

    let uncapped_tax = Decimal::from_atomics(remaining, 0)
        .map_err(|_| SwapError::AmountRange)?
        .checked_mul(tax_rate)
        .map_err(|_| SwapError::AmountRange)?
        .checked_div(
            Decimal::one()
                .checked_add(tax_rate)
                .map_err(|_| SwapError::AmountRange)?,
        )
        .map_err(|_| SwapError::AmountRange)?
        .to_uint_ceil();

    let tax = uncapped_tax.min(tax_cap);

    let total = gas_amount
        .checked_add(tax)
        .map_err(|_| SwapError::AmountRange)?;

    Ok(Fee::from_amount_and_gas(
        Coin {
            denom: denom.parse()?,
            amount: total.u128(),
        },
        gas_fee.gas_limit,
    ))
}

/// The amount left to offer once `fee` is carved out of `balance`.
pub fn max_native_swap_amount(
    balance: Uint128,
    fee: &Fee,
    denom: &str,
) -> Result<Uint128, SwapError> {
    balance
        .checked_sub(fee_coin_amount(fee, denom)?)
        .map_err(|_| SwapError::FeeExceedsBalance)
}

pub(crate) fn fee_coin_amount(fee: &Fee, denom: &str) -> Result<Uint128, SwapError> {
    fee.amount
        .iter()
        .find(|coin| coin.denom.as_ref() == denom)
        .map(|coin| Uint128::new(coin.amount))
        .ok_or_else(|| SwapError::MissingFeeCoin(denom.to_string()))
}

/// Whether the wallet can actually pay for a pending transaction: every
/// native coin required by the fee plus the message funds, and for a cw20
/// send also the token balance behind the sent amount. False on the first
/// shortfall.
pub async fn sufficient_balance<Q>(
    querier: &Q,
    wallet: &AccountId,
    pending: &PendingTransaction,
) -> Result<bool, SwapError>
where
    Q: SaleQuerier + Sync,
{
    let mut required: BTreeMap<String, Uint128> = BTreeMap::new();
    for coin in pending.fee.amount.iter().chain(pending.msg.funds.iter()) {
        let entry = required.entry(coin.denom.to_string()).or_default();
        *entry = entry
            .checked_add(Uint128::new(coin.amount))
            .map_err(|_| SwapError::AmountRange)?;
    }

    for (denom, amount) in required {
        let balance = querier.native_balance(wallet.as_ref(), &denom).await?;
        if balance < amount {
            return Ok(false);
        }
    }

    if let Ok(Cw20ExecuteMsg::Send { amount, .. }) = serde_json::from_slice(&pending.msg.msg) {
        let balance = querier
            .token_balance(pending.msg.contract.as_ref(), wallet.as_ref())
            .await?;
        if balance < amount {
            return Ok(false);
        }
    }

    Ok(true)
}
