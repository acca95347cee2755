//! The trade-form state machine.
//!
//! One [`SwapForm`] instance backs one trade form. Input edges (amount
//! keystrokes, asset reversal, "max") schedule a forward or reverse
//! simulation and hand back a sequence-tagged [`SimulationTicket`]; the
//! caller debounces for [`SIMULATION_DEBOUNCE`] and then drives
//! [`SwapForm::simulate`] with the ticket. A ticket whose sequence number
//! has been overtaken by newer input is a no-op, so late-arriving rounds can
//! never clobber fresher state; everything else is serialized through the
//! form's exclusive borrow.

use std::time::Duration;

use cosmrs::AccountId;
use cosmwasm_std::{Decimal, SignedDecimal, Uint128};
use cw20::TokenInfoResponse;
use log::debug;

use bootswap_chain_client_utils::sale_querier::SaleQuerier;
use bootswap_lbp_utils::{
    number::{format_base_amount, native_token_symbol, parse_display_amount},
    pair::{AssetInfo, PairInfo},
    NATIVE_DECIMALS,
};

use crate::error::SwapError;
use crate::fee::{fee_for_max_native_token, max_native_swap_amount};
use crate::msg::{
    build_swap_from_contract_token_msg, build_swap_from_native_token_msg, PendingTransaction,
};
use crate::sink::{ExceptionSink, LogSink};

/// How long the caller lets the input settle before running the scheduled
/// simulation. Newer input within the window supersedes the ticket.
pub const SIMULATION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Which side of the pair a form slot holds. Deliberately not an index into
/// the pair's asset list; sides are resolved by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Native,
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationKind {
    /// "from" changed: project the "to" amount.
    Forward,
    /// "to" changed: back out the "from" amount.
    Reverse,
}

/// Handle for one scheduled simulation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTicket {
    kind: SimulationKind,
    seq: u64,
}

/// User-visible form errors. Balance errors block submission but not the
/// simulated numbers; the rest clear them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Not enough {0}")]
    InsufficientBalance(String),
    #[error("Simulation failed")]
    SimulationFailed,
    #[error("Failed to estimate fees")]
    FeeEstimationFailed,
    #[error("Unable to swap max balance")]
    MaxBalanceFailed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Balances {
    pub native: Uint128,
    pub token: Uint128,
}

pub struct SwapForm {
    pair: PairInfo,
    sale_token: TokenInfoResponse,
    wallet: AccountId,
    native_denom: String,
    token_addr: String,

    from_asset: AssetKind,
    to_asset: AssetKind,
    from_amount: String,
    to_amount: String,
    balances: Balances,
    spot_price: Decimal,
    price_impact: Option<SignedDecimal>,
    pending_tx: Option<PendingTransaction>,
    /// Fee backed out of the wallet balance by "max"; reused instead of
    /// re-estimating until the user edits the from side again.
    max_native_fee: Option<cosmrs::tx::Fee>,
    error: Option<FormError>,
    simulating: bool,
    seq: u64,

    sink: Box<dyn ExceptionSink + Send + Sync>,
}

impl SwapForm {
    pub fn new(
        pair: PairInfo,
        sale_token: TokenInfoResponse,
        wallet: AccountId,
        spot_price: Decimal,
    ) -> Result<Self, SwapError> {
        let native_denom = pair.native_denom()?.to_string();
        let token_addr = pair.sale_token_addr()?.to_string();

        Ok(Self {
            pair,
            sale_token,
            wallet,
            native_denom,
            token_addr,
            from_asset: AssetKind::Native,
            to_asset: AssetKind::Token,
            from_amount: String::new(),
            to_amount: String::new(),
            balances: Balances::default(),
            spot_price,
            price_impact: None,
            pending_tx: None,
            max_native_fee: None,
            error: None,
            simulating: false,
            seq: 0,
            sink: Box::new(LogSink),
        })
    }

    pub fn with_sink(mut self, sink: Box<dyn ExceptionSink + Send + Sync>) -> Self {
        self.sink = sink;
        self
    }

    pub fn from_amount(&self) -> &str {
        &self.from_amount
    }

    pub fn to_amount(&self) -> &str {
        &self.to_amount
    }

    pub fn from_asset(&self) -> AssetKind {
        self.from_asset
    }

    pub fn to_asset(&self) -> AssetKind {
        self.to_asset
    }

    pub fn balances(&self) -> Balances {
        self.balances
    }

    pub fn price_impact(&self) -> Option<SignedDecimal> {
        self.price_impact
    }

    pub fn pending_transaction(&self) -> Option<&PendingTransaction> {
        self.pending_tx.as_ref()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn simulating(&self) -> bool {
        self.simulating
    }

    pub fn wallet(&self) -> &AccountId {
        &self.wallet
    }

    pub fn can_submit(&self) -> bool {
        !self.simulating && self.error.is_none() && self.pending_tx.is_some()
    }

    /// Spot price is owned by the caller's pool-refresh cadence.
    pub fn set_spot_price(&mut self, spot_price: Decimal) {
        self.spot_price = spot_price;
    }

    pub async fn refresh_balances<Q>(&mut self, querier: &Q) -> Result<(), SwapError>
    where
        Q: SaleQuerier + Sync,
    {
        let native = querier
            .native_balance(self.wallet.as_ref(), &self.native_denom)
            .await?;
        let token = querier
            .token_balance(&self.token_addr, self.wallet.as_ref())
            .await?;

        self.balances = Balances { native, token };
        Ok(())
    }

    /// "from" amount edited; schedules a forward simulation.
    pub fn input_from_amount(&mut self, amount: &str) -> SimulationTicket {
        // hand-edited input is no longer the calculated max
        self.max_native_fee = None;
        self.from_amount = amount.to_string();
        self.schedule(SimulationKind::Forward)
    }

    /// "to" amount edited; schedules a reverse simulation.
    pub fn input_to_amount(&mut self, amount: &str) -> SimulationTicket {
        self.to_amount = amount.to_string();
        self.schedule(SimulationKind::Reverse)
    }

    /// Swap the from and to sides. The prior "to" amount becomes the new
    /// "from" amount and is immediately re-simulated forward; showing the
    /// stale numbers against the reversed pairing is never acceptable.
    pub fn reverse_assets(&mut self) -> SimulationTicket {
        self.max_native_fee = None;
        std::mem::swap(&mut self.from_asset, &mut self.to_asset);
        self.from_amount = std::mem::take(&mut self.to_amount);
        self.schedule(SimulationKind::Forward)
    }

    /// Fill the "from" side with the whole wallet balance. For the native
    /// side the swappable amount is the balance net of gas and tax (see
    /// [`fee_for_max_native_token`]); fees are paid in the native coin, so
    /// the token side can simply use the full token balance.
    ///
    /// `None` means the max amount could not be computed; the form carries
    /// the user-visible error.
    pub async fn select_max_from_asset<Q>(&mut self, querier: &Q) -> Option<SimulationTicket>
    where
        Q: SaleQuerier + Sync,
    {
        self.error = None;

        let (amount, display_decimals) = match self.from_asset {
            AssetKind::Native => {
                let fee = match fee_for_max_native_token(
                    querier,
                    &self.pair,
                    &self.wallet,
                    self.balances.native,
                )
                .await
                {
                    Ok(fee) => fee,
                    Err(err) => {
                        self.sink.report(&err);
                        self.error = Some(FormError::MaxBalanceFailed);
                        return None;
                    }
                };

                let max =
                    match max_native_swap_amount(self.balances.native, &fee, &self.native_denom) {
                        Ok(max) => max,
                        Err(err) => {
                            self.sink.report(&err);
                            self.error = Some(FormError::MaxBalanceFailed);
                            return None;
                        }
                    };

                self.max_native_fee = Some(fee);
                (max, NATIVE_DECIMALS)
            }
            AssetKind::Token => (self.balances.token, self.decimals(AssetKind::Token)),
        };

        let Some(display) = format_base_amount(amount, display_decimals) else {
            self.error = Some(FormError::MaxBalanceFailed);
            return None;
        };
        self.from_amount = display;

        Some(self.schedule(SimulationKind::Forward))
    }

    /// Clears everything a submitted or abandoned trade leaves behind.
    pub fn reset(&mut self) {
        self.from_amount.clear();
        self.to_amount.clear();
        self.price_impact = None;
        self.pending_tx = None;
        self.max_native_fee = None;
        self.error = None;
        self.simulating = false;
    }

    fn schedule(&mut self, kind: SimulationKind) -> SimulationTicket {
        self.seq += 1;
        self.simulating = true;
        SimulationTicket {
            kind,
            seq: self.seq,
        }
    }

    /// Runs the simulation a ticket was issued for. Stale tickets (newer
    /// input has been scheduled since) are discarded without touching any
    /// state.
    pub async fn simulate<Q>(&mut self, querier: &Q, ticket: SimulationTicket)
    where
        Q: SaleQuerier + Sync,
    {
        if ticket.seq != self.seq {
            debug!("discarding superseded simulation (seq {})", ticket.seq);
            return;
        }

        self.error = None;

        let (input_kind, output_kind) = match ticket.kind {
            SimulationKind::Forward => (self.from_asset, self.to_asset),
            SimulationKind::Reverse => (self.to_asset, self.from_asset),
        };
        let input_amount = match ticket.kind {
            SimulationKind::Forward => self.from_amount.clone(),
            SimulationKind::Reverse => self.to_amount.clone(),
        };

        // unparseable or sub-minimum input clears the other side, silently
        let input_base = parse_display_amount(&input_amount, self.decimals(input_kind));
        let Some(input_base) = input_base.filter(|amount| !amount.is_zero()) else {
            self.clear_output(ticket.kind);
            self.reset_simulation_state();
            return;
        };

        let pair_addr = self.pair.contract_addr.to_string();
        let request_asset = self.asset_info(input_kind);

        let simulated = match ticket.kind {
            SimulationKind::Forward => querier
                .simulation(&pair_addr, input_base, request_asset)
                .await
                .map(|result| result.return_amount),
            SimulationKind::Reverse => querier
                .reverse_simulation(&pair_addr, input_base, request_asset)
                .await
                .map(|result| result.offer_amount),
        };

        let output_base = match simulated {
            Ok(amount) => amount,
            Err(err) => {
                self.sink.report(&err);
                self.clear_output(ticket.kind);
                self.reset_simulation_state();
                self.error = Some(FormError::SimulationFailed);
                return;
            }
        };

        let Some(display) = format_base_amount(output_base, self.decimals(output_kind)) else {
            self.sink.report(&SwapError::AmountRange);
            self.clear_output(ticket.kind);
            self.reset_simulation_state();
            self.error = Some(FormError::SimulationFailed);
            return;
        };
        match ticket.kind {
            SimulationKind::Forward => self.to_amount = display,
            SimulationKind::Reverse => self.from_amount = display,
        }

        self.price_impact = self.compute_price_impact(input_kind, input_base, output_base);

        // the balance check applies to whichever side is being spent
        let from_base = match ticket.kind {
            SimulationKind::Forward => input_base,
            SimulationKind::Reverse => output_base,
        };
        if from_base > self.balance(self.from_asset) {
            // keep the simulated numbers visible; just block the trade
            self.pending_tx = None;
            self.error = Some(FormError::InsufficientBalance(
                self.symbol(self.from_asset),
            ));
            self.simulating = false;
            return;
        }

        match self.build_pending(querier, from_base).await {
            Ok(pending) => self.pending_tx = Some(pending),
            Err(err) => {
                self.sink.report(&err);
                self.pending_tx = None;
                self.error = Some(FormError::FeeEstimationFailed);
            }
        }

        self.simulating = false;
    }

    async fn build_pending<Q>(
        &self,
        querier: &Q,
        from_amount: Uint128,
    ) -> Result<PendingTransaction, SwapError>
    where
        Q: SaleQuerier + Sync,
    {
        let msg = match self.from_asset {
            AssetKind::Native => {
                build_swap_from_native_token_msg(&self.pair, &self.wallet, from_amount)?
            }
            AssetKind::Token => {
                build_swap_from_contract_token_msg(&self.pair, &self.wallet, from_amount)?
            }
        };

        // "max" already backed the fee out of the wallet balance
        if let Some(fee) = &self.max_native_fee {
            return Ok(PendingTransaction {
                msg,
                fee: fee.clone(),
            });
        }

        let fee = querier.estimate_fee(msg.clone()).await?;
        Ok(PendingTransaction { msg, fee })
    }

    fn compute_price_impact(
        &self,
        input_kind: AssetKind,
        input_base: Uint128,
        output_base: Uint128,
    ) -> Option<SignedDecimal> {
        let input = Decimal::from_atomics(input_base, self.decimals(input_kind)).ok()?;
        let output = Decimal::from_atomics(
            output_base,
            self.decimals(match input_kind {
                AssetKind::Native => AssetKind::Token,
                AssetKind::Token => AssetKind::Native,
            }),
        )
        .ok()?;

        // simulated price is always native-per-token
        let simulated_price = match input_kind {
            AssetKind::Native => input.checked_div(output).ok()?,
            AssetKind::Token => output.checked_div(input).ok()?,
        };

        let simulated = SignedDecimal::try_from(simulated_price).ok()?;
        let spot = SignedDecimal::try_from(self.spot_price).ok()?;
        if spot.is_zero() {
            return None;
        }

        simulated.checked_sub(spot).ok()?.checked_div(spot).ok()
    }

    fn reset_simulation_state(&mut self) {
        self.price_impact = None;
        self.pending_tx = None;
        self.max_native_fee = None;
        self.simulating = false;
    }

    fn clear_output(&mut self, kind: SimulationKind) {
        match kind {
            SimulationKind::Forward => self.to_amount.clear(),
            SimulationKind::Reverse => self.from_amount.clear(),
        }
    }

    fn decimals(&self, kind: AssetKind) -> u32 {
        match kind {
            AssetKind::Native => NATIVE_DECIMALS,
            AssetKind::Token => u32::from(self.sale_token.decimals),
        }
    }

    fn symbol(&self, kind: AssetKind) -> String {
        match kind {
            AssetKind::Native => native_token_symbol(&self.native_denom)
                .unwrap_or(&self.native_denom)
                .to_string(),
            AssetKind::Token => self.sale_token.symbol.clone(),
        }
    }

    fn balance(&self, kind: AssetKind) -> Uint128 {
        match kind {
            AssetKind::Native => self.balances.native,
            AssetKind::Token => self.balances.token,
        }
    }

    fn asset_info(&self, kind: AssetKind) -> AssetInfo {
        match kind {
            AssetKind::Native => AssetInfo::NativeToken {
                denom: self.native_denom.clone(),
            },
            AssetKind::Token => AssetInfo::Token {
                contract_addr: cosmwasm_std::Addr::unchecked(&self.token_addr),
            },
        }
    }
}
