//! The swap side of the LBP sale frontend: everything between a keystroke in
//! the trade form and a broadcast transaction.
//!
//! The engine is UI-agnostic. It consumes the chain through the
//! [`bootswap_chain_client_utils::sale_querier::SaleQuerier`] read interface
//! and the [`submit::SwapSubmitter`] write interface, and exposes the
//! [`form::SwapForm`] state machine plus the pure message builders and the
//! fee/tax arithmetic the form runs on.

pub mod error;
pub mod fee;
pub mod form;
pub mod msg;
pub mod sink;
pub mod spot;
pub mod submit;

#[cfg(test)]
pub(crate) mod test_mocks;
