//! Getting a pending transaction onto the chain and watching it land.

use std::time::Duration;

use async_trait::async_trait;
use cosmrs::{cosmwasm::MsgExecuteContract, tx::Fee};

use bootswap_chain_client_utils::{
    common::{error::ChainClientError, transaction::TransactionResponse},
    cosmos::{base_client::BaseClient, wasm_client::WasmClient},
    sale_querier::SaleQuerier,
    terra::TerraClient,
};

use crate::error::SwapError;
use crate::fee::sufficient_balance;
use crate::form::SwapForm;

/// How a tracked transaction settles: spacing and budget of the lookup
/// polling. The budget keeps a transaction that never lands from pinning
/// the form in a polling loop forever.
pub const TRACK_INTERVAL: Duration = Duration::from_secs(5);
pub const TRACK_MAX_ATTEMPTS: u32 = 60;

/// The write interface the engine needs from the chain: broadcast a signed
/// swap and look it up by hash.
#[async_trait]
pub trait SwapSubmitter {
    async fn broadcast_swap(
        &self,
        msg: MsgExecuteContract,
        fee: Fee,
    ) -> Result<TransactionResponse, ChainClientError>;

    async fn find_swap_tx(
        &self,
        tx_hash: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<TransactionResponse, ChainClientError>;
}

#[async_trait]
impl SwapSubmitter for TerraClient {
    async fn broadcast_swap(
        &self,
        msg: MsgExecuteContract,
        fee: Fee,
    ) -> Result<TransactionResponse, ChainClientError> {
        self.broadcast_execute(msg, fee).await
    }

    async fn find_swap_tx(
        &self,
        tx_hash: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<TransactionResponse, ChainClientError> {
        let tx_response = self.poll_for_tx(tx_hash, interval, max_attempts).await?;

        TransactionResponse::try_from(tx_response)
    }
}

/// Terminal states of [`track_transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// On chain; balances have been refreshed.
    Confirmed { hash: String, height: u64 },
    /// Not seen within the polling budget. Terminal for the UI; the
    /// transaction itself may still land later.
    StillPending { hash: String },
}

/// Validates and broadcasts the form's pending transaction, then resets the
/// form for the next trade. The caller keeps the returned hash to track.
pub async fn submit<C>(client: &C, form: &mut SwapForm) -> Result<TransactionResponse, SwapError>
where
    C: SaleQuerier + SwapSubmitter + Sync,
{
    let Some(pending) = form.pending_transaction().cloned() else {
        return Err(SwapError::NothingToSubmit);
    };
    if form.error().is_some() || form.simulating() {
        return Err(SwapError::NothingToSubmit);
    }

    if !sufficient_balance(client, form.wallet(), &pending).await? {
        return Err(SwapError::InsufficientFunds);
    }

    let response = client.broadcast_swap(pending.msg, pending.fee).await?;

    form.reset();

    Ok(response)
}

/// Polls until the submitted transaction is found, then refreshes the
/// form's balances. Exhausting the budget is the distinct
/// [`TxStatus::StillPending`] outcome, not an error.
pub async fn track_transaction<C>(
    client: &C,
    form: &mut SwapForm,
    tx_hash: &str,
) -> Result<TxStatus, SwapError>
where
    C: SaleQuerier + SwapSubmitter + Sync,
{
    match client
        .find_swap_tx(tx_hash, TRACK_INTERVAL, TRACK_MAX_ATTEMPTS)
        .await
    {
        Ok(response) => {
            form.refresh_balances(client).await?;
            Ok(TxStatus::Confirmed {
                hash: response.hash,
                height: response.block_height,
            })
        }
        Err(ChainClientError::TransactionPending(hash)) => Ok(TxStatus::StillPending { hash }),
        Err(err) => Err(err.into()),
    }
}
