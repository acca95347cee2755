use std::time::Duration;

use async_trait::async_trait;
use cosmos_sdk_proto::cosmos::{
    bank::v1beta1::{QueryBalanceRequest, QueryBalanceResponse},
    base::abci::v1beta1::TxResponse,
    tx::v1beta1::GetTxRequest,
};
use cosmwasm_std::Uint128;
use log::debug;
use tonic::Request;

use crate::common::error::ChainClientError;

use super::{grpc_client::GrpcSigningClient, BankQueryClient, CosmosServiceClient};

/// base client trait with default implementations for cosmos-sdk based
/// clients: bank balances and transaction lookup.
#[async_trait]
pub trait BaseClient: GrpcSigningClient {
    /// Bank balance of `denom` held by `address`. An account that holds none
    /// of the denom is a zero balance, not an error.
    async fn query_balance(&self, address: &str, denom: &str) -> Result<Uint128, ChainClientError> {
        let channel = self.get_grpc_channel().await?;

        let mut grpc_client = BankQueryClient::new(channel);

        let request = QueryBalanceRequest {
            address: address.to_string(),
            denom: denom.to_string(),
        };

        let response: QueryBalanceResponse = grpc_client
            .balance(Request::new(request))
            .await?
            .into_inner();

        let amount = match response.balance {
            Some(coin) => coin.amount.parse::<u128>()?,
            None => 0,
        };

        Ok(Uint128::new(amount))
    }

    /// Polls for a broadcast transaction until it is found on chain, for at
    /// most `max_attempts` rounds spaced `interval` apart. Exhausting the
    /// budget yields [`ChainClientError::TransactionPending`]; the caller
    /// decides whether that is terminal.
    async fn poll_for_tx(
        &self,
        tx_hash: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<TxResponse, ChainClientError> {
        let channel = self.get_grpc_channel().await?;

        let mut grpc_client = CosmosServiceClient::new(channel);

        let request = GetTxRequest {
            hash: tx_hash.to_string(),
        };

        // tokio timing utils instead of system sleeps to not block the
        // calling event loop.
        let mut ticker = tokio::time::interval(interval);
        for _ in 0..max_attempts {
            ticker.tick().await;
            match grpc_client.get_tx(request.clone()).await {
                Ok(response) => {
                    if let Some(tx_response) = response.into_inner().tx_response {
                        return Ok(tx_response);
                    }
                }
                Err(status) => match status.code() {
                    // tx not indexed yet, keep polling
                    tonic::Code::NotFound => {
                        debug!("tx {tx_hash} not found yet, retrying");
                        continue;
                    }
                    _ => return Err(status.into()),
                },
            };
        }

        Err(ChainClientError::TransactionPending(tx_hash.to_string()))
    }
}
