use std::str::FromStr;

use async_trait::async_trait;
use cosmrs::{tx::Fee, Coin};
use serde::{de::DeserializeOwned, Serialize};

use crate::common::{error::ChainClientError, transaction::TransactionResponse};
use log::debug;
use tonic::Request;

use super::{grpc_client::GrpcSigningClient, CosmosServiceClient, WasmQueryClient};

use cosmrs::{
    cosmwasm::MsgExecuteContract, proto::cosmwasm::wasm::v1::QuerySmartContractStateRequest,
    tx::Msg, AccountId,
};

/// wasm funcionality trait with default implementations for cosmos-sdk based
/// clients. the pair, factory and cw20 token contracts are all reached
/// through these two entry points.
#[async_trait]
pub trait WasmClient: GrpcSigningClient {
    async fn query_contract_state<T: DeserializeOwned>(
        &self,
        contract_address: &str,
        query_data: (impl Serialize + Send),
    ) -> Result<T, ChainClientError> {
        let channel = self.get_grpc_channel().await?;

        let mut grpc_client = WasmQueryClient::new(channel);

        let bin_query = serde_json::to_vec(&query_data)?;

        let request = QuerySmartContractStateRequest {
            address: contract_address.to_string(),
            query_data: bin_query,
        };

        let response = grpc_client
            .smart_contract_state(Request::new(request))
            .await?
            .into_inner();

        let parsed: T = serde_json::from_slice(&response.data)?;

        Ok(parsed)
    }

    /// Node-side fee estimation for a single prebuilt execute message.
    async fn estimate_execute_fee(
        &self,
        msg: &MsgExecuteContract,
    ) -> Result<Fee, ChainClientError> {
        let simulation_response = self.simulate_tx(msg.clone().to_any()?).await?;

        self.get_tx_fee(simulation_response)
    }

    /// Signs and broadcasts a prebuilt execute message with the given fee.
    async fn broadcast_execute(
        &self,
        msg: MsgExecuteContract,
        fee: Fee,
    ) -> Result<TransactionResponse, ChainClientError> {
        let signing_client = self.get_signing_client().await?;
        let channel = self.get_grpc_channel().await?;

        debug!("broadcasting execute to {}", msg.contract);

        let raw_tx = signing_client.create_tx(msg.to_any()?, fee, None).await?;

        let mut grpc_client = CosmosServiceClient::new(channel);

        let broadcast_tx_response = grpc_client.broadcast_tx(raw_tx).await?.into_inner();

        match broadcast_tx_response.tx_response {
            Some(tx_response) => TransactionResponse::try_from(tx_response),
            None => Err(ChainClientError::TransactionError("failed".to_string())),
        }
    }

    async fn execute_wasm(
        &self,
        contract: &str,
        msg: (impl Serialize + Send),
        funds: Vec<Coin>,
        fees: Option<Fee>,
    ) -> Result<TransactionResponse, ChainClientError> {
        let signing_client = self.get_signing_client().await?;

        let msg_bytes = serde_json::to_vec(&msg)?;

        let wasm_tx = MsgExecuteContract {
            sender: signing_client.address.clone(),
            contract: AccountId::from_str(contract)?,
            msg: msg_bytes,
            funds,
        };

        // if no fees were specified we simulate the tx and use the estimate
        let tx_fee = match fees {
            Some(fee) => fee,
            None => self.estimate_execute_fee(&wasm_tx).await?,
        };

        self.broadcast_execute(wasm_tx, tx_fee).await
    }
}
