//! Terra treasury module queries.
//!
//! The treasury module (stability tax rate and per-denom tax cap) is a Terra
//! extension with no types in `cosmos-sdk-proto`, so the four query messages
//! are defined here and dispatched as raw unary calls, the same way the
//! generated service clients do it.

use std::str::FromStr;

use async_trait::async_trait;
use cosmwasm_std::{Decimal, Uint128};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::{client::Grpc, codec::ProstCodec, Request};

use crate::common::error::ChainClientError;

use super::grpc_client::GrpcSigningClient;

const TAX_RATE_PATH: &str = "/terra.treasury.v1beta1.Query/TaxRate";
const TAX_CAP_PATH: &str = "/terra.treasury.v1beta1.Query/TaxCap";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryTaxRateRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryTaxRateResponse {
    /// Current stability tax rate, a decimal string.
    #[prost(string, tag = "1")]
    pub tax_rate: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryTaxCapRequest {
    #[prost(string, tag = "1")]
    pub denom: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryTaxCapResponse {
    /// Per-denom cap on the stability tax, in base units.
    #[prost(string, tag = "1")]
    pub tax_cap: ::prost::alloc::string::String,
}

/// treasury funcionality trait for terra-style chains that tax native-coin
/// transfers.
#[async_trait]
pub trait TreasuryClient: GrpcSigningClient {
    async fn query_tax_rate(&self) -> Result<Decimal, ChainClientError> {
        let channel = self.get_grpc_channel().await?;

        let mut grpc_client = Grpc::new(channel);
        grpc_client.ready().await?;

        let codec: ProstCodec<QueryTaxRateRequest, QueryTaxRateResponse> = ProstCodec::default();
        let response = grpc_client
            .unary(
                Request::new(QueryTaxRateRequest {}),
                PathAndQuery::from_static(TAX_RATE_PATH),
                codec,
            )
            .await?
            .into_inner();

        Ok(Decimal::from_str(&response.tax_rate)?)
    }

    async fn query_tax_cap(&self, denom: &str) -> Result<Uint128, ChainClientError> {
        let channel = self.get_grpc_channel().await?;

        let mut grpc_client = Grpc::new(channel);
        grpc_client.ready().await?;

        let codec: ProstCodec<QueryTaxCapRequest, QueryTaxCapResponse> = ProstCodec::default();
        let response = grpc_client
            .unary(
                Request::new(QueryTaxCapRequest {
                    denom: denom.to_string(),
                }),
                PathAndQuery::from_static(TAX_CAP_PATH),
                codec,
            )
            .await?
            .into_inner();

        Ok(Uint128::new(response.tax_cap.parse::<u128>()?))
    }
}
