use cosmos_sdk_proto::cosmos::base::abci::v1beta1::TxResponse;

use super::error::ChainClientError;

/// The broadcast acknowledgement the swap form holds on to while a
/// transaction is being tracked.
#[derive(Debug, Clone)]
pub struct TransactionResponse {
    pub hash: String,
    pub code: u32,
    pub block_height: u64,
    pub gas_used: u64,
}

impl TransactionResponse {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl TryFrom<TxResponse> for TransactionResponse {
    type Error = ChainClientError;

    fn try_from(value: TxResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            hash: value.txhash,
            code: value.code,
            block_height: u64::try_from(value.height)?,
            gas_used: u64::try_from(value.gas_used)?,
        })
    }
}
