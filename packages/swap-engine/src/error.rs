use bootswap_chain_client_utils::common::error::ChainClientError;
use bootswap_lbp_utils::pair::PairError;

/// Failures the engine propagates to its caller. User-visible form states
/// are [`crate::form::FormError`]; this type is for the programmatic seam.
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    #[error(transparent)]
    Chain(#[from] ChainClientError),
    #[error(transparent)]
    Pair(#[from] PairError),
    #[error("invalid address or denom: {0}")]
    Invalid(String),
    #[error("message encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("hook encoding failed: {0}")]
    Hook(#[from] cosmwasm_std::StdError),
    #[error("amount out of representable range")]
    AmountRange,
    #[error("fee has no {0} coin")]
    MissingFeeCoin(String),
    #[error("balance cannot cover the estimated gas fee")]
    FeeExceedsBalance,
    #[error("no pending transaction to submit")]
    NothingToSubmit,
    #[error("wallet balance does not cover the swap and its fees")]
    InsufficientFunds,
}

impl From<cosmrs::ErrorReport> for SwapError {
    fn from(value: cosmrs::ErrorReport) -> Self {
        SwapError::Invalid(value.to_string())
    }
}
