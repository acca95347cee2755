//! The two execute messages a swap can become, and nothing else.
//!
//! Swapping from the native side calls the pair's `swap` entry point with
//! the offered coins attached as funds. Swapping from the token side sends
//! the cw20 tokens to the pair with an embedded hook payload the pair
//! unpacks on receipt. Both builders are pure; given equal inputs they
//! produce byte-identical messages.

use std::str::FromStr;

use cosmrs::{cosmwasm::MsgExecuteContract, tx::Fee, AccountId, Coin};
use cosmwasm_std::{to_json_binary, Uint128};
use cw20::Cw20ExecuteMsg;

use bootswap_lbp_utils::pair::{Asset, AssetInfo, Cw20HookMsg, ExecuteMsg, PairInfo};

use crate::error::SwapError;

/// An unsigned execute message paired with its fee, held by the form until
/// submission. Stale the moment the triggering amount, asset or fee basis
/// changes; the form rebuilds it on every completed simulation.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    pub msg: MsgExecuteContract,
    pub fee: Fee,
}

/// Swap `amount` base units of the pair's native coin for the sale token.
pub fn build_swap_from_native_token_msg(
    pair: &PairInfo,
    wallet: &AccountId,
    amount: Uint128,
) -> Result<MsgExecuteContract, SwapError> {
    let denom = pair.native_denom()?;

    let swap_msg = ExecuteMsg::Swap {
        offer_asset: Asset {
            info: AssetInfo::NativeToken {
                denom: denom.to_string(),
            },
            amount,
        },
        belief_price: None,
        max_spread: None,
        to: Some(wallet.to_string()),
    };

    Ok(MsgExecuteContract {
        sender: wallet.clone(),
        contract: AccountId::from_str(pair.contract_addr.as_str())?,
        msg: serde_json::to_vec(&swap_msg)?,
        // the attached coins double as the offered amount
        funds: vec![Coin {
            denom: denom.parse()?,
            amount: amount.u128(),
        }],
    })
}

/// Swap `amount` base units of the sale token for the native coin, via the
/// cw20 `send`-with-hook convention.
pub fn build_swap_from_contract_token_msg(
    pair: &PairInfo,
    wallet: &AccountId,
    amount: Uint128,
) -> Result<MsgExecuteContract, SwapError> {
    let token_addr = pair.sale_token_addr()?;

    let send_msg = Cw20ExecuteMsg::Send {
        contract: pair.contract_addr.to_string(),
        amount,
        msg: to_json_binary(&Cw20HookMsg::Swap {})?,
    };

    Ok(MsgExecuteContract {
        sender: wallet.clone(),
        contract: AccountId::from_str(token_addr.as_str())?,
        msg: serde_json::to_vec(&send_msg)?,
        funds: vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_mocks::{test_pair, test_wallet};

    #[test]
    fn native_swap_attaches_offer_as_funds() {
        let pair = test_pair();
        let wallet = test_wallet();

        let msg = build_swap_from_native_token_msg(&pair, &wallet, Uint128::new(42_000_000))
            .unwrap();

        assert_eq!(msg.sender, wallet);
        assert_eq!(msg.contract.to_string(), pair.contract_addr.to_string());
        assert_eq!(msg.funds.len(), 1);
        assert_eq!(msg.funds[0].denom.as_ref(), "uusd");
        assert_eq!(msg.funds[0].amount, 42_000_000);

        let body: serde_json::Value = serde_json::from_slice(&msg.msg).unwrap();
        assert_eq!(body["swap"]["offer_asset"]["amount"], "42000000");
        assert_eq!(
            body["swap"]["offer_asset"]["info"]["native_token"]["denom"],
            "uusd"
        );
        assert_eq!(body["swap"]["to"], wallet.to_string());
    }

    #[test]
    fn contract_token_swap_embeds_the_hook_payload() {
        let pair = test_pair();
        let wallet = test_wallet();

        let msg =
            build_swap_from_contract_token_msg(&pair, &wallet, Uint128::new(7_000_000)).unwrap();

        assert_eq!(
            msg.contract.to_string(),
            pair.sale_token_addr().unwrap().to_string()
        );
        assert!(msg.funds.is_empty());

        let body: serde_json::Value = serde_json::from_slice(&msg.msg).unwrap();
        assert_eq!(body["send"]["contract"], pair.contract_addr.to_string());
        assert_eq!(body["send"]["amount"], "7000000");
        // the embedded {"swap":{}} payload, base64 encoded
        assert_eq!(body["send"]["msg"], "eyJzd2FwIjp7fX0=");
    }

    #[test]
    fn builders_are_deterministic() {
        let pair = test_pair();
        let wallet = test_wallet();

        let first =
            build_swap_from_contract_token_msg(&pair, &wallet, Uint128::new(7_000_000)).unwrap();
        let second =
            build_swap_from_contract_token_msg(&pair, &wallet, Uint128::new(7_000_000)).unwrap();

        assert_eq!(first.msg, second.msg);
        assert_eq!(first.funds, second.funds);
        assert_eq!(first.contract, second.contract);
    }
}
