use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::token::OnFtReceivedResponse;

#[cw_serde]
pub struct CallerInstantiateMsg {}

/// Mirrors [`crate::token::TokenExecuteMsg`] with a `contract` field naming
/// the token instance the call is forwarded to.
#[cw_serde]
pub enum CallerExecuteMsg {
    Transfer {
        contract: String,
        recipient: String,
        amount: Uint128,
    },
    TransferFrom {
        contract: String,
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    Approve {
        contract: String,
        spender: String,
        amount: Uint128,
        current_allowance: Uint128,
    },
    Receive {
        sender: String,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum CallerQueryMsg {
    #[returns(OnFtReceivedResponse)]
    OnFtReceived {
        sender: String,
        owner: String,
        amount: Uint128,
    },
}
