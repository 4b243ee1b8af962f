#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, SubMsg, Uint128,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use token_rs::{
    core::{Contract, ContractError, ContractResult},
    caller::{CallerExecuteMsg, CallerInstantiateMsg, CallerQueryMsg},
    token::{OnFtReceivedResponse, TokenExecuteMsg},
};

const CONTRACT_NAME: &str = "crates.io:token-caller";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: CallerInstantiateMsg,
) -> ContractResult {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: CallerExecuteMsg,
) -> ContractResult {
    nonpayable(&info)?;

    match msg {
        CallerExecuteMsg::Transfer {
            contract,
            recipient,
            amount,
        } => forward(
            deps,
            contract,
            amount,
            TokenExecuteMsg::Transfer { recipient, amount },
        ),
        CallerExecuteMsg::TransferFrom {
            contract,
            owner,
            recipient,
            amount,
        } => forward(
            deps,
            contract,
            amount,
            TokenExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount,
            },
        ),
        CallerExecuteMsg::Approve {
            contract,
            spender,
            amount,
            current_allowance,
        } => forward(
            deps,
            contract,
            amount,
            TokenExecuteMsg::Approve {
                spender,
                amount,
                current_allowance,
            },
        ),
        // Tokens sent to this contract are simply accepted.
        CallerExecuteMsg::Receive { .. } => Ok(Response::default()),
    }
}

/// Re-issue the token operation against the named token contract, with this
/// contract as the on-chain sender.
fn forward(
    deps: DepsMut,
    contract: String,
    amount: Uint128,
    msg: TokenExecuteMsg,
) -> ContractResult {
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }

    let contract_addr = deps.api.addr_validate(&contract)?;
    let call = Contract(contract_addr).call(to_json_binary(&msg)?, vec![]);

    Ok(Response::default().add_submessage(SubMsg::new(call)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(_deps: Deps, _env: Env, msg: CallerQueryMsg) -> StdResult<Binary> {
    match msg {
        CallerQueryMsg::OnFtReceived { amount, .. } => to_json_binary(&OnFtReceivedResponse {
            enable: !amount.is_zero(),
        }),
    }
}
