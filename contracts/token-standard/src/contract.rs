#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response, StdError,
    StdResult, Storage, SubMsg, Uint128,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use token_rs::{
    core::{Contract, ContractError, ContractResult},
    events::DomainEvent,
    token::{
        AllowanceResponse, BalanceResponse, InfoResponse, OnFtReceivedResponse,
        TokenExecuteMsg, TokenInstantiateMsg, TokenQueryMsg, TotalSupplyResponse,
    },
};

use crate::state::{TokenInfo, ALLOWANCES, ALLOWANCES_SPENDER, BALANCES, TOKEN_INFO};

const CONTRACT_NAME: &str = "crates.io:token-standard";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: TokenInstantiateMsg,
) -> ContractResult {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    msg.validate()?;

    // The instantiating account holds the entire supply.
    BALANCES.save(deps.storage, &info.sender, &msg.initial_balances)?;

    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            total_supply: msg.initial_balances,
        },
    )?;

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: TokenExecuteMsg,
) -> ContractResult {
    nonpayable(&info)?;

    match msg {
        TokenExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
        TokenExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute_transfer_from(deps, env, info, owner, recipient, amount),
        TokenExecuteMsg::Approve {
            spender,
            amount,
            current_allowance,
        } => execute_approve(deps, info, spender, amount, current_allowance),
        TokenExecuteMsg::Receive { sender, amount } => execute_receive(deps, info, sender, amount),
    }
}

fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> ContractResult {
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;

    debit(deps.storage, &info.sender, amount)?;
    credit(deps.storage, &recipient_addr, amount)?;

    let response = Response::default().add_event(Event::from(DomainEvent::Transferred {
        owner: info.sender.to_string(),
        recipient: recipient.clone(),
        amount,
    }));

    notify_recipient(deps, env, &info.sender, recipient_addr, amount, response)
}

fn execute_transfer_from(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> ContractResult {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let recipient_addr = deps.api.addr_validate(&recipient)?;

    deduct_allowance(deps.storage, &owner_addr, &info.sender, amount)?;

    debit(deps.storage, &owner_addr, amount)?;
    credit(deps.storage, &recipient_addr, amount)?;

    let response = Response::default().add_event(Event::from(DomainEvent::Transferred {
        owner,
        recipient,
        amount,
    }));

    notify_recipient(deps, env, &info.sender, recipient_addr, amount, response)
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
    current_allowance: Uint128,
) -> ContractResult {
    let spender_addr = deps.api.addr_validate(&spender)?;
    if spender_addr == info.sender {
        return Err(ContractError::CannotSetOwnAccount {});
    }

    let key = (&info.sender, &spender_addr);

    // Compare-and-set against the caller's view of the allowance, so a
    // stale approval cannot silently widen what the spender may move.
    let old_allowance = ALLOWANCES.may_load(deps.storage, key)?.unwrap_or_default();
    if current_allowance != old_allowance.allowance {
        return Err(ContractError::InvalidCurrentAllowance {});
    }

    if amount.is_zero() {
        ALLOWANCES.remove(deps.storage, key);
        ALLOWANCES_SPENDER.remove(deps.storage, (&spender_addr, &info.sender));
    } else {
        let new_allowance = AllowanceResponse { allowance: amount };
        ALLOWANCES.save(deps.storage, key, &new_allowance)?;
        ALLOWANCES_SPENDER.save(deps.storage, (&spender_addr, &info.sender), &new_allowance)?;
    }

    Ok(
        Response::default().add_event(Event::from(DomainEvent::Approved {
            owner: info.sender.to_string(),
            spender,
            old_amount: old_allowance.allowance,
            new_amount: amount,
        })),
    )
}

fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    sender: String,
    _amount: Uint128,
) -> ContractResult {
    // Only accepted from the contract that claims to have sent it.
    if info.sender.as_str() != sender || !is_contract(deps.as_ref(), &sender) {
        return Err(ContractError::Unauthorized {});
    }

    Ok(Response::default())
}

fn debit(storage: &mut dyn Storage, account: &Addr, amount: Uint128) -> Result<(), ContractError> {
    BALANCES.update(storage, account, |balance: Option<Uint128>| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    Ok(())
}

fn credit(storage: &mut dyn Storage, account: &Addr, amount: Uint128) -> Result<(), ContractError> {
    BALANCES.update(storage, account, |balance: Option<Uint128>| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn deduct_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<AllowanceResponse, ContractError> {
    let update_fn = |current: Option<AllowanceResponse>| -> Result<_, ContractError> {
        match current {
            Some(mut allowance) => {
                allowance.allowance = allowance
                    .allowance
                    .checked_sub(amount)
                    .map_err(StdError::overflow)?;
                Ok(allowance)
            }
            None => Err(ContractError::NoAllowance {}),
        }
    };

    ALLOWANCES.update(storage, (owner, spender), update_fn)?;
    ALLOWANCES_SPENDER.update(storage, (spender, owner), update_fn)
}

/// If the recipient is a contract, ask its receive hook whether it accepts
/// tokens and schedule the `Receive` callback.
fn notify_recipient(
    deps: DepsMut,
    env: Env,
    owner: &Addr,
    recipient: Addr,
    amount: Uint128,
    response: Response,
) -> ContractResult {
    if !is_contract(deps.as_ref(), recipient.as_str()) {
        return Ok(response);
    }

    let hook: OnFtReceivedResponse = deps.querier.query_wasm_smart(
        recipient.as_str(),
        &TokenQueryMsg::OnFtReceived {
            sender: env.contract.address.to_string(),
            owner: owner.to_string(),
            amount,
        },
    )?;
    if !hook.enable {
        return Err(ContractError::NonTransferable {});
    }

    let callback = Contract(recipient).call(
        to_json_binary(&TokenExecuteMsg::Receive {
            sender: env.contract.address.into(),
            amount,
        })?,
        vec![],
    );

    Ok(response
        .add_submessage(SubMsg::new(callback))
        .add_attribute("on_ft_received", hook.enable.to_string()))
}

fn is_contract(deps: Deps, account: &str) -> bool {
    deps.querier
        .query_wasm_contract_info(account.to_owned())
        .is_ok()
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: TokenQueryMsg) -> StdResult<Binary> {
    match msg {
        TokenQueryMsg::Info {} => to_json_binary(&query_info(deps)?),
        TokenQueryMsg::TotalSupply {} => to_json_binary(&query_total_supply(deps)?),
        TokenQueryMsg::Balance { owner } => to_json_binary(&query_balance(deps, owner)?),
        TokenQueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
        TokenQueryMsg::OnFtReceived { amount, .. } => {
            to_json_binary(&OnFtReceivedResponse {
                enable: !amount.is_zero(),
            })
        }
    }
}

pub fn query_info(deps: Deps) -> StdResult<InfoResponse> {
    let info = TOKEN_INFO.load(deps.storage)?;
    Ok(InfoResponse {
        name: info.name,
        symbol: info.symbol,
        decimals: info.decimals,
        total_supply: info.total_supply,
    })
}

pub fn query_total_supply(deps: Deps) -> StdResult<TotalSupplyResponse> {
    let info = TOKEN_INFO.load(deps.storage)?;
    Ok(TotalSupplyResponse {
        total_supply: info.total_supply,
    })
}

pub fn query_balance(deps: Deps, owner: String) -> StdResult<BalanceResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let balance = BALANCES
        .may_load(deps.storage, &owner_addr)?
        .unwrap_or_default();
    Ok(BalanceResponse { balance })
}

pub fn query_allowance(deps: Deps, owner: String, spender: String) -> StdResult<AllowanceResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let spender_addr = deps.api.addr_validate(&spender)?;
    Ok(ALLOWANCES
        .may_load(deps.storage, (&owner_addr, &spender_addr))?
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env};

    fn do_instantiate(deps: DepsMut, creator: &Addr, amount: Uint128) -> InfoResponse {
        let msg = TokenInstantiateMsg {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals: 8,
            initial_balances: amount,
        };
        let res = instantiate(deps, mock_env(), message_info(creator, &[]), msg).unwrap();
        assert_eq!(0, res.messages.len());

        InfoResponse {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals: 8,
            total_supply: amount,
        }
    }

    #[test]
    fn instantiate_credits_creator() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");

        let init_balance = Uint128::new(1_000_000_000);
        let expected = do_instantiate(deps.as_mut(), &creator, init_balance);

        assert_eq!(query_info(deps.as_ref()).unwrap(), expected);
        assert_eq!(
            query_total_supply(deps.as_ref()).unwrap().total_supply,
            init_balance
        );
        assert_eq!(
            query_balance(deps.as_ref(), creator.to_string())
                .unwrap()
                .balance,
            init_balance
        );
    }

    #[test]
    fn instantiate_rejects_invalid_token_info() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");

        let msg = TokenInstantiateMsg {
            name: "Test".to_string(),
            symbol: "T2".to_string(),
            decimals: 8,
            initial_balances: Uint128::new(1000),
        };
        let err = instantiate(deps.as_mut(), mock_env(), message_info(&creator, &[]), msg)
            .unwrap_err();
        assert!(matches!(err, ContractError::Std(_)));
    }

    #[test]
    fn transfer_moves_balance() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");
        let recipient = deps.api.addr_make("recipient");

        let init_balance = Uint128::new(1_000_000_000);
        do_instantiate(deps.as_mut(), &creator, init_balance);

        // zero amount is rejected outright
        let msg = TokenExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount: Uint128::zero(),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&creator, &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidZeroAmount {});

        let amount = Uint128::new(1000);
        let msg = TokenExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        };
        let res = execute(deps.as_mut(), mock_env(), message_info(&creator, &[]), msg).unwrap();
        assert_eq!(res.events[0].ty, "Transfer");

        assert_eq!(
            query_balance(deps.as_ref(), recipient.to_string())
                .unwrap()
                .balance,
            amount
        );
        assert_eq!(
            query_balance(deps.as_ref(), creator.to_string())
                .unwrap()
                .balance,
            init_balance - amount
        );
    }

    #[test]
    fn transfer_rejects_insufficient_balance() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");
        let pauper = deps.api.addr_make("pauper");

        do_instantiate(deps.as_mut(), &creator, Uint128::new(1000));

        let msg = TokenExecuteMsg::Transfer {
            recipient: creator.to_string(),
            amount: Uint128::new(1),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&pauper, &[]), msg)
            .unwrap_err();
        assert!(matches!(err, ContractError::Std(StdError::Overflow { .. })));
    }

    #[test]
    fn approve_is_compare_and_set() {
        let mut deps = mock_dependencies();
        let owner = deps.api.addr_make("owner");
        let spender = deps.api.addr_make("spender");

        do_instantiate(deps.as_mut(), &owner, Uint128::new(1_000_000_000));

        let allow = Uint128::new(1_000_000);
        let msg = TokenExecuteMsg::Approve {
            spender: spender.to_string(),
            amount: allow,
            current_allowance: Uint128::zero(),
        };
        let res = execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();
        assert_eq!(res.events[0].ty, "Approval");
        assert_eq!(
            query_allowance(deps.as_ref(), owner.to_string(), spender.to_string())
                .unwrap()
                .allowance,
            allow
        );

        // stale view of the current allowance is rejected
        let msg = TokenExecuteMsg::Approve {
            spender: spender.to_string(),
            amount: Uint128::new(500),
            current_allowance: Uint128::zero(),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidCurrentAllowance {});

        // approving zero clears the entry
        let msg = TokenExecuteMsg::Approve {
            spender: spender.to_string(),
            amount: Uint128::zero(),
            current_allowance: allow,
        };
        execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();
        assert_eq!(
            query_allowance(deps.as_ref(), owner.to_string(), spender.to_string())
                .unwrap()
                .allowance,
            Uint128::zero()
        );
    }

    #[test]
    fn approve_rejects_own_account() {
        let mut deps = mock_dependencies();
        let owner = deps.api.addr_make("owner");

        do_instantiate(deps.as_mut(), &owner, Uint128::new(1000));

        let msg = TokenExecuteMsg::Approve {
            spender: owner.to_string(),
            amount: Uint128::new(100),
            current_allowance: Uint128::zero(),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::CannotSetOwnAccount {});
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut deps = mock_dependencies();
        let owner = deps.api.addr_make("owner");
        let spender = deps.api.addr_make("spender");
        let recipient = deps.api.addr_make("recipient");

        let init_balance = Uint128::new(1_000_000_000);
        do_instantiate(deps.as_mut(), &owner, init_balance);

        let allow = Uint128::new(1_000_000);
        let msg = TokenExecuteMsg::Approve {
            spender: spender.to_string(),
            amount: allow,
            current_allowance: Uint128::zero(),
        };
        execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();

        let amount = Uint128::new(500_000);
        let msg = TokenExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        };
        let res = execute(deps.as_mut(), mock_env(), message_info(&spender, &[]), msg).unwrap();
        assert_eq!(res.events[0].ty, "Transfer");

        assert_eq!(
            query_balance(deps.as_ref(), owner.to_string())
                .unwrap()
                .balance,
            init_balance - amount
        );
        assert_eq!(
            query_allowance(deps.as_ref(), owner.to_string(), spender.to_string())
                .unwrap()
                .allowance,
            allow - amount
        );
    }

    #[test]
    fn transfer_from_without_allowance_fails() {
        let mut deps = mock_dependencies();
        let owner = deps.api.addr_make("owner");
        let spender = deps.api.addr_make("spender");
        let recipient = deps.api.addr_make("recipient");

        do_instantiate(deps.as_mut(), &owner, Uint128::new(1000));

        let msg = TokenExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount: Uint128::new(100),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&spender, &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::NoAllowance {});
    }

    #[test]
    fn receive_rejects_non_contract_sender() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");

        do_instantiate(deps.as_mut(), &creator, Uint128::new(1000));

        let msg = TokenExecuteMsg::Receive {
            sender: creator.to_string(),
            amount: Uint128::new(100),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&creator, &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});
    }

    #[test]
    fn receive_rejects_mismatched_sender() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");
        let other = deps.api.addr_make("other");

        do_instantiate(deps.as_mut(), &creator, Uint128::new(1000));

        // claims to come from `other` but is executed by `creator`
        let msg = TokenExecuteMsg::Receive {
            sender: other.to_string(),
            amount: Uint128::new(100),
        };
        let err = execute(deps.as_mut(), mock_env(), message_info(&creator, &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});
    }

    #[test]
    fn on_ft_received_requires_non_zero_amount() {
        let mut deps = mock_dependencies();
        let creator = deps.api.addr_make("creator");
        do_instantiate(deps.as_mut(), &creator, Uint128::new(1000));

        let raw = query(
            deps.as_ref(),
            mock_env(),
            TokenQueryMsg::OnFtReceived {
                sender: creator.to_string(),
                owner: creator.to_string(),
                amount: Uint128::zero(),
            },
        )
        .unwrap();
        let res: OnFtReceivedResponse = cosmwasm_std::from_json(&raw).unwrap();
        assert!(!res.enable);
    }
}
