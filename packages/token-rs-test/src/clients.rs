use std::str::FromStr;

use anyhow::Result as AnyResult;
use cosmwasm_std::{from_json, to_json_binary, to_json_string, Addr, Uint128};
use token_rs::{
    caller::{CallerExecuteMsg, CallerInstantiateMsg},
    constants::{
        DEFAULT_GAS_PRICE, EXECUTE_GAS, HEAVY_EXECUTE_GAS, INSTANTIATE_GAS, UPLOAD_GAS,
    },
    fee::{calculate_fee, GasPrice},
    token::{BalanceResponse, TokenExecuteMsg, TokenInstantiateMsg, TokenQueryMsg},
};

use crate::chain::{ChainClient, ContractCode, TxSummary};

/// Result of an operation that is allowed to fail without aborting the
/// scenario: the error is carried back to the caller as a value.
#[derive(Debug)]
pub enum TxOutcome {
    Committed(TxSummary),
    Rejected(anyhow::Error),
}

impl TxOutcome {
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            TxOutcome::Committed(summary) => Some(&summary.tx_hash),
            TxOutcome::Rejected(_) => None,
        }
    }
}

/// Upload one of the contract artifacts and report the assigned code id.
pub fn deploy_code(
    chain: &mut dyn ChainClient,
    sender: &Addr,
    code: ContractCode,
) -> AnyResult<u64> {
    let gas_price = GasPrice::from_str(DEFAULT_GAS_PRICE)?;
    let fee = calculate_fee(UPLOAD_GAS, &gas_price);
    let receipt = chain.upload(sender, code, fee, "Upload contract code")?;
    println!(
        "Upload succeeded. Code id: {}, txHash: {}",
        receipt.code_id, receipt.tx_hash
    );

    Ok(receipt.code_id)
}

pub struct TokenInit {
    pub label: String,
    pub msg: TokenInstantiateMsg,
    pub admin: Addr,
}

/// Issues token-standard operations against one uploaded code id, one
/// contract instance at a time.
pub struct TokenClient {
    pub code_id: u64,
    gas_price: GasPrice,
}

impl TokenClient {
    pub fn new(code_id: u64) -> Self {
        Self {
            code_id,
            gas_price: GasPrice::from_str(DEFAULT_GAS_PRICE)
                .expect("DEFAULT_GAS_PRICE must parse as <amount><denom>"),
        }
    }

    pub fn instantiate(
        &self,
        chain: &mut dyn ChainClient,
        sender: &Addr,
        init: &TokenInit,
    ) -> AnyResult<Addr> {
        let fee = calculate_fee(INSTANTIATE_GAS, &self.gas_price);
        let res = chain.instantiate(
            sender,
            self.code_id,
            to_json_binary(&init.msg)?,
            &init.label,
            Some(init.admin.clone()),
            fee,
            "Create a Test Token",
        )?;
        println!(
            "Contract instantiated at {} in {}",
            res.contract_address, res.tx_hash
        );

        Ok(res.contract_address)
    }

    /// A failed transfer is returned as a value rather than an error so the
    /// scenario can keep going; every other operation halts on failure.
    pub fn transfer(
        &self,
        chain: &mut dyn ChainClient,
        contract: &Addr,
        sender: &Addr,
        recipient: &Addr,
        amount: Uint128,
        gas_limit: Option<u64>,
    ) -> AnyResult<TxOutcome> {
        let fee = calculate_fee(gas_limit.unwrap_or(EXECUTE_GAS), &self.gas_price);
        let msg = to_json_binary(&TokenExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?;

        match chain.execute(sender, contract, msg, fee) {
            Ok(summary) => {
                println!(
                    "Transfer txHash: {}, events: {}",
                    summary.tx_hash,
                    to_json_string(&summary.events)?
                );
                Ok(TxOutcome::Committed(summary))
            }
            Err(err) => {
                println!("Transfer rejected: {err}");
                Ok(TxOutcome::Rejected(err))
            }
        }
    }

    pub fn approve(
        &self,
        chain: &mut dyn ChainClient,
        contract: &Addr,
        sender: &Addr,
        spender: &Addr,
        amount: Uint128,
        current_allowance: Uint128,
    ) -> AnyResult<TxSummary> {
        let fee = calculate_fee(EXECUTE_GAS, &self.gas_price);
        let msg = to_json_binary(&TokenExecuteMsg::Approve {
            spender: spender.to_string(),
            amount,
            current_allowance,
        })?;

        let summary = chain.execute(sender, contract, msg, fee)?;
        println!(
            "Approve txHash: {}, events: {}",
            summary.tx_hash,
            to_json_string(&summary.events)?
        );

        Ok(summary)
    }

    pub fn transfer_from(
        &self,
        chain: &mut dyn ChainClient,
        contract: &Addr,
        sender: &Addr,
        owner: &Addr,
        recipient: &Addr,
        amount: Uint128,
    ) -> AnyResult<TxSummary> {
        let fee = calculate_fee(EXECUTE_GAS, &self.gas_price);
        let msg = to_json_binary(&TokenExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?;

        let summary = chain.execute(sender, contract, msg, fee)?;
        println!(
            "TransferFrom txHash: {}, events: {}",
            summary.tx_hash,
            to_json_string(&summary.events)?
        );

        Ok(summary)
    }

    pub fn balance(
        &self,
        chain: &dyn ChainClient,
        contract: &Addr,
        owner: &Addr,
    ) -> AnyResult<Uint128> {
        let raw = chain.query_smart(
            contract,
            to_json_binary(&TokenQueryMsg::Balance {
                owner: owner.to_string(),
            })?,
        )?;
        let res: BalanceResponse = from_json(&raw)?;

        Ok(res.balance)
    }
}

/// Issues token operations through a deployed token-caller proxy instance.
pub struct CallerClient {
    pub code_id: u64,
    gas_price: GasPrice,
}

impl CallerClient {
    pub fn new(code_id: u64) -> Self {
        Self {
            code_id,
            gas_price: GasPrice::from_str(DEFAULT_GAS_PRICE)
                .expect("DEFAULT_GAS_PRICE must parse as <amount><denom>"),
        }
    }

    pub fn instantiate(&self, chain: &mut dyn ChainClient, sender: &Addr) -> AnyResult<Addr> {
        let fee = calculate_fee(INSTANTIATE_GAS, &self.gas_price);
        let res = chain.instantiate(
            sender,
            self.code_id,
            to_json_binary(&CallerInstantiateMsg {})?,
            "caller instantiate",
            Some(sender.clone()),
            fee,
            "Create a Test Token",
        )?;
        println!(
            "Contract instantiated at {} in {}",
            res.contract_address, res.tx_hash
        );

        Ok(res.contract_address)
    }

    pub fn transfer(
        &self,
        chain: &mut dyn ChainClient,
        caller: &Addr,
        sender: &Addr,
        contract: &Addr,
        recipient: &Addr,
        amount: Uint128,
    ) -> AnyResult<TxSummary> {
        let fee = calculate_fee(HEAVY_EXECUTE_GAS, &self.gas_price);
        let msg = to_json_binary(&CallerExecuteMsg::Transfer {
            contract: contract.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?;

        let summary = chain.execute(sender, caller, msg, fee)?;
        println!(
            "Transfer(caller) txHash: {}, events: {}",
            summary.tx_hash,
            to_json_string(&summary.events)?
        );

        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn transfer_from(
        &self,
        chain: &mut dyn ChainClient,
        caller: &Addr,
        sender: &Addr,
        contract: &Addr,
        owner: &Addr,
        recipient: &Addr,
        amount: Uint128,
    ) -> AnyResult<TxSummary> {
        let fee = calculate_fee(HEAVY_EXECUTE_GAS, &self.gas_price);
        let msg = to_json_binary(&CallerExecuteMsg::TransferFrom {
            contract: contract.to_string(),
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?;

        let summary = chain.execute(sender, caller, msg, fee)?;
        println!(
            "TransferFrom(caller) txHash: {}, events: {}",
            summary.tx_hash,
            to_json_string(&summary.events)?
        );

        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn approve(
        &self,
        chain: &mut dyn ChainClient,
        caller: &Addr,
        sender: &Addr,
        contract: &Addr,
        spender: &Addr,
        amount: Uint128,
        current_allowance: Uint128,
    ) -> AnyResult<TxSummary> {
        let fee = calculate_fee(HEAVY_EXECUTE_GAS, &self.gas_price);
        let msg = to_json_binary(&CallerExecuteMsg::Approve {
            contract: contract.to_string(),
            spender: spender.to_string(),
            amount,
            current_allowance,
        })?;

        let summary = chain.execute(sender, caller, msg, fee)?;
        println!(
            "Approve(caller) txHash: {}, events: {}",
            summary.tx_hash,
            to_json_string(&summary.events)?
        );

        Ok(summary)
    }
}
