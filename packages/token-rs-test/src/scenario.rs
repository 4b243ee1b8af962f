use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Uint128};
use token_rs::{
    constants::HEAVY_EXECUTE_GAS,
    token::TokenInstantiateMsg,
};

use crate::{
    chain::{ChainClient, ContractCode},
    clients::{deploy_code, CallerClient, TokenClient, TokenInit},
};

/// Mnemonic the scenario wallet is derived from. Funds on a throwaway
/// localnet only.
pub const TEST_MNEMONIC: &str = "mind flame tobacco sense move hammer drift crime ring globe \
     art gaze cinnamon helmet cruise special produce notable negative wait path scrap recall have";

/// Seed of the module account the plain-address transfer step targets.
pub const FOUNDATION_SEED: &str = "foundation";

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub index: u32,
    pub address: Addr,
}

/// Accounts derived once at startup; immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
    pub mnemonic: String,
    pub accounts: Vec<Account>,
}

impl Wallet {
    pub fn derive(chain: &mut dyn ChainClient, mnemonic: &str, count: u32) -> AnyResult<Self> {
        let accounts = (0..count)
            .map(|index| {
                Ok(Account {
                    index,
                    address: chain.derive_account(mnemonic, index)?,
                })
            })
            .collect::<AnyResult<Vec<_>>>()?;

        Ok(Wallet {
            mnemonic: mnemonic.to_string(),
            accounts,
        })
    }

    pub fn address(&self, index: usize) -> &Addr {
        &self.accounts[index].address
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub name: &'static str,
    pub tx_hash: Option<String>,
}

/// Everything the fixed scenario produced, for inspection after the run.
#[derive(Debug)]
pub struct ScenarioReport {
    pub wallet: Wallet,
    pub foundation: Addr,
    pub token_code_id: u64,
    pub caller_code_id: u64,
    pub token1: Addr,
    pub token2: Addr,
    pub caller1: Addr,
    pub caller2: Addr,
    pub caller_balance_before: Uint128,
    pub caller_balance_after: Uint128,
    pub steps: Vec<StepRecord>,
}

fn token_init(name: &str, symbol: &str, label: &str, admin: &Addr) -> TokenInit {
    TokenInit {
        label: label.to_string(),
        msg: TokenInstantiateMsg {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: 6,
            initial_balances: Uint128::new(1_000_000_000),
        },
        admin: admin.clone(),
    }
}

/// The fixed, ordered operation script: deploy and instantiate the token
/// and caller contracts, then exercise transfer, approve and transfer-from
/// directly and through the caller proxy. Strictly sequential; the first
/// propagated failure aborts the remainder.
pub fn run_scenario(chain: &mut dyn ChainClient) -> AnyResult<ScenarioReport> {
    let wallet = Wallet::derive(chain, TEST_MNEMONIC, 4)?;
    let foundation = chain.derive_account(FOUNDATION_SEED, 0)?;

    let alice0 = wallet.address(0).clone();
    let alice1 = wallet.address(1).clone();
    let alice2 = wallet.address(2).clone();
    let alice3 = wallet.address(3).clone();

    let mut steps: Vec<StepRecord> = Vec::new();
    let mut record = |name: &'static str, tx_hash: Option<String>| {
        steps.push(StepRecord { name, tx_hash });
    };

    // deploy
    let token_code_id = deploy_code(chain, &alice0, ContractCode::TokenStandard)?;
    record("upload token code", None);

    let token = TokenClient::new(token_code_id);

    // instantiate 1
    let token1 = token.instantiate(
        chain,
        &alice0,
        &token_init("A To Z Token", "ATZ", "First token deploy", &alice0),
    )?;
    record("instantiate token 1", None);

    // transfer
    let outcome = token.transfer(chain, &token1, &alice0, &alice1, Uint128::new(1000), None)?;
    record("transfer", outcome.tx_hash().map(str::to_string));

    // approve
    let res = token.approve(
        chain,
        &token1,
        &alice0,
        &alice2,
        Uint128::new(1_000_000),
        Uint128::zero(),
    )?;
    record("approve", Some(res.tx_hash));

    // transfer_from
    let res = token.transfer_from(
        chain,
        &token1,
        &alice2,
        &alice0,
        &alice3,
        Uint128::new(100_000),
    )?;
    record("transfer_from", Some(res.tx_hash));

    // instantiate 2
    let token2 = token.instantiate(
        chain,
        &alice1,
        &token_init("Second Token", "SCD", "Second token deploy", &alice1),
    )?;
    record("instantiate token 2", None);

    // transfer to the second token contract, through its receive hook
    println!("[Transfer token to other contract]");
    let outcome = token.transfer(
        chain,
        &token1,
        &alice0,
        &token2,
        Uint128::new(1000),
        Some(HEAVY_EXECUTE_GAS),
    )?;
    record("transfer to contract", outcome.tx_hash().map(str::to_string));

    // transfer to a plain (non-contract) module account
    let outcome = token.transfer(chain, &token1, &alice0, &foundation, Uint128::new(10_000), None)?;
    record("transfer to foundation", outcome.tx_hash().map(str::to_string));

    // deploy caller contract
    let caller_code_id = deploy_code(chain, &alice1, ContractCode::TokenCaller)?;
    record("upload caller code", None);

    let caller = CallerClient::new(caller_code_id);

    // instantiate
    let caller1 = caller.instantiate(chain, &alice1)?;
    record("instantiate caller 1", None);

    // transfer token to the caller contract
    println!("[Transfer token to callerContract]");
    let caller_balance_before = token.balance(chain, &token1, &caller1)?;
    println!("contract balance1: {caller_balance_before}");
    let outcome = token.transfer(
        chain,
        &token1,
        &alice0,
        &caller1,
        Uint128::new(10_000),
        Some(HEAVY_EXECUTE_GAS),
    )?;
    record("transfer to caller", outcome.tx_hash().map(str::to_string));
    let caller_balance_after = token.balance(chain, &token1, &caller1)?;
    println!("contract balance2: {caller_balance_after}");

    // transfer by caller contract
    println!("[Transfer token from callerContract to alice address2]");
    let res = caller.transfer(chain, &caller1, &alice1, &token1, &alice2, Uint128::new(5000))?;
    record("transfer by caller", Some(res.tx_hash));

    // approve by caller contract
    let caller2 = caller.instantiate(chain, &alice2)?;
    record("instantiate caller 2", None);

    println!("[Approve token of caller]");
    let res = caller.approve(
        chain,
        &caller1,
        &alice1,
        &token1,
        &caller2,
        Uint128::new(5000),
        Uint128::zero(),
    )?;
    record("approve by caller", Some(res.tx_hash));

    println!("[TransferFrom by caller]");
    let res = caller.transfer_from(
        chain,
        &caller2,
        &alice2,
        &token1,
        &caller1,
        &alice3,
        Uint128::new(2000),
    )?;
    record("transfer_from by caller", Some(res.tx_hash));

    Ok(ScenarioReport {
        wallet,
        foundation,
        token_code_id,
        caller_code_id,
        token1,
        token2,
        caller1,
        caller2,
        caller_balance_before,
        caller_balance_after,
        steps,
    })
}
