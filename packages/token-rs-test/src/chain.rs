use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Binary, Event};
use cw_multi_test::{Contract, ContractWrapper};
use token_rs::fee::Fee;

/// The compiled contract artifacts the scenario can upload, by name. The
/// in-process analog of reading a `.wasm` file from the artifacts directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractCode {
    TokenStandard,
    TokenCaller,
}

impl ContractCode {
    pub fn wrapper(&self) -> Box<dyn Contract<cosmwasm_std::Empty>> {
        match self {
            ContractCode::TokenStandard => Box::new(ContractWrapper::new(
                token_standard::contract::execute,
                token_standard::contract::instantiate,
                token_standard::contract::query,
            )),
            ContractCode::TokenCaller => Box::new(ContractWrapper::new(
                token_caller::contract::execute,
                token_caller::contract::instantiate,
                token_caller::contract::query,
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadSummary {
    pub code_id: u64,
    pub tx_hash: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InstantiateSummary {
    pub contract_address: Addr,
    pub tx_hash: String,
    pub events: Vec<Event>,
}

/// What every committed transaction leaves behind: its hash and the events
/// it emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct TxSummary {
    pub tx_hash: String,
    pub events: Vec<Event>,
}

/// The seam where the signing client plugs in. The scenario runner only
/// ever talks to the chain through this trait, so sequencing is testable
/// against a recording mock as well as the in-process app.
pub trait ChainClient {
    /// Derive one account address from a mnemonic and HD path index.
    fn derive_account(&mut self, mnemonic: &str, index: u32) -> AnyResult<Addr>;

    fn upload(
        &mut self,
        sender: &Addr,
        code: ContractCode,
        fee: Fee,
        memo: &str,
    ) -> AnyResult<UploadSummary>;

    #[allow(clippy::too_many_arguments)]
    fn instantiate(
        &mut self,
        sender: &Addr,
        code_id: u64,
        msg: Binary,
        label: &str,
        admin: Option<Addr>,
        fee: Fee,
        memo: &str,
    ) -> AnyResult<InstantiateSummary>;

    fn execute(
        &mut self,
        sender: &Addr,
        contract: &Addr,
        msg: Binary,
        fee: Fee,
    ) -> AnyResult<TxSummary>;

    fn query_smart(&self, contract: &Addr, msg: Binary) -> AnyResult<Binary>;
}
