use anyhow::{anyhow, Result as AnyResult};
use cosmwasm_std::{
    to_json_vec, Addr, Binary, ContractResult, Empty, Querier, QueryRequest, StdError,
    SystemResult, WasmMsg, WasmQuery,
};
use cw_multi_test::{App, AppResponse, Executor};
use token_rs::fee::Fee;

use crate::chain::{ChainClient, ContractCode, InstantiateSummary, TxSummary, UploadSummary};

/// An in-process chain backed by `cw_multi_test::App`. Stands in for the
/// signing client the scenario would otherwise point at a node endpoint.
pub struct MultiTestClient {
    pub app: App,
    sequence: u64,
}

impl MultiTestClient {
    pub fn new() -> Self {
        Self {
            app: App::default(),
            sequence: 0,
        }
    }

    // The in-process app has no mempool, so transaction hashes are
    // synthesized from the block height and a submission counter.
    fn next_tx_hash(&mut self) -> String {
        self.sequence += 1;
        format!(
            "{:016X}{:048X}",
            self.app.block_info().height,
            self.sequence
        )
    }

    fn deliver(&mut self, sender: &Addr, msg: WasmMsg) -> AnyResult<(AppResponse, String)> {
        let response = self.app.execute(sender.clone(), msg.into())?;
        let tx_hash = self.next_tx_hash();
        Ok((response, tx_hash))
    }
}

impl Default for MultiTestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainClient for MultiTestClient {
    fn derive_account(&mut self, mnemonic: &str, index: u32) -> AnyResult<Addr> {
        Ok(self.app.api().addr_make(&format!("{mnemonic}/{index}")))
    }

    fn upload(
        &mut self,
        _sender: &Addr,
        code: ContractCode,
        _fee: Fee,
        _memo: &str,
    ) -> AnyResult<UploadSummary> {
        let code_id = self.app.store_code(code.wrapper());
        let tx_hash = self.next_tx_hash();
        Ok(UploadSummary { code_id, tx_hash })
    }

    fn instantiate(
        &mut self,
        sender: &Addr,
        code_id: u64,
        msg: Binary,
        label: &str,
        admin: Option<Addr>,
        _fee: Fee,
        _memo: &str,
    ) -> AnyResult<InstantiateSummary> {
        let (response, tx_hash) = self.deliver(
            sender,
            WasmMsg::Instantiate {
                admin: admin.map(|a| a.to_string()),
                code_id,
                msg,
                funds: vec![],
                label: label.to_string(),
            },
        )?;

        let contract_address = response
            .events
            .iter()
            .find(|ev| ev.ty == "instantiate")
            .and_then(|ev| {
                ev.attributes
                    .iter()
                    .find(|attr| attr.key == "_contract_address")
            })
            .map(|attr| Addr::unchecked(attr.value.clone()))
            .ok_or_else(|| anyhow!("no _contract_address attribute in instantiate events"))?;

        Ok(InstantiateSummary {
            contract_address,
            tx_hash,
            events: response.events,
        })
    }

    fn execute(
        &mut self,
        sender: &Addr,
        contract: &Addr,
        msg: Binary,
        _fee: Fee,
    ) -> AnyResult<TxSummary> {
        let (response, tx_hash) = self.deliver(
            sender,
            WasmMsg::Execute {
                contract_addr: contract.to_string(),
                msg,
                funds: vec![],
            },
        )?;

        Ok(TxSummary {
            tx_hash,
            events: response.events,
        })
    }

    fn query_smart(&self, contract: &Addr, msg: Binary) -> AnyResult<Binary> {
        let request = to_json_vec(&QueryRequest::<Empty>::Wasm(WasmQuery::Smart {
            contract_addr: contract.to_string(),
            msg,
        }))?;

        match self.app.raw_query(&request) {
            SystemResult::Err(err) => Err(StdError::generic_err(err.to_string()).into()),
            SystemResult::Ok(ContractResult::Err(err)) => Err(StdError::generic_err(err).into()),
            SystemResult::Ok(ContractResult::Ok(value)) => Ok(value),
        }
    }
}
