use cosmwasm_schema::write_api;
use token_rs::caller::{CallerExecuteMsg, CallerInstantiateMsg, CallerQueryMsg};

fn main() {
    write_api! {
        instantiate: CallerInstantiateMsg,
        execute: CallerExecuteMsg,
        query: CallerQueryMsg,
    }
}
