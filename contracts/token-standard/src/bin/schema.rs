use cosmwasm_schema::write_api;
use token_rs::token::{TokenExecuteMsg, TokenInstantiateMsg, TokenQueryMsg};

fn main() {
    write_api! {
        instantiate: TokenInstantiateMsg,
        execute: TokenExecuteMsg,
        query: TokenQueryMsg,
    }
}
