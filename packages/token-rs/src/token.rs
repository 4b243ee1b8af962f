use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{StdError, StdResult, Uint128};

#[cw_serde]
pub struct TokenInstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_balances: Uint128,
}

impl TokenInstantiateMsg {
    pub fn validate(&self) -> StdResult<()> {
        if !is_valid_name(&self.name) {
            return Err(StdError::generic_err(
                "Name is not in the expected format (3-12 UTF-8 bytes)",
            ));
        }
        if !is_valid_symbol(&self.symbol) {
            return Err(StdError::generic_err(
                "Ticker symbol is not in expected format [a-zA-Z\\-]{3,12}",
            ));
        }
        if self.decimals > 18 {
            return Err(StdError::generic_err("Decimals must not exceed 18"));
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    (3..=12).contains(&name.len())
}

fn is_valid_symbol(symbol: &str) -> bool {
    (3..=12).contains(&symbol.len())
        && symbol
            .bytes()
            .all(|b| b == b'-' || b.is_ascii_alphabetic())
}

#[cw_serde]
pub enum TokenExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    Approve {
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
pub enum TokenQueryMsg {
    #[returns(InfoResponse)]
    Info {},
    #[returns(TotalSupplyResponse)]
    TotalSupply {},
    #[returns(BalanceResponse)]
    Balance { owner: String },
    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },
    #[returns(OnFtReceivedResponse)]
    OnFtReceived {
        sender: String,
        owner: String,
        amount: Uint128,
    },
}

#[cw_serde]
pub struct InfoResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

#[cw_serde]
pub struct TotalSupplyResponse {
    pub total_supply: Uint128,
}

#[cw_serde]
#[derive(Default)]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
#[derive(Default)]
pub struct AllowanceResponse {
    pub allowance: Uint128,
}

#[cw_serde]
pub struct OnFtReceivedResponse {
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A To Z Token", "ATZ", 6, true)]
    #[case("ab", "ATZ", 6, false)]
    #[case("Second Token", "SCD", 6, true)]
    #[case("Token", "AT", 6, false)]
    #[case("Token", "AT2", 6, false)]
    #[case("Token", "a-Z", 6, true)]
    #[case("Token", "ATZ", 19, false)]
    fn validate_instantiate_msg(
        #[case] name: &str,
        #[case] symbol: &str,
        #[case] decimals: u8,
        #[case] expected: bool,
    ) {
        let msg = TokenInstantiateMsg {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            initial_balances: Uint128::new(1_000_000_000),
        };
        assert_eq!(msg.validate().is_ok(), expected);
    }
}
