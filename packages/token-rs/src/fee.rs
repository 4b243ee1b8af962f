use std::{fmt, str::FromStr};

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Decimal, StdError, StdResult};

/// Price of one unit of gas, e.g. `0.025cony`.
#[cw_serde]
pub struct GasPrice {
    pub amount: Decimal,
    pub denom: String,
}

impl FromStr for GasPrice {
    type Err = StdError;

    fn from_str(input: &str) -> StdResult<Self> {
        let split = input
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| StdError::generic_err(format!("Gas price {input} has no denom")))?;

        let (amount, denom) = input.split_at(split);
        if amount.is_empty() {
            return Err(StdError::generic_err(format!(
                "Gas price {input} has no amount"
            )));
        }

        Ok(GasPrice {
            amount: Decimal::from_str(amount)?,
            denom: denom.to_string(),
        })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// The fee attached to a submitted transaction: a gas limit and the
/// coins covering it at the configured gas price.
#[cw_serde]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas: u64,
}

/// Fee for `gas_limit` units of gas, rounded up to whole coin units.
pub fn calculate_fee(gas_limit: u64, gas_price: &GasPrice) -> Fee {
    let amount = (gas_price.amount * Decimal::from_ratio(gas_limit, 1u64)).to_uint_ceil();

    Fee {
        amount: vec![Coin {
            denom: gas_price.denom.clone(),
            amount,
        }],
        gas: gas_limit,
    }
}

impl Fee {
    pub fn coins(&self) -> String {
        self.amount
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
