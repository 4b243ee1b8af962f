use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Event, Uint128};

#[cw_serde]
pub enum DomainEvent {
    Transferred {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    Approved {
        owner: String,
        spender: String,
        old_amount: Uint128,
        new_amount: Uint128,
    },
}

impl From<DomainEvent> for Event {
    fn from(event: DomainEvent) -> Self {
        match event {
            DomainEvent::Transferred {
                owner,
                recipient,
                amount,
            } => Event::new("Transfer")
                .add_attribute("owner", owner)
                .add_attribute("recipient", recipient)
                .add_attribute("amount", amount.to_string()),
            DomainEvent::Approved {
                owner,
                spender,
                old_amount,
                new_amount,
            } => Event::new("Approval")
                .add_attribute("owner", owner)
                .add_attribute("spender", spender)
                .add_attribute("old_amount", old_amount.to_string())
                .add_attribute("new_amount", new_amount.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_event_attributes() {
        let event: Event = DomainEvent::Transferred {
            owner: "owner".to_string(),
            recipient: "recipient".to_string(),
            amount: Uint128::new(1000),
        }
        .into();

        assert_eq!(event.ty, "Transfer");
        assert_eq!(event.attributes[0].value, "owner");
        assert_eq!(event.attributes[1].value, "recipient");
        assert_eq!(event.attributes[2].value, "1000");
    }

    #[test]
    fn approval_event_attributes() {
        let event: Event = DomainEvent::Approved {
            owner: "owner".to_string(),
            spender: "spender".to_string(),
            old_amount: Uint128::zero(),
            new_amount: Uint128::new(1_000_000),
        }
        .into();

        assert_eq!(event.ty, "Approval");
        assert_eq!(event.attributes[2].value, "0");
        assert_eq!(event.attributes[3].value, "1000000");
    }
}
