//! Fixtures shared by the unit tests.

use chrono::Utc;

use crate::schemas::{Expense, Group};
use crate::settlement::Settlement;

pub const GROUP_ID: &str = "grp";

pub fn group(members: &[&str]) -> Group {
    Group {
        id: GROUP_ID.to_string(),
        name: "Test".to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn expense(amount: f64, payer: &str) -> Expense {
    Expense {
        id: format!("exp_{payer}_{amount}"),
        group_id: GROUP_ID.to_string(),
        description: "Expense".to_string(),
        amount,
        payer: payer.to_string(),
        created_at: Utc::now(),
    }
}

pub fn settlement(from: &str, to: &str, amount: f64) -> Settlement {
    Settlement {
        from: from.to_string(),
        to: to.to_string(),
        amount,
    }
}
