//! Display-ready views of balances and settlements.
//!
//! The numbers are copied untouched from the computations; only labels and
//! formatted strings are added.
use serde::{Deserialize, Serialize};

use crate::balance::compute_balances;
use crate::schemas::{Expense, Group, MemberName};
use crate::settlement::{settle_balance, Settlement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum BalanceStatus {
    #[serde(rename = "to receive")]
    ToReceive,
    #[serde(rename = "to pay")]
    ToPay,
    #[serde(rename = "settled")]
    Settled,
}

impl BalanceStatus {
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            BalanceStatus::ToReceive
        } else if amount < 0.0 {
            BalanceStatus::ToPay
        } else {
            BalanceStatus::Settled
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MemberBalanceView {
    pub member: MemberName,
    pub amount: f64,
    pub status: BalanceStatus,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SettlementView {
    #[serde(flatten)]
    pub settlement: Settlement,
    pub display: String,
}

impl From<Settlement> for SettlementView {
    fn from(settlement: Settlement) -> Self {
        let display = format!(
            "{} pays {} {}",
            settlement.from,
            settlement.to,
            format_amount(settlement.amount)
        );
        Self {
            settlement,
            display,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GroupSummary {
    pub group_id: String,
    pub name: String,
    pub expense_count: usize,
    pub total_spent: f64,
    pub balances: Vec<MemberBalanceView>,
    pub settlements: Vec<SettlementView>,
}

impl GroupSummary {
    /// Balances are listed in member order.
    pub fn new(group: &Group, expenses: &[Expense]) -> Self {
        let balance = compute_balances(group, expenses);
        let settlements = settle_balance(&group.members, &balance);
        let balances = group
            .members
            .iter()
            .filter_map(|member| {
                let amount = *balance.get(member)?;
                Some(MemberBalanceView {
                    member: member.clone(),
                    amount,
                    status: BalanceStatus::from_amount(amount),
                    display: format_amount(amount.abs()),
                })
            })
            .collect();
        let own: Vec<&Expense> = expenses.iter().filter(|e| e.group_id == group.id).collect();

        Self {
            group_id: group.id.clone(),
            name: group.name.clone(),
            expense_count: own.len(),
            total_spent: own.iter().map(|e| e.amount).sum(),
            balances,
            settlements: settlements.into_iter().map(SettlementView::from).collect(),
        }
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
