use tokio::sync::RwLock;

use crate::balance::{compute_balances, Balance};
use crate::error::LedgerError;
use crate::presentation::GroupSummary;
use crate::schemas::{Expense, Group, NewExpense, NewGroup};
use crate::settlement::{compute_settlements, Settlement};
use crate::store::LedgerStore;

/// Shared access to a [`LedgerStore`].
///
/// Writes go through a single lock so readers always see a consistent
/// snapshot. Balances and settlements are recomputed on every call.
#[derive(Debug, Default)]
pub struct Ledger<S> {
    store: RwLock<S>,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub async fn add_group(&self, new_group: NewGroup) -> Result<Group, LedgerError> {
        self.store.write().await.add_group(new_group)
    }

    pub async fn add_expense(&self, new_expense: NewExpense) -> Result<Expense, LedgerError> {
        self.store.write().await.add_expense(new_expense)
    }

    pub async fn remove_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.store.write().await.remove_group(group_id)
    }

    pub async fn groups(&self) -> Vec<Group> {
        self.store.read().await.groups()
    }

    pub async fn group(&self, group_id: &str) -> Option<Group> {
        self.store.read().await.group(group_id)
    }

    pub async fn expenses(&self, group_id: &str) -> Vec<Expense> {
        self.store.read().await.expenses_for_group(group_id)
    }

    /// Balances of a group; empty when the group does not exist.
    pub async fn balances(&self, group_id: &str) -> Balance {
        match self.store.read().await.snapshot(group_id) {
            Some((group, expenses)) => compute_balances(&group, &expenses),
            None => {
                tracing::debug!(group = %group_id, "balances requested for unknown group");
                Balance::new()
            }
        }
    }

    /// Settlements of a group; empty when the group does not exist.
    pub async fn settlements(&self, group_id: &str) -> Vec<Settlement> {
        match self.store.read().await.snapshot(group_id) {
            Some((group, expenses)) => compute_settlements(&group, &expenses),
            None => {
                tracing::debug!(group = %group_id, "settlements requested for unknown group");
                Vec::new()
            }
        }
    }

    /// Display summary of a group; empty when the group does not exist.
    pub async fn summary(&self, group_id: &str) -> GroupSummary {
        match self.store.read().await.snapshot(group_id) {
            Some((group, expenses)) => GroupSummary::new(&group, &expenses),
            None => GroupSummary::default(),
        }
    }
}
