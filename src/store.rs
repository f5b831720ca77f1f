//! Storage of groups and expenses.
//!
//! [`LedgerStore`] is the seam between the ledger and whatever keeps the
//! data around. [`MemoryStore`] keeps everything in process memory.
use chrono::Utc;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::schemas::{Expense, Group, NewExpense, NewGroup};

pub trait LedgerStore {
    /// Stores a new group under a fresh id.
    fn add_group(&mut self, new_group: NewGroup) -> Result<Group, LedgerError>;

    /// Validates and stores a new expense under a fresh id.
    fn add_expense(&mut self, new_expense: NewExpense) -> Result<Expense, LedgerError>;

    /// Removes a group together with all its expenses.
    fn remove_group(&mut self, group_id: &str) -> Result<Group, LedgerError>;

    /// All the groups, newest first.
    fn groups(&self) -> Vec<Group>;

    fn group(&self, group_id: &str) -> Option<Group>;

    /// The expenses of a group, newest first. Unknown ids have no expenses.
    fn expenses_for_group(&self, group_id: &str) -> Vec<Expense>;

    /// A consistent view of a group and its expenses.
    fn snapshot(&self, group_id: &str) -> Option<(Group, Vec<Expense>)> {
        let group = self.group(group_id)?;
        let expenses = self.expenses_for_group(group_id);
        Some((group, expenses))
    }
}

fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// In-memory store. Items are kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    groups: Vec<Group>,
    expenses: Vec<Expense>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn add_group(&mut self, new_group: NewGroup) -> Result<Group, LedgerError> {
        let group = new_group.into_group(generate_id("grp"));
        tracing::info!(
            group = %group.id,
            name = %group.name,
            members = group.members.len(),
            "group added"
        );
        self.groups.push(group.clone());
        Ok(group)
    }

    fn add_expense(&mut self, new_expense: NewExpense) -> Result<Expense, LedgerError> {
        let group_id = new_expense.group_id.trim().to_string();
        if group_id.is_empty() {
            return Err(LedgerError::MissingField("group_id"));
        }
        let group = self
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;

        let expense = new_expense.into_expense(group, generate_id("exp"), Utc::now())?;
        tracing::info!(
            expense = %expense.id,
            group = %expense.group_id,
            amount = expense.amount,
            payer = %expense.payer,
            "expense added"
        );
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    fn remove_group(&mut self, group_id: &str) -> Result<Group, LedgerError> {
        let position = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        let group = self.groups.remove(position);

        let before = self.expenses.len();
        self.expenses.retain(|e| e.group_id != group_id);
        tracing::info!(
            group = %group.id,
            expenses = before - self.expenses.len(),
            "group removed"
        );
        Ok(group)
    }

    fn groups(&self) -> Vec<Group> {
        self.groups.iter().rev().cloned().collect()
    }

    fn group(&self, group_id: &str) -> Option<Group> {
        self.groups.iter().find(|g| g.id == group_id).cloned()
    }

    fn expenses_for_group(&self, group_id: &str) -> Vec<Expense> {
        self.expenses
            .iter()
            .rev()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect()
    }
}
