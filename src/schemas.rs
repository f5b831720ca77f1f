use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

pub type MemberName = String;

pub const DEFAULT_GROUP_NAME: &str = "Group";
pub const DEFAULT_EXPENSE_DESCRIPTION: &str = "Expense";
/// Largest amount accepted for a single expense.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<MemberName>,
}

impl Group {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub amount: f64,
    pub payer: MemberName,
    pub created_at: DateTime<Utc>,
}

/// Members as sent by a client: either a list of names or a single comma
/// separated string such as `"Alice, Bob,Charlie"`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MembersInput {
    List(Vec<String>),
    Text(String),
}

impl MembersInput {
    /// Trims every name, drops the empty ones and removes duplicates while
    /// keeping the first occurrence.
    pub fn normalize(self) -> Vec<MemberName> {
        let raw: Vec<String> = match self {
            MembersInput::List(names) => names,
            MembersInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };

        let mut members: Vec<MemberName> = Vec::with_capacity(raw.len());
        for name in raw {
            let name = name.trim();
            if name.is_empty() || members.iter().any(|m| m == name) {
                continue;
            }
            members.push(name.to_string());
        }
        members
    }
}

impl Default for MembersInput {
    fn default() -> Self {
        MembersInput::List(Vec::new())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: MembersInput,
}

impl NewGroup {
    pub fn into_group(self, id: String) -> Group {
        let name = match self.name.trim() {
            "" => DEFAULT_GROUP_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        Group {
            id,
            name,
            members: self.members.normalize(),
        }
    }
}

/// An amount as sent by a client, either a JSON number or text.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Parses the amount, accepting `.` or `,` as decimal separator.
    ///
    /// Only finite values greater than 0 and up to [`MAX_AMOUNT`] are
    /// accepted.
    pub fn parse(&self) -> Result<f64, LedgerError> {
        let amount = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(text) => text
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| LedgerError::InvalidAmount(text.clone()))?,
        };
        if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount(amount.to_string()));
        }
        Ok(amount)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewExpense {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub description: String,
    pub amount: AmountInput,
    #[serde(default)]
    pub payer: MemberName,
}

impl NewExpense {
    /// Validates the expense against its owning group and builds the stored
    /// value.
    pub fn into_expense(
        self,
        group: &Group,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<Expense, LedgerError> {
        let payer = self.payer.trim();
        if payer.is_empty() {
            return Err(LedgerError::MissingField("payer"));
        }
        if !group.has_member(payer) {
            return Err(LedgerError::UnknownPayer {
                payer: payer.to_string(),
                group: group.id.clone(),
            });
        }
        let amount = self.amount.parse()?;
        let description = match self.description.trim() {
            "" => DEFAULT_EXPENSE_DESCRIPTION.to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(Expense {
            id,
            group_id: group.id.clone(),
            description,
            amount,
            payer: payer.to_string(),
            created_at,
        })
    }
}
