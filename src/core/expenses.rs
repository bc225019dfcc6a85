use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named fixed annual expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExpenseItem {
    pub name: String,
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

/// Fixed annual operating expenses, kept in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ExpenseLedger(Vec<ExpenseItem>);

impl ExpenseLedger {
    pub fn items(&self) -> &[ExpenseItem] {
        &self.0
    }

    pub fn total(&self) -> Decimal {
        self.0.iter().map(|e| e.amount).sum()
    }
}

#[cfg(test)]
impl From<Vec<ExpenseItem>> for ExpenseLedger {
    fn from(items: Vec<ExpenseItem>) -> Self {
        Self(items)
    }
}
