//! Money in and money out.
//!
//! Income and expenses are separate tables with the same row shape but
//! different category vocabularies. Both require a non-zero amount; the
//! description is optional.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::record::{Collection, OrderBy};

define_choice! {
    /// Revenue stream.
    pub enum IncomeCategory default Live {
        Live => "Live",
        Streaming => "Streaming",
        Merch => "Merch",
        Sync => "Sync",
        Teaching => "Teaching",
        Publishing => "Publishing",
        Other => "Other",
    }
}

define_choice! {
    /// Spending bucket.
    pub enum ExpenseCategory default Studio {
        Studio => "Studio",
        Gear => "Gear",
        Marketing => "Marketing",
        Distribution => "Distribution",
        Travel => "Travel",
        Design => "Design",
        Software => "Software",
        Other => "Other",
    }
}

define_fields! {
    /// Money received.
    pub struct Income / IncomePatch {
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
        pub category: IncomeCategory,
        /// Amount in dollars.
        pub amount: f64,
    }
}

define_fields! {
    /// Money spent.
    pub struct Expense / ExpensePatch {
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
        pub category: ExpenseCategory,
        /// Amount in dollars.
        pub amount: f64,
    }
}

fn require_amount(collection: &'static str, amount: f64) -> Result<(), ValidationError> {
    if amount.abs() < f64::EPSILON || !amount.is_finite() {
        return Err(ValidationError::missing(collection, "amount"));
    }
    Ok(())
}

impl Income {
    #[must_use]
    pub fn new(amount: f64, category: IncomeCategory) -> Self {
        Self {
            amount,
            category,
            ..Self::default()
        }
    }
}

impl Expense {
    #[must_use]
    pub fn new(amount: f64, category: ExpenseCategory) -> Self {
        Self {
            amount,
            category,
            ..Self::default()
        }
    }
}

impl Collection for Income {
    const NAME: &'static str = "income";
    type Patch = IncomePatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("date"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_amount(Self::NAME, self.amount)
    }

    fn validate_patch(patch: &IncomePatch) -> Result<(), ValidationError> {
        patch
            .amount
            .map_or(Ok(()), |amount| require_amount(Self::NAME, amount))
    }
}

impl Collection for Expense {
    const NAME: &'static str = "expenses";
    type Patch = ExpensePatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("date"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_amount(Self::NAME, self.amount)
    }

    fn validate_patch(patch: &ExpensePatch) -> Result<(), ValidationError> {
        patch
            .amount
            .map_or(Ok(()), |amount| require_amount(Self::NAME, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_requires_amount() {
        assert!(Income::default().validate().is_err());
        assert!(Income::new(120.0, IncomeCategory::Merch).validate().is_ok());
    }

    #[test]
    fn test_expense_patch_cannot_zero_amount() {
        let patch = ExpensePatch {
            amount: Some(0.0),
            ..ExpensePatch::default()
        };
        assert!(Expense::validate_patch(&patch).is_err());
        assert!(Expense::validate_patch(&ExpensePatch::default()).is_ok());
    }

    #[test]
    fn test_ledger_tables() {
        assert_eq!(Income::NAME, "income");
        assert_eq!(Expense::NAME, "expenses");
    }
}
