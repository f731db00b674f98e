//! Expenses: money that was spent.

use serde::{Deserialize, Serialize};

use crate::record::{Category, RecordKind};

/// Marks records stored in the expenses table.
#[derive(Debug, Clone, Copy)]
pub struct Expense;

impl RecordKind for Expense {
    type Category = ExpenseCategory;

    const TABLE: &'static str = "expenses";
    const NAME: &'static str = "Expense";
}

/// What the money was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Groceries, restaurants and take-out.
    Food,
    /// Fuel, public transport, taxis.
    Transportation,
    /// Rent, mortgage and home maintenance.
    Housing,
    /// Power, water, internet and phone bills.
    Utilities,
    /// Doctors, pharmacy and insurance.
    Healthcare,
    /// Going out, hobbies and subscriptions.
    Entertainment,
    /// Courses, books and tuition.
    Education,
    /// Anything else.
    Other,
}

impl Category for ExpenseCategory {
    const MEMBERS: &'static [Self] = &[
        Self::Food,
        Self::Transportation,
        Self::Housing,
        Self::Utilities,
        Self::Healthcare,
        Self::Entertainment,
        Self::Education,
        Self::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Healthcare => "healthcare",
            Self::Entertainment => "entertainment",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}
