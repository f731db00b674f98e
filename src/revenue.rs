//! Revenues: money that was received.

use serde::{Deserialize, Serialize};

use crate::record::{Category, RecordKind};

/// Marks records stored in the revenues table.
#[derive(Debug, Clone, Copy)]
pub struct Revenue;

impl RecordKind for Revenue {
    type Category = RevenueCategory;

    const TABLE: &'static str = "revenues";
    const NAME: &'static str = "Revenue";
}

/// Where the money came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueCategory {
    /// Wages from an employer.
    Salary,
    /// Dividends, interest and capital gains.
    Investment,
    /// Contract and gig work.
    Freelance,
    /// Money given by someone else.
    Gift,
    /// Anything else.
    Other,
}

impl Category for RevenueCategory {
    const MEMBERS: &'static [Self] = &[
        Self::Salary,
        Self::Investment,
        Self::Freelance,
        Self::Gift,
        Self::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Investment => "investment",
            Self::Freelance => "freelance",
            Self::Gift => "gift",
            Self::Other => "other",
        }
    }
}
