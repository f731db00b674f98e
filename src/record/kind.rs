//! Traits that describe a kind of record to the generic store.

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

/// A closed set of categories for a record kind.
///
/// Each member has a fixed lowercase name that is used on the wire and in the
/// database.
pub trait Category:
    Copy + Eq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every member of the enumeration.
    const MEMBERS: &'static [Self];

    /// The name of the member as stored and serialized.
    fn as_str(self) -> &'static str;

    /// Find the member called `value`, if there is one.
    fn parse(value: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.as_str() == value)
    }
}

/// Describes one kind of record, e.g. expenses, to [RecordStore](crate::RecordStore).
pub trait RecordKind: Send + Sync + 'static {
    /// The categories a record of this kind may have.
    type Category: Category;

    /// The name of the database table holding records of this kind.
    const TABLE: &'static str;

    /// The human readable, singular name for this kind, e.g. "Expense".
    const NAME: &'static str;
}

/// A stored category did not match any member of the enumeration.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("\"{0}\" is not a known category")]
pub struct UnknownCategory(pub String);

#[cfg(test)]
mod category_tests {
    use crate::{ExpenseCategory, RevenueCategory, record::Category};

    #[test]
    fn parse_finds_member_by_name() {
        assert_eq!(
            ExpenseCategory::parse("entertainment"),
            Some(ExpenseCategory::Entertainment)
        );
        assert_eq!(RevenueCategory::parse("gift"), Some(RevenueCategory::Gift));
    }

    #[test]
    fn parse_rejects_names_from_other_kinds() {
        assert_eq!(ExpenseCategory::parse("salary"), None);
        assert_eq!(RevenueCategory::parse("food"), None);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(ExpenseCategory::parse("Food"), None);
    }

    #[test]
    fn every_member_round_trips_through_its_name() {
        for member in ExpenseCategory::MEMBERS {
            assert_eq!(ExpenseCategory::parse(member.as_str()), Some(*member));
        }

        for member in RevenueCategory::MEMBERS {
            assert_eq!(RevenueCategory::parse(member.as_str()), Some(*member));
        }
    }
}
