use std::{fmt, str::FromStr};

use crate::EngineError;

/// Whether a category groups money going out or coming in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    /// Canonical string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = EngineError;

    /// Case-insensitive: `expense`, `Expense` and `EXPENSE` are all accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("EXPENSE") {
            Ok(Self::Expense)
        } else if value.eq_ignore_ascii_case("INCOME") {
            Ok(Self::Income)
        } else {
            Err(EngineError::Validation(format!(
                "invalid transaction type: {value}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("Expense".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert_eq!(" INCOME ".parse::<TransactionType>(), Ok(TransactionType::Income));
    }

    #[test]
    fn rejects_unknown_types() {
        assert_eq!(
            "transfer".parse::<TransactionType>(),
            Err(EngineError::Validation(
                "invalid transaction type: transfer".to_string()
            ))
        );
    }

    #[test]
    fn stored_form_parses_back() {
        for kind in [TransactionType::Expense, TransactionType::Income] {
            assert_eq!(kind.as_str().parse::<TransactionType>(), Ok(kind));
        }
    }
}
