use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Number, Value};

/// Whether a category groups expenses or incomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Expense,
    Income,
}

/// A monetary amount as sent by clients.
///
/// JSON numbers (`12.5`) and decimal strings (`"12.50"`) are both accepted.
/// Numbers keep their exact source text, so no digit is lost to `f64`. The
/// server rejects more than two fractional digits.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl Amount {
    /// The amount as written by the client.
    pub fn as_text(&self) -> String {
        match self {
            Amount::Number(number) => number.to_string(),
            Amount::Text(text) => text.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => Ok(Amount::Number(number)),
            Value::String(text) => Ok(Amount::Text(text)),
            other => Err(D::Error::custom(format!(
                "expected a number or a decimal string, found {other}"
            ))),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub description: String,
        pub sum: Amount,
        pub currency: String,
        /// RFC3339 timestamp. The server uses the current instant when absent.
        pub moment: Option<DateTime<FixedOffset>>,
    }

    /// Full replacement of an expense: every field is required.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub description: String,
        pub sum: Amount,
        pub currency: String,
        pub moment: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: i64,
        pub description: String,
        /// Exact decimal amount, at most two fractional digits.
        pub sum: Number,
        pub currency: String,
        pub moment: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DescriptionSearch {
        pub description: String,
    }

    /// Query of `GET /api/expenses/date-range`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DateRange {
        /// `YYYY-MM-DD`, inclusive from the start of the day.
        pub start_date: String,
        /// `YYYY-MM-DD`, inclusive until the end of the day.
        pub end_date: String,
        /// `UTC`, `Z`, a fixed offset like `+02:00` or an IANA name.
        ///
        /// Defaults to UTC.
        pub timezone: Option<String>,
        /// Restrict the result to one currency.
        pub currency: Option<String>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryNew {
        #[serde(default)]
        pub name: String,
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub parent_id: Option<i64>,
    }

    /// Partial update: absent fields, and a blank name, keep the stored value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub parent_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub parent_id: Option<i64>,
        /// Ids of the direct children, ascending.
        pub children: Vec<i64>,
    }

    /// Query of `GET /api/categories/search`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct NameSearch {
        pub name: String,
        /// Matched case-insensitively by the server.
        #[serde(rename = "type")]
        pub kind: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let number: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(number.as_text(), "12.5");

        let text: Amount = serde_json::from_str("\"12,50\"").unwrap();
        assert_eq!(text, Amount::Text("12,50".to_string()));

        assert!(serde_json::from_str::<Amount>("true").is_err());
        assert!(serde_json::from_str::<Amount>("null").is_err());
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        let new: expense::ExpenseNew = serde_json::from_str(
            r#"{"description":"House","sum":12345678901234567.89,"currency":"EUR"}"#,
        )
        .unwrap();
        assert_eq!(new.sum.as_text(), "12345678901234567.89");

        let view = expense::ExpenseView {
            id: 1,
            description: "House".to_string(),
            sum: "90071992547409.93".parse().unwrap(),
            currency: "EUR".to_string(),
            moment: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""sum":90071992547409.93"#), "{json}");
    }

    #[test]
    fn category_payloads_use_type_and_camel_case() {
        let new: category::CategoryNew =
            serde_json::from_str(r#"{"name":"Food","type":"EXPENSE","parentId":3}"#).unwrap();
        assert_eq!(new.kind, Some(TransactionType::Expense));
        assert_eq!(new.parent_id, Some(3));

        let missing: category::CategoryNew = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.name, "");
        assert_eq!(missing.kind, None);

        let view = category::CategoryView {
            id: 1,
            name: "Salary".to_string(),
            kind: TransactionType::Income,
            parent_id: None,
            children: vec![2],
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({
                "id": 1,
                "name": "Salary",
                "type": "INCOME",
                "parentId": null,
                "children": [2],
            })
        );
    }

    #[test]
    fn expense_update_requires_every_field() {
        let err = serde_json::from_str::<expense::ExpenseUpdate>(
            r#"{"description":"x","sum":1,"currency":"EUR"}"#,
        );
        assert!(err.is_err());
    }
}
