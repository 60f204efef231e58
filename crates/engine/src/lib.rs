//! Domain services for expenses and income/expense categories.
//!
//! Everything goes through [`Engine`], which owns the database connection and
//! exposes one async method per operation. Validation failures surface as
//! [`EngineError::Validation`], missing ids on write as
//! [`EngineError::KeyNotFound`].

pub use categories::Category;
pub use commands::{CategoryNew, CategoryPatch, ExpenseNew, ExpenseUpdate};
pub use error::{CATEGORY_NAME_EMPTY, CATEGORY_TYPE_MISSING, EngineError, SUM_NOT_POSITIVE};
pub use expenses::Expense;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use transaction_type::TransactionType;

mod categories;
mod commands;
mod error;
mod expenses;
mod money;
mod ops;
mod transaction_type;
mod tree;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
