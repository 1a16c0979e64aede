pub use contributions::Contribution;
pub use error::{EngineError, ValidationError};
pub use expenses::{Expense, ExpenseFields, MIN_PARTICIPANTS};
pub use money::{Money, SUM_EPSILON};
pub use ops::{Engine, EngineBuilder};
pub use settlement::{BalanceSheet, aggregate, list_people};
pub use share::{ShareExpense, ShareSummary};
pub use split::{ExpenseDraft, SplitPolicy};

mod contributions;
mod error;
mod expenses;
mod money;
mod ops;
mod settlement;
mod share;
mod split;

type ResultEngine<T> = Result<T, EngineError>;
