pub mod book;
pub mod commands;
pub mod errors;
pub mod loan_history;
pub mod user;
pub mod value_objects;

pub use book::{Book, BookType};
pub use errors::*;
pub use loan_history::{UserLoanHistory, UserLoanStatus};
pub use user::User;
pub use value_objects::{BookId, LoanHistoryId, UserId};
