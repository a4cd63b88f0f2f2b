pub mod book_service;
mod dependencies;
mod errors;
pub mod user_service;

pub use book_service::{
    count_loaned_book, get_book_statistics, loan_book, return_book, save_book,
};
pub use dependencies::ServiceDependencies;
pub use errors::{ErrorKind, LibraryApplicationError, Result};
pub use user_service::{
    BookHistoryView, UserLoanHistoryView, delete_user, get_user_loan_histories, get_users,
    save_user, update_user_name,
};
