pub mod book_repository;
pub mod loan_history_repository;
pub mod unit_of_work;
pub mod user_repository;

pub use book_repository::{BookRepository, BookStat};
pub use loan_history_repository::LoanHistoryRepository;
pub use unit_of_work::{Transaction, UnitOfWork};
pub use user_repository::UserRepository;

/// ポート層の共通Result型
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
