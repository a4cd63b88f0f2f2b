mod book_repository;
mod loan_history_repository;
mod store;
mod user_repository;

// パブリックに型を再エクスポート
pub use store::{PostgresStore, PostgresTransaction};
