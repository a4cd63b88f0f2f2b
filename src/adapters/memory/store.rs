use crate::domain::{
    Book, BookId, BookType, LoanHistoryId, User, UserId, UserLoanHistory, UserLoanStatus,
};
use crate::ports::{
    BookRepository, BookStat, LoanHistoryRepository, Result, Transaction, UnitOfWork,
    UserRepository,
};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// ストア全体の状態
///
/// IDはテーブルごとの連番（1始まり）で採番する。
#[derive(Debug, Clone, Default)]
struct State {
    books: BTreeMap<BookId, Book>,
    users: BTreeMap<UserId, User>,
    histories: BTreeMap<LoanHistoryId, UserLoanHistory>,
    book_seq: i64,
    user_seq: i64,
    history_seq: i64,
}

/// In-memory implementation of the UnitOfWork port
///
/// Used by tests and by local runs without `DATABASE_URL`.
/// A transaction holds the store lock for its whole lifetime, so transactions
/// are fully serialized.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed books, ordered by id
    pub async fn books(&self) -> Vec<Book> {
        self.state.lock().await.books.values().cloned().collect()
    }

    /// Committed users, ordered by id
    pub async fn users(&self) -> Vec<User> {
        self.state.lock().await.users.values().cloned().collect()
    }

    /// Committed loan histories, ordered by id
    pub async fn histories(&self) -> Vec<UserLoanHistory> {
        self.state.lock().await.histories.values().cloned().collect()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }
}

/// Transaction over a snapshot of the store
///
/// Writes go to `working`; commit copies it back under the held lock.
/// Dropping without commit discards the snapshot.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<State>,
    working: State,
}

fn missing_id(entity: &str) -> Box<dyn std::error::Error + Send + Sync> {
    format!("{} has no id", entity).into()
}

fn missing_row(entity: &str, id: i64) -> Box<dyn std::error::Error + Send + Sync> {
    format!("{} {} does not exist", entity, id).into()
}

impl Transaction for InMemoryTransaction {
    fn commit(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Box::pin(async { Ok(()) })
    }

    fn rollback(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[async_trait]
impl BookRepository for InMemoryTransaction {
    async fn insert_book(&mut self, book: &Book) -> Result<BookId> {
        self.working.book_seq += 1;
        let id = BookId::new(self.working.book_seq);
        self.working.books.insert(
            id,
            Book::restore(id, book.name.clone(), book.book_type),
        );
        Ok(id)
    }

    async fn find_book_by_name(&mut self, name: &str) -> Result<Option<Book>> {
        Ok(self
            .working
            .books
            .values()
            .find(|book| book.name == name)
            .cloned())
    }

    async fn count_books_by_type(&mut self) -> Result<Vec<BookStat>> {
        let mut counts: BTreeMap<BookType, u64> = BTreeMap::new();
        for book in self.working.books.values() {
            *counts.entry(book.book_type).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(book_type, count)| BookStat { book_type, count })
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryTransaction {
    async fn insert_user(&mut self, user: &User) -> Result<UserId> {
        self.working.user_seq += 1;
        let id = UserId::new(self.working.user_seq);
        self.working
            .users
            .insert(id, User::restore(id, user.name.clone(), user.age));
        Ok(id)
    }

    async fn update_user(&mut self, user: &User) -> Result<()> {
        let id = user.id.ok_or_else(|| missing_id("user"))?;
        let stored = self
            .working
            .users
            .get_mut(&id)
            .ok_or_else(|| missing_row("user", id.value()))?;
        stored.name = user.name.clone();
        stored.age = user.age;
        Ok(())
    }

    async fn find_user_by_id(&mut self, id: UserId) -> Result<Option<User>> {
        Ok(self.working.users.get(&id).cloned())
    }

    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>> {
        Ok(self
            .working
            .users
            .values()
            .find(|user| user.name == name)
            .cloned())
    }

    async fn find_all_users(&mut self) -> Result<Vec<User>> {
        Ok(self.working.users.values().cloned().collect())
    }

    async fn delete_user(&mut self, id: UserId) -> Result<()> {
        // 外部キー制約（ON DELETE RESTRICT）相当
        if self
            .working
            .histories
            .values()
            .any(|history| history.user_id == id)
        {
            return Err(format!("loan histories still reference user {}", id.value()).into());
        }
        self.working.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl LoanHistoryRepository for InMemoryTransaction {
    async fn insert_history(&mut self, history: &UserLoanHistory) -> Result<LoanHistoryId> {
        if !self.working.users.contains_key(&history.user_id) {
            return Err(missing_row("user", history.user_id.value()));
        }

        self.working.history_seq += 1;
        let id = LoanHistoryId::new(self.working.history_seq);
        self.working.histories.insert(
            id,
            UserLoanHistory::restore(
                id,
                history.user_id,
                history.book_name.clone(),
                history.status,
            ),
        );
        Ok(id)
    }

    async fn update_history(&mut self, history: &UserLoanHistory) -> Result<()> {
        let id = history.id.ok_or_else(|| missing_id("loan history"))?;
        let stored = self
            .working
            .histories
            .get_mut(&id)
            .ok_or_else(|| missing_row("loan history", id.value()))?;
        stored.status = history.status;
        Ok(())
    }

    async fn find_history_by_book_name_and_status(
        &mut self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>> {
        Ok(self
            .working
            .histories
            .values()
            .find(|history| history.book_name == book_name && history.status == status)
            .cloned())
    }

    async fn count_histories_by_status(&mut self, status: UserLoanStatus) -> Result<u64> {
        Ok(self
            .working
            .histories
            .values()
            .filter(|history| history.status == status)
            .count() as u64)
    }

    async fn find_all_histories(&mut self) -> Result<Vec<UserLoanHistory>> {
        Ok(self.working.histories.values().cloned().collect())
    }

    async fn find_histories_by_user(&mut self, user_id: UserId) -> Result<Vec<UserLoanHistory>> {
        Ok(self
            .working
            .histories
            .values()
            .filter(|history| history.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_histories_by_user(&mut self, user_id: UserId) -> Result<u64> {
        let before = self.working.histories.len();
        self.working
            .histories
            .retain(|_, history| history.user_id != user_id);
        Ok((before - self.working.histories.len()) as u64)
    }
}
