mod common;

use rusty_library_app::adapters::postgres::PostgresStore;
use rusty_library_app::application::{
    LibraryApplicationError, ServiceDependencies, count_loaned_book, delete_user,
    get_book_statistics, get_user_loan_histories, loan_book, return_book, save_book, save_user,
};
use rusty_library_app::domain::commands::*;
use rusty_library_app::domain::{Book, BookType, User, UserLoanStatus, loan_history};
use rusty_library_app::ports::{BookStat, UnitOfWork};
use serial_test::serial;
use sqlx::PgPool;
use std::sync::Arc;

/// テストデータをクリーンアップ
async fn cleanup(pool: &PgPool) {
    sqlx::query("TRUNCATE user_loan_history, users, book RESTART IDENTITY")
        .execute(pool)
        .await
        .expect("Failed to cleanup test data");
}

async fn setup() -> (PgPool, PostgresStore) {
    let pool = common::create_test_pool().await;
    cleanup(&pool).await;
    let store = PostgresStore::new(pool.clone());
    (pool, store)
}

fn deps(store: &PostgresStore) -> ServiceDependencies {
    ServiceDependencies {
        store: Arc::new(store.clone()),
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_postgres_book_insert_and_find() {
    let (pool, store) = setup().await;

    let mut tx = store.begin().await.unwrap();
    let id = tx
        .insert_book(&Book::new("오브젝트", BookType::Computer).unwrap())
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = store.begin().await.unwrap();
    let book = tx.find_book_by_name("오브젝트").await.unwrap().unwrap();
    assert_eq!(book.id, Some(id));
    assert_eq!(book.book_type, BookType::Computer);
    assert!(tx.find_book_by_name("없는책").await.unwrap().is_none());
    tx.rollback().await.unwrap();

    cleanup(&pool).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_postgres_rollback_discards_changes() {
    let (pool, store) = setup().await;

    let mut tx = store.begin().await.unwrap();
    tx.insert_user(&User::new("A", Some(20)).unwrap())
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let mut tx = store.begin().await.unwrap();
    assert!(tx.find_all_users().await.unwrap().is_empty());
    tx.rollback().await.unwrap();

    cleanup(&pool).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_postgres_history_queries() {
    let (pool, store) = setup().await;

    let mut tx = store.begin().await.unwrap();
    let user_id = tx.insert_user(&User::new("A", None).unwrap()).await.unwrap();
    let loaned = tx
        .insert_history(&loan_history::loan_book(user_id, "책1"))
        .await
        .unwrap();
    tx.insert_history(&loan_history::loan_book(user_id, "책2"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = store.begin().await.unwrap();
    let history = tx
        .find_history_by_book_name_and_status("책1", UserLoanStatus::Loaned)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(history.id, Some(loaned));

    let returned = loan_history::return_book(&history).unwrap();
    tx.update_history(&returned).await.unwrap();

    assert_eq!(
        tx.count_histories_by_status(UserLoanStatus::Loaned)
            .await
            .unwrap(),
        1
    );
    assert_eq!(tx.find_histories_by_user(user_id).await.unwrap().len(), 2);

    // 履歴が残っている会員は削除できない
    assert!(tx.delete_user(user_id).await.is_err());
    tx.rollback().await.unwrap();

    cleanup(&pool).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_postgres_service_flow() {
    let (pool, store) = setup().await;
    let deps = deps(&store);

    save_user(
        &deps,
        SaveUser {
            name: "정상윤".to_string(),
            age: Some(30),
        },
    )
    .await
    .unwrap();
    for (name, book_type) in [
        ("A", BookType::Computer),
        ("B", BookType::Computer),
        ("C", BookType::Science),
    ] {
        save_book(
            &deps,
            SaveBook {
                name: name.to_string(),
                book_type,
            },
        )
        .await
        .unwrap();
    }

    let loan = || LoanBook {
        user_name: "정상윤".to_string(),
        book_name: "A".to_string(),
    };
    loan_book(&deps, loan()).await.unwrap();
    let err = loan_book(&deps, loan()).await.unwrap_err();
    assert!(matches!(err, LibraryApplicationError::BookAlreadyLoaned));
    assert_eq!(count_loaned_book(&deps).await.unwrap(), 1);

    let err = delete_user(
        &deps,
        DeleteUser {
            name: "정상윤".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LibraryApplicationError::UserHasActiveLoans));

    return_book(
        &deps,
        ReturnBook {
            user_name: "정상윤".to_string(),
            book_name: "A".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(count_loaned_book(&deps).await.unwrap(), 0);

    let histories = get_user_loan_histories(&deps).await.unwrap();
    assert_eq!(histories.len(), 1);
    assert_eq!(histories[0].books.len(), 1);
    assert!(histories[0].books[0].is_returned);

    assert_eq!(
        get_book_statistics(&deps).await.unwrap(),
        vec![
            BookStat {
                book_type: BookType::Computer,
                count: 2
            },
            BookStat {
                book_type: BookType::Science,
                count: 1
            },
        ]
    );

    delete_user(
        &deps,
        DeleteUser {
            name: "정상윤".to_string(),
        },
    )
    .await
    .unwrap();

    cleanup(&pool).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_postgres_accepts_long_names_and_full_age_range() {
    let (pool, store) = setup().await;
    let deps = deps(&store);
    let long_name = "A".repeat(256);

    save_book(
        &deps,
        SaveBook {
            name: long_name.clone(),
            book_type: BookType::Language,
        },
    )
    .await
    .unwrap();
    save_user(
        &deps,
        SaveUser {
            name: long_name.clone(),
            age: Some(u32::MAX),
        },
    )
    .await
    .unwrap();
    loan_book(
        &deps,
        LoanBook {
            user_name: long_name.clone(),
            book_name: long_name.clone(),
        },
    )
    .await
    .unwrap();

    let mut tx = store.begin().await.unwrap();
    let user = tx.find_user_by_name(&long_name).await.unwrap().unwrap();
    assert_eq!(user.name, long_name);
    assert_eq!(user.age, Some(u32::MAX));
    let book = tx.find_book_by_name(&long_name).await.unwrap().unwrap();
    assert_eq!(book.name, long_name);
    assert!(
        tx.find_history_by_book_name_and_status(&long_name, UserLoanStatus::Loaned)
            .await
            .unwrap()
            .is_some()
    );
    tx.rollback().await.unwrap();

    cleanup(&pool).await;
}
