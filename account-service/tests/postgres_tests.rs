//! Record store tests against a real Postgres server.
//!
//! Run with `DATABASE_URL` pointing at a server whose user may create
//! databases: `cargo test -p account-service --test postgres_tests -- --ignored`.

mod common;

use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::NewUser;
use account_service::domain::user::models::Role;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::models::Username;
use account_service::domain::user::ports::UserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::user::errors::UserError;
use chrono::Utc;
use common::TestDb;

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: Username::new(name.to_string()).unwrap(),
        email: EmailAddress::new(format!("{}@company.com", name)).unwrap(),
        role: Role::Customer,
        password_hash: "$argon2id$test_hash".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_create_duplicates_map_to_conflicts() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    repository.create(new_user("alice")).await.unwrap();

    let mut same_username = new_user("alice");
    same_username.email = EmailAddress::new("other@company.com".to_string()).unwrap();
    let result = repository.create(same_username).await;
    assert!(
        matches!(result, Err(UserError::UsernameAlreadyExists(ref u)) if u == "alice"),
        "unexpected result: {:?}",
        result
    );

    let mut same_email = new_user("alicia");
    same_email.email = EmailAddress::new("alice@company.com".to_string()).unwrap();
    let result = repository.create(same_email).await;
    assert!(
        matches!(result, Err(UserError::EmailAlreadyExists(ref e)) if e == "alice@company.com"),
        "unexpected result: {:?}",
        result
    );

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_update_duplicates_map_to_conflicts() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let alice = repository.create(new_user("alice")).await.unwrap();
    let bob = repository.create(new_user("bob")).await.unwrap();

    let result = repository
        .update(User {
            username: alice.username.clone(),
            ..bob.clone()
        })
        .await;
    assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));

    let result = repository
        .update(User {
            email: alice.email.clone(),
            ..bob.clone()
        })
        .await;
    assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));

    // Keeping its own username and email is not a conflict
    let updated = repository
        .update(User {
            role: Role::Admin,
            ..bob.clone()
        })
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.created_at, bob.created_at);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_list_all_ordered_by_id() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    for name in ["carol", "alice", "bob"] {
        repository.create(new_user(name)).await.unwrap();
    }

    let users = repository.list_all().await.unwrap();

    let ids: Vec<i64> = users.iter().map(|user| user.id.value()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    let names: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "alice", "bob"]);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_missing_records() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let alice = repository.create(new_user("alice")).await.unwrap();

    assert_eq!(repository.find_by_id(&UserId(999)).await.unwrap(), None);
    assert!(matches!(
        repository.update(User { id: UserId(999), ..alice.clone() }).await,
        Err(UserError::NotFound(UserId(999)))
    ));

    repository.delete(&alice.id).await.unwrap();
    assert!(matches!(
        repository.delete(&alice.id).await,
        Err(UserError::NotFound(_))
    ));

    db.cleanup().await;
}
