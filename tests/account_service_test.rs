//! Account service unit tests (sign-up and external sign-in).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use mockall::Sequence;
use uuid::Uuid;

use accounts_api::domain::{NewUser, UserRecord};
use accounts_api::errors::{AppError, ValidationError};
use accounts_api::infra::MockUserRepository;
use accounts_api::services::{
    AccountManager, AccountService, MockIdGenerator, MockPasswordHasher, MockTokenEncrypter,
};

fn record_from_new(new_user: &NewUser) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id: new_user.id,
        name: new_user.name.clone(),
        email: new_user.email.clone(),
        password_hash: new_user.password_hash.clone(),
        access_token: new_user.access_token.clone(),
        created_at: now,
        updated_at: now,
    }
}

fn existing_record(id: Uuid, email: &str) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id,
        name: "Jo".to_string(),
        email: email.to_string(),
        password_hash: None,
        access_token: "old-token".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn service(
    repo: MockUserRepository,
    hasher: MockPasswordHasher,
    encrypter: MockTokenEncrypter,
    id_generator: MockIdGenerator,
) -> AccountManager {
    AccountManager::new(
        Arc::new(repo),
        Arc::new(hasher),
        Arc::new(encrypter),
        Arc::new(id_generator),
    )
}

#[tokio::test]
async fn sign_up_succeeds_against_empty_repository() {
    let id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email == "jo@x.com")
        .returning(|_| Ok(None));
    repo.expect_find_by_id()
        .with(eq(id))
        .returning(|_| Ok(None));
    repo.expect_add()
        .withf(move |new_user| {
            new_user.id == id
                && new_user.name == "Jo"
                && new_user.email == "jo@x.com"
                && new_user.password_hash == Some("hashed:abc123".to_string())
                && new_user.access_token == "token-1"
        })
        .returning(|new_user| Ok(record_from_new(&new_user)));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|plaintext| plaintext == "abc123")
        .returning(|plaintext| Ok(format!("hashed:{plaintext}")));

    let mut encrypter = MockTokenEncrypter::new();
    encrypter
        .expect_encrypt()
        .with(eq(id))
        .returning(|_| Ok("token-1".to_string()));

    let mut id_generator = MockIdGenerator::new();
    id_generator.expect_generate().return_const(id);

    let service = service(repo, hasher, encrypter, id_generator);
    let visible = service
        .sign_up("Jo".to_string(), "jo@x.com".to_string(), "abc123".to_string())
        .await
        .unwrap();

    assert_eq!(visible.id, id);
    assert_eq!(visible.name, "Jo");
    assert_eq!(visible.email, "jo@x.com");
    assert_eq!(visible.access_token, "token-1");
}

#[tokio::test]
async fn sign_up_with_existing_email_never_touches_other_ports() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(existing_record(Uuid::new_v4(), email))));
    repo.expect_add().times(0);

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let mut encrypter = MockTokenEncrypter::new();
    encrypter.expect_encrypt().times(0);

    let mut id_generator = MockIdGenerator::new();
    id_generator.expect_generate().times(0);

    let service = service(repo, hasher, encrypter, id_generator);
    let result = service
        .sign_up("Jo".to_string(), "jo@x.com".to_string(), "abc123".to_string())
        .await;

    assert!(matches!(result, Err(AppError::UserAlreadyExists)));
}

#[tokio::test]
async fn sign_up_propagates_validation_error_without_repository_calls() {
    // No expectations set: any repository or port call would panic
    let service = service(
        MockUserRepository::new(),
        MockPasswordHasher::new(),
        MockTokenEncrypter::new(),
        MockIdGenerator::new(),
    );

    let result = service
        .sign_up("".to_string(), "a@b.com".to_string(), "abc123".to_string())
        .await;

    match result {
        Err(AppError::Validation(ValidationError::InvalidName(raw))) => assert_eq!(raw, ""),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn sign_up_retries_id_generation_on_collision() {
    let taken = Uuid::new_v4();
    let free = Uuid::new_v4();

    let mut id_generator = MockIdGenerator::new();
    let mut seq = Sequence::new();
    id_generator
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(taken);
    id_generator
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(free);

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_find_by_id()
        .with(eq(taken))
        .returning(|id| Ok(Some(existing_record(id, "taken@x.com"))));
    repo.expect_find_by_id()
        .with(eq(free))
        .returning(|_| Ok(None));
    repo.expect_add()
        .withf(move |new_user| new_user.id == free)
        .returning(|new_user| Ok(record_from_new(&new_user)));

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok("hashed".to_string()));

    let mut encrypter = MockTokenEncrypter::new();
    encrypter
        .expect_encrypt()
        .returning(|id| Ok(format!("token-{id}")));

    let service = service(repo, hasher, encrypter, id_generator);
    let visible = service
        .sign_up("Jo".to_string(), "jo@x.com".to_string(), "abc123".to_string())
        .await
        .unwrap();

    assert_eq!(visible.id, free);
}

#[tokio::test]
async fn sign_up_fails_when_id_space_looks_exhausted() {
    use accounts_api::config::MAX_ID_GENERATION_ATTEMPTS;

    let taken = Uuid::new_v4();

    let mut id_generator = MockIdGenerator::new();
    id_generator
        .expect_generate()
        .times(MAX_ID_GENERATION_ATTEMPTS as usize)
        .return_const(taken);

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_find_by_id()
        .times(MAX_ID_GENERATION_ATTEMPTS as usize)
        .returning(|id| Ok(Some(existing_record(id, "taken@x.com"))));
    repo.expect_add().times(0);

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok("hashed".to_string()));

    let service = service(repo, hasher, MockTokenEncrypter::new(), id_generator);
    let result = service
        .sign_up("Jo".to_string(), "jo@x.com".to_string(), "abc123".to_string())
        .await;

    assert!(matches!(result, Err(AppError::IdGenerationExhausted)));
}

#[tokio::test]
async fn external_sign_in_rotates_token_for_existing_user() {
    let id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(move |email| Ok(Some(existing_record(id, email))));
    repo.expect_update_by_email()
        .withf(|email, patch| {
            email == "jo@x.com"
                && patch.access_token.is_some()
                && patch.name.is_none()
                && patch.email.is_none()
                && patch.password_hash.is_none()
        })
        .returning(move |email, patch| {
            let mut record = existing_record(id, email);
            record.access_token = patch.access_token.unwrap();
            Ok(record)
        });
    repo.expect_add().times(0);

    let calls = AtomicU32::new(0);
    let mut encrypter = MockTokenEncrypter::new();
    encrypter.expect_encrypt().with(eq(id)).returning(move |_| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{n}"))
    });

    let service = service(
        repo,
        MockPasswordHasher::new(),
        encrypter,
        MockIdGenerator::new(),
    );

    let first = service
        .external_sign_in("Jo".to_string(), "jo@x.com".to_string())
        .await
        .unwrap();
    let second = service
        .external_sign_in("Jo".to_string(), "jo@x.com".to_string())
        .await
        .unwrap();

    // Same account, fresh token on every call
    assert_eq!(first.id, second.id);
    assert_ne!(first.access_token, second.access_token);
}

#[tokio::test]
async fn external_sign_in_creates_account_for_unseen_email() {
    let id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_find_by_id().with(eq(id)).returning(|_| Ok(None));
    repo.expect_add()
        .times(1)
        .withf(move |new_user| {
            new_user.id == id
                && new_user.email == "new@x.com"
                && new_user.password_hash.is_none()
        })
        .returning(|new_user| Ok(record_from_new(&new_user)));
    repo.expect_update_by_email().times(0);

    let mut id_generator = MockIdGenerator::new();
    id_generator.expect_generate().return_const(id);

    let mut encrypter = MockTokenEncrypter::new();
    encrypter
        .expect_encrypt()
        .with(eq(id))
        .returning(|_| Ok("fresh-token".to_string()));

    let service = service(repo, MockPasswordHasher::new(), encrypter, id_generator);
    let visible = service
        .external_sign_in("Jo".to_string(), "new@x.com".to_string())
        .await
        .unwrap();

    assert_eq!(visible.id, id);
    assert_eq!(visible.access_token, "fresh-token");
}

#[tokio::test]
async fn external_sign_in_rejects_invalid_email() {
    let service = service(
        MockUserRepository::new(),
        MockPasswordHasher::new(),
        MockTokenEncrypter::new(),
        MockIdGenerator::new(),
    );

    let result = service
        .external_sign_in("Jo".to_string(), "not-an-email".to_string())
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::InvalidEmail(_)))
    ));
}
