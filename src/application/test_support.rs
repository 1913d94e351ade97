//! Shared fixtures for application-layer tests

use std::sync::Arc;

use crate::domain::{CreateUserDto, RepositoryProvider, User, UserRole};
use crate::infrastructure::database::connect_in_memory;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

pub async fn repos() -> Arc<dyn RepositoryProvider> {
    let db = connect_in_memory().await.expect("in-memory database");
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

pub async fn user(repos: &Arc<dyn RepositoryProvider>, email: &str, role: UserRole) -> User {
    repos
        .users()
        .create(CreateUserDto {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".into(),
            role,
            email_verified_at: None,
        })
        .await
        .expect("create user")
}
