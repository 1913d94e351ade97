use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainResult, VerificationToken, VerificationTokenRepository};
use crate::infrastructure::database::entities::email_verification_token;
use crate::shared::{db_err, db_err_with_conflict};

pub struct SeaOrmVerificationTokenRepository {
    db: DatabaseConnection,
}

impl SeaOrmVerificationTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn token_model_to_domain(model: email_verification_token::Model) -> VerificationToken {
    VerificationToken {
        id: model.id,
        email: model.email,
        token_hash: model.token_hash,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

#[async_trait]
impl VerificationTokenRepository for SeaOrmVerificationTokenRepository {
    async fn create(
        &self,
        email: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<VerificationToken> {
        let model = email_verification_token::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(email.to_string()),
            token_hash: Set(token_hash.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_err_with_conflict(e, "Verification token collision"))?;

        Ok(token_model_to_domain(model))
    }

    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<VerificationToken>> {
        let model = email_verification_token::Entity::find()
            .filter(email_verification_token::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(token_model_to_domain))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        email_verification_token::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let result = email_verification_token::Entity::delete_many()
            .filter(email_verification_token::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::connect_in_memory;
    use chrono::Duration;

    #[tokio::test]
    async fn delete_expired_keeps_live_tokens() {
        let repo = SeaOrmVerificationTokenRepository::new(connect_in_memory().await.unwrap());
        let now = Utc::now();
        repo.create("old@example.com", "h-old", now - Duration::hours(1))
            .await
            .unwrap();
        repo.create("new@example.com", "h-new", now + Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert!(repo.find_by_hash("h-old").await.unwrap().is_none());
        assert!(repo.find_by_hash("h-new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_is_single_use() {
        let repo = SeaOrmVerificationTokenRepository::new(connect_in_memory().await.unwrap());
        let token = repo
            .create("a@example.com", "h", Utc::now() + Duration::hours(24))
            .await
            .unwrap();
        repo.delete(&token.id).await.unwrap();
        assert!(repo.find_by_hash("h").await.unwrap().is_none());
    }
}
