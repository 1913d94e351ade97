use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::domain::{
    CreateUserDto, DeletedAccounts, DomainError, DomainResult, User, UserRepository, UserRole,
};
use crate::infrastructure::database::entities::{booking, dj_profile, email_verification_token, user};
use crate::shared::{db_err, db_err_with_conflict};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Dj => UserRole::Dj,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Dj => user::UserRole::Dj,
        UserRole::Admin => user::UserRole::Admin,
    }
}

pub(crate) fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        email_verified_at: model.email_verified_at,
        password_hash: model.password_hash,
        image: model.image,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

impl SeaOrmUserRepository {
    async fn find_model(&self, id: &str) -> DomainResult<user::Model> {
        user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(Some(dto.name)),
            email: Set(dto.email),
            email_verified_at: Set(dto.email_verified_at),
            password_hash: Set(Some(dto.password_hash)),
            image: Set(None),
            role: Set(domain_role_to_entity(dto.role)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_err_with_conflict(e, "Email already registered"))?;

        Ok(user_model_to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn mark_email_verified(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.email_verified_at = Set(Some(at));
        active.updated_at = Set(at);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<User> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.role = Set(domain_role_to_entity(role));
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.map_err(db_err)?;
        Ok(user_model_to_domain(model))
    }

    async fn upsert_admin(&self, email: &str, name: &str, password_hash: &str) -> DomainResult<User> {
        let now = Utc::now();
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = match existing {
            Some(model) => {
                let verified_at = model.email_verified_at.unwrap_or(now);
                let mut active = model.into_active_model();
                active.role = Set(user::UserRole::Admin);
                active.password_hash = Set(Some(password_hash.to_string()));
                active.email_verified_at = Set(Some(verified_at));
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => user::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                name: Set(Some(name.to_string())),
                email: Set(email.to_string()),
                email_verified_at: Set(Some(now)),
                password_hash: Set(Some(password_hash.to_string())),
                image: Set(None),
                role: Set(user::UserRole::Admin),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(|e| db_err_with_conflict(e, "Email already registered"))?,
        };

        Ok(user_model_to_domain(model))
    }

    async fn delete_by_emails(&self, emails: &[String]) -> DomainResult<DeletedAccounts> {
        if emails.is_empty() {
            return Ok(DeletedAccounts::default());
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        let user_ids: Vec<String> = user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::Email.is_in(emails.iter().cloned()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err)?;

        let profile_ids: Vec<String> = dj_profile::Entity::find()
            .select_only()
            .column(dj_profile::Column::Id)
            .filter(dj_profile::Column::UserId.is_in(user_ids.clone()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err)?;

        let bookings = booking::Entity::delete_many()
            .filter(
                booking::Column::UserId
                    .is_in(user_ids.clone())
                    .or(booking::Column::DjId.is_in(profile_ids.clone())),
            )
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;

        let dj_profiles = dj_profile::Entity::delete_many()
            .filter(dj_profile::Column::Id.is_in(profile_ids))
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;

        email_verification_token::Entity::delete_many()
            .filter(email_verification_token::Column::Email.is_in(emails.iter().cloned()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let users = user::Entity::delete_many()
            .filter(user::Column::Id.is_in(user_ids))
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;

        txn.commit().await.map_err(db_err)?;

        info!(bookings, dj_profiles, users, "Deleted users by email");
        Ok(DeletedAccounts {
            bookings,
            dj_profiles,
            users,
        })
    }
}
