use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    DjListing, DjProfile, DjProfileChanges, DjProfileFilter, DjProfileRepository, DjStatus,
    DomainError, DomainResult, NewDjProfile, Patch, RatingChanges, StatusChange,
};
use crate::infrastructure::database::entities::{dj_profile, user};
use crate::shared::{db_err, db_err_with_conflict, InfraError, PaginatedResult};

pub struct SeaOrmDjProfileRepository {
    db: DatabaseConnection,
}

impl SeaOrmDjProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Single UPDATE of the `Set` columns of `active` on the row where
    /// `column = key`, then the row as stored.
    async fn write_columns(
        &self,
        active: dj_profile::ActiveModel,
        column: dj_profile::Column,
        field: &'static str,
        key: &str,
    ) -> DomainResult<DjProfile> {
        let result = dj_profile::Entity::update_many()
            .set(active)
            .filter(column.eq(key))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("DjProfile", field, key));
        }

        dj_profile::Entity::find()
            .filter(column.eq(key))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(profile_model_to_domain)
            .transpose()?
            .ok_or_else(|| DomainError::not_found("DjProfile", field, key))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: dj_profile::DjStatus) -> DjStatus {
    match status {
        dj_profile::DjStatus::Pending => DjStatus::Pending,
        dj_profile::DjStatus::Verified => DjStatus::Verified,
        dj_profile::DjStatus::Rejected => DjStatus::Rejected,
        dj_profile::DjStatus::Suspended => DjStatus::Suspended,
    }
}

fn domain_status_to_entity(status: DjStatus) -> dj_profile::DjStatus {
    match status {
        DjStatus::Pending => dj_profile::DjStatus::Pending,
        DjStatus::Verified => dj_profile::DjStatus::Verified,
        DjStatus::Rejected => dj_profile::DjStatus::Rejected,
        DjStatus::Suspended => dj_profile::DjStatus::Suspended,
    }
}

fn encode_list(values: &[String]) -> DomainResult<String> {
    serde_json::to_string(values).map_err(|e| InfraError::Serialization(e).into())
}

fn decode_list(raw: &str) -> DomainResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| InfraError::Serialization(e).into())
}

fn profile_model_to_domain(model: dj_profile::Model) -> DomainResult<DjProfile> {
    Ok(DjProfile {
        genres: decode_list(&model.genres)?,
        credentials: decode_list(&model.credentials)?,
        id: model.id,
        user_id: model.user_id,
        bio: model.bio,
        hourly_rate: model.hourly_rate,
        experience: model.experience,
        phone: model.phone,
        instagram: model.instagram,
        facebook: model.facebook,
        youtube: model.youtube,
        tiktok: model.tiktok,
        twitter: model.twitter,
        website: model.website,
        city: model.city,
        state: model.state,
        zip_code: model.zip_code,
        latitude: model.latitude,
        longitude: model.longitude,
        radius: model.radius,
        profile_image: model.profile_image,
        status: entity_status_to_domain(model.status),
        verification_notes: model.verification_notes,
        verified_at: model.verified_at,
        rating: model.rating,
        total_reviews: model.total_reviews,
        total_bookings: model.total_bookings,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn listing_to_domain(
    (profile, owner): (dj_profile::Model, Option<user::Model>),
) -> DomainResult<DjListing> {
    let (owner_name, owner_image) = owner.map(|u| (u.name, u.image)).unwrap_or_default();
    Ok(DjListing {
        profile: profile_model_to_domain(profile)?,
        owner_name,
        owner_image,
    })
}

fn profile_to_active_model(profile: &DjProfile) -> DomainResult<dj_profile::ActiveModel> {
    Ok(dj_profile::ActiveModel {
        id: Set(profile.id.clone()),
        user_id: Set(profile.user_id.clone()),
        bio: Set(profile.bio.clone()),
        genres: Set(encode_list(&profile.genres)?),
        hourly_rate: Set(profile.hourly_rate),
        experience: Set(profile.experience),
        phone: Set(profile.phone.clone()),
        instagram: Set(profile.instagram.clone()),
        facebook: Set(profile.facebook.clone()),
        youtube: Set(profile.youtube.clone()),
        tiktok: Set(profile.tiktok.clone()),
        twitter: Set(profile.twitter.clone()),
        website: Set(profile.website.clone()),
        city: Set(profile.city.clone()),
        state: Set(profile.state.clone()),
        zip_code: Set(profile.zip_code.clone()),
        latitude: Set(profile.latitude),
        longitude: Set(profile.longitude),
        radius: Set(profile.radius),
        profile_image: Set(profile.profile_image.clone()),
        credentials: Set(encode_list(&profile.credentials)?),
        status: Set(domain_status_to_entity(profile.status)),
        verification_notes: Set(profile.verification_notes.clone()),
        verified_at: Set(profile.verified_at),
        rating: Set(profile.rating),
        total_reviews: Set(profile.total_reviews),
        total_bookings: Set(profile.total_bookings),
        created_at: Set(profile.created_at),
        updated_at: Set(profile.updated_at),
    })
}

fn patch_column<T>(patch: Patch<T>) -> ActiveValue<Option<T>>
where
    Option<T>: Into<sea_orm::Value>,
{
    match patch {
        Patch::Keep => NotSet,
        Patch::Clear => Set(None),
        Patch::Set(value) => Set(Some(value)),
    }
}

fn patch_list_column(patch: Patch<Vec<String>>) -> DomainResult<ActiveValue<String>> {
    Ok(match patch {
        Patch::Keep => NotSet,
        Patch::Clear => Set(encode_list(&[])?),
        Patch::Set(values) => Set(encode_list(&values)?),
    })
}

/// Owner-writable columns only; everything else stays `NotSet`.
fn changes_to_active_model(
    changes: DjProfileChanges,
    now: DateTime<Utc>,
) -> DomainResult<dj_profile::ActiveModel> {
    Ok(dj_profile::ActiveModel {
        bio: patch_column(changes.bio),
        genres: patch_list_column(changes.genres)?,
        hourly_rate: patch_column(changes.hourly_rate),
        experience: patch_column(changes.experience),
        phone: patch_column(changes.phone),
        instagram: patch_column(changes.instagram),
        facebook: patch_column(changes.facebook),
        youtube: patch_column(changes.youtube),
        tiktok: patch_column(changes.tiktok),
        twitter: patch_column(changes.twitter),
        website: patch_column(changes.website),
        city: patch_column(changes.city),
        state: patch_column(changes.state),
        zip_code: patch_column(changes.zip_code),
        latitude: patch_column(changes.latitude),
        longitude: patch_column(changes.longitude),
        radius: patch_column(changes.radius),
        profile_image: patch_column(changes.profile_image),
        credentials: patch_list_column(changes.credentials)?,
        updated_at: Set(now),
        ..Default::default()
    })
}

/// `%needle%` for a case-insensitive LIKE, with wildcards in the input escaped
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn lower_contains<C: sea_orm::sea_query::IntoColumnRef>(column: C, needle: &str) -> Condition {
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(contains_pattern(needle)).escape('\\')),
    )
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl DjProfileRepository for SeaOrmDjProfileRepository {
    async fn create(&self, dto: NewDjProfile) -> DomainResult<DjProfile> {
        let now = Utc::now();
        let profile = DjProfile {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: dto.user_id,
            bio: dto.bio,
            genres: dto.genres,
            hourly_rate: dto.hourly_rate,
            experience: dto.experience,
            phone: dto.phone,
            instagram: dto.instagram,
            facebook: dto.facebook,
            youtube: dto.youtube,
            tiktok: dto.tiktok,
            twitter: dto.twitter,
            website: dto.website,
            city: dto.city,
            state: dto.state,
            zip_code: dto.zip_code,
            latitude: dto.latitude,
            longitude: dto.longitude,
            radius: dto.radius,
            profile_image: dto.profile_image,
            credentials: dto.credentials,
            status: DjStatus::Pending,
            verification_notes: None,
            verified_at: None,
            rating: 0.0,
            total_reviews: 0,
            total_bookings: 0,
            created_at: now,
            updated_at: now,
        };

        let model = profile_to_active_model(&profile)?
            .insert(&self.db)
            .await
            .map_err(|e| db_err_with_conflict(e, "DJ profile already exists for this user"))?;

        profile_model_to_domain(model)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DjProfile>> {
        dj_profile::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(profile_model_to_domain)
            .transpose()
    }

    async fn find_by_user_id(&self, user_id: &str) -> DomainResult<Option<DjProfile>> {
        dj_profile::Entity::find()
            .filter(dj_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(profile_model_to_domain)
            .transpose()
    }

    async fn find_listing(&self, id: &str) -> DomainResult<Option<DjListing>> {
        dj_profile::Entity::find_by_id(id.to_string())
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(listing_to_domain)
            .transpose()
    }

    async fn apply_changes(
        &self,
        user_id: &str,
        changes: DjProfileChanges,
        now: DateTime<Utc>,
    ) -> DomainResult<DjProfile> {
        let active = changes_to_active_model(changes, now)?;
        self.write_columns(active, dj_profile::Column::UserId, "userId", user_id)
            .await
    }

    async fn set_status(&self, id: &str, change: StatusChange) -> DomainResult<DjProfile> {
        let active = dj_profile::ActiveModel {
            status: Set(domain_status_to_entity(change.status)),
            verified_at: change.verified_at().map_or(NotSet, |at| Set(Some(at))),
            verification_notes: change.notes.map_or(NotSet, |notes| Set(Some(notes))),
            updated_at: Set(change.decided_at),
            ..Default::default()
        };
        self.write_columns(active, dj_profile::Column::Id, "id", id)
            .await
    }

    async fn update_rating(
        &self,
        id: &str,
        changes: RatingChanges,
        now: DateTime<Utc>,
    ) -> DomainResult<DjProfile> {
        let active = dj_profile::ActiveModel {
            rating: changes.rating.map_or(NotSet, Set),
            total_reviews: changes.total_reviews.map_or(NotSet, Set),
            total_bookings: changes.total_bookings.map_or(NotSet, Set),
            updated_at: Set(now),
            ..Default::default()
        };
        self.write_columns(active, dj_profile::Column::Id, "id", id)
            .await
    }

    async fn list(&self, filter: DjProfileFilter) -> DomainResult<PaginatedResult<DjListing>> {
        let mut query = dj_profile::Entity::find().find_also_related(user::Entity);

        if let Some(status) = filter.status {
            query = query.filter(dj_profile::Column::Status.eq(domain_status_to_entity(status)));
        }

        // Exact membership in the JSON genre array
        if let Some(genre) = filter.genre {
            query = query.filter(Expr::cust_with_values(
                "EXISTS (SELECT 1 FROM json_each(\"dj_profiles\".\"genres\") WHERE json_each.value = $1)",
                [genre],
            ));
        }

        if let Some(ref city) = filter.city {
            query = query.filter(lower_contains((dj_profile::Entity, dj_profile::Column::City), city));
        }

        if let Some(min) = filter.min_rate {
            query = query.filter(dj_profile::Column::HourlyRate.gte(min));
        }
        if let Some(max) = filter.max_rate {
            query = query.filter(dj_profile::Column::HourlyRate.lte(max));
        }

        if let Some(ref search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(lower_contains((dj_profile::Entity, dj_profile::Column::Bio), search))
                    .add(lower_contains((user::Entity, user::Column::Name), search)),
            );
        }

        query = query
            .order_by_desc(dj_profile::Column::Rating)
            .order_by_desc(dj_profile::Column::CreatedAt);

        // Count total
        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        // Paginate
        let params = filter.pagination;
        let rows = query
            .offset(params.offset())
            .limit(u64::from(params.limit))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = rows
            .into_iter()
            .map(listing_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(items, total, params))
    }
}
