//! Raw profile input and its normalisation into domain DTOs

use crate::domain::{DjProfileChanges, DomainResult, NewDjProfile, Patch};
use crate::shared::validations::{parse_f64, parse_i32, NumericInput};
use crate::shared::DomainError;

/// Profile fields as submitted on creation. `None` means absent or null.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub bio: Option<String>,
    pub genres: Option<Vec<String>>,
    pub hourly_rate: Option<NumericInput>,
    pub experience: Option<NumericInput>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<NumericInput>,
    pub longitude: Option<NumericInput>,
    pub radius: Option<NumericInput>,
    pub profile_image: Option<String>,
    pub credentials: Option<Vec<String>>,
}

/// Partial update. Outer `None`: key absent. `Some(None)`: key sent as null.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatchInput {
    pub bio: Option<Option<String>>,
    pub genres: Option<Option<Vec<String>>>,
    pub hourly_rate: Option<Option<NumericInput>>,
    pub experience: Option<Option<NumericInput>>,
    pub phone: Option<Option<String>>,
    pub instagram: Option<Option<String>>,
    pub facebook: Option<Option<String>>,
    pub youtube: Option<Option<String>>,
    pub tiktok: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub zip_code: Option<Option<String>>,
    pub latitude: Option<Option<NumericInput>>,
    pub longitude: Option<Option<NumericInput>>,
    pub radius: Option<Option<NumericInput>>,
    pub profile_image: Option<Option<String>>,
    pub credentials: Option<Option<Vec<String>>>,
}

fn non_negative_f64(field: &str, value: Option<f64>) -> DomainResult<Option<f64>> {
    match value {
        Some(v) if v < 0.0 => Err(DomainError::validation(format!("{field} must not be negative"))),
        other => Ok(other),
    }
}

fn non_negative_i32(field: &str, value: Option<i32>) -> DomainResult<Option<i32>> {
    match value {
        Some(v) if v < 0 => Err(DomainError::validation(format!("{field} must not be negative"))),
        other => Ok(other),
    }
}

fn opt_f64(field: &str, input: Option<&NumericInput>) -> DomainResult<Option<f64>> {
    match input {
        Some(raw) => parse_f64(field, raw),
        None => Ok(None),
    }
}

fn opt_i32(field: &str, input: Option<&NumericInput>) -> DomainResult<Option<i32>> {
    match input {
        Some(raw) => parse_i32(field, raw),
        None => Ok(None),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProfileInput {
    pub fn into_new_profile(self, user_id: &str) -> DomainResult<NewDjProfile> {
        Ok(NewDjProfile {
            user_id: user_id.to_string(),
            hourly_rate: non_negative_f64(
                "hourlyRate",
                opt_f64("hourlyRate", self.hourly_rate.as_ref())?,
            )?,
            experience: non_negative_i32(
                "experience",
                opt_i32("experience", self.experience.as_ref())?,
            )?,
            latitude: opt_f64("latitude", self.latitude.as_ref())?,
            longitude: opt_f64("longitude", self.longitude.as_ref())?,
            radius: opt_i32("radius", self.radius.as_ref())?,
            bio: self.bio,
            genres: self.genres.unwrap_or_default(),
            phone: self.phone,
            instagram: self.instagram,
            facebook: self.facebook,
            youtube: self.youtube,
            tiktok: self.tiktok,
            twitter: self.twitter,
            website: self.website,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            profile_image: non_blank(self.profile_image),
            credentials: self.credentials.unwrap_or_default(),
        })
    }
}

fn text_patch(value: Option<Option<String>>) -> Patch<String> {
    match value {
        None => Patch::Keep,
        Some(None) => Patch::Clear,
        Some(Some(v)) => Patch::Set(v),
    }
}

fn list_patch(value: Option<Option<Vec<String>>>) -> Patch<Vec<String>> {
    match value {
        None => Patch::Keep,
        Some(None) => Patch::Clear,
        Some(Some(v)) => Patch::Set(v),
    }
}

fn f64_patch(field: &str, value: Option<Option<NumericInput>>) -> DomainResult<Patch<f64>> {
    Ok(match value {
        None => Patch::Keep,
        Some(None) => Patch::Clear,
        Some(Some(raw)) => match parse_f64(field, &raw)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        },
    })
}

fn i32_patch(field: &str, value: Option<Option<NumericInput>>) -> DomainResult<Patch<i32>> {
    Ok(match value {
        None => Patch::Keep,
        Some(None) => Patch::Clear,
        Some(Some(raw)) => match parse_i32(field, &raw)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        },
    })
}

fn reject_negative<T: PartialOrd + Default>(field: &str, patch: &Patch<T>) -> DomainResult<()> {
    match patch {
        Patch::Set(v) if *v < T::default() => Err(DomainError::validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

impl ProfilePatchInput {
    pub fn into_changes(self) -> DomainResult<DjProfileChanges> {
        let hourly_rate = f64_patch("hourlyRate", self.hourly_rate)?;
        reject_negative("hourlyRate", &hourly_rate)?;
        let experience = i32_patch("experience", self.experience)?;
        reject_negative("experience", &experience)?;

        // An empty image reference never overwrites the stored one
        let profile_image = match self.profile_image {
            Some(Some(v)) if v.is_empty() => Patch::Keep,
            other => text_patch(other),
        };

        Ok(DjProfileChanges {
            bio: text_patch(self.bio),
            genres: list_patch(self.genres),
            hourly_rate,
            experience,
            phone: text_patch(self.phone),
            instagram: text_patch(self.instagram),
            facebook: text_patch(self.facebook),
            youtube: text_patch(self.youtube),
            tiktok: text_patch(self.tiktok),
            twitter: text_patch(self.twitter),
            website: text_patch(self.website),
            city: text_patch(self.city),
            state: text_patch(self.state),
            zip_code: text_patch(self.zip_code),
            latitude: f64_patch("latitude", self.latitude)?,
            longitude: f64_patch("longitude", self.longitude)?,
            radius: i32_patch("radius", self.radius)?,
            profile_image,
            credentials: list_patch(self.credentials),
        })
    }
}
