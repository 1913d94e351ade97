//! Access policy
//!
//! Every protected use-case names an [`Action`]; [`authorize`] decides from
//! the authenticated [`Principal`] alone.

use crate::domain::{DomainError, DomainResult, UserRole};

/// Authenticated caller, decoded from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadOwnAccount,
    /// Create, read or update the caller's own DJ profile
    ManageOwnProfile,
    /// Create or list the caller's own bookings
    ManageOwnBookings,
    ReviewDjs,
    ChangeDjStatus,
    EditRatings,
    FixRoles,
    Cleanup,
}

impl Action {
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::ReviewDjs | Self::ChangeDjStatus | Self::EditRatings | Self::FixRoles | Self::Cleanup
        )
    }
}

/// Check `action` for `principal`, returning the principal on success.
pub fn authorize(principal: Option<&Principal>, action: Action) -> DomainResult<&Principal> {
    let principal =
        principal.ok_or_else(|| DomainError::Unauthorized("Authentication required".into()))?;

    if action.requires_admin() && !principal.is_admin() {
        tracing::debug!(user_id = %principal.user_id, ?action, "Admin action denied");
        return Err(DomainError::Forbidden("Admin access required".into()));
    }

    Ok(principal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: UserRole) -> Principal {
        Principal {
            user_id: "u1".into(),
            email: "u1@example.com".into(),
            name: None,
            role,
        }
    }

    #[test]
    fn anonymous_is_unauthorized() {
        let err = authorize(None, Action::ManageOwnProfile).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[test]
    fn non_admin_is_forbidden_from_admin_actions() {
        for role in [UserRole::User, UserRole::Dj] {
            let p = principal(role);
            for action in [
                Action::ReviewDjs,
                Action::ChangeDjStatus,
                Action::EditRatings,
                Action::FixRoles,
                Action::Cleanup,
            ] {
                let err = authorize(Some(&p), action).unwrap_err();
                assert!(matches!(err, DomainError::Forbidden(_)), "{:?}", action);
            }
        }
    }

    #[test]
    fn any_principal_may_manage_own_resources() {
        let p = principal(UserRole::User);
        assert!(authorize(Some(&p), Action::ManageOwnProfile).is_ok());
        assert!(authorize(Some(&p), Action::ManageOwnBookings).is_ok());
        assert!(authorize(Some(&p), Action::ReadOwnAccount).is_ok());
    }

    #[test]
    fn admin_may_do_everything() {
        let p = principal(UserRole::Admin);
        assert!(authorize(Some(&p), Action::Cleanup).is_ok());
        assert!(authorize(Some(&p), Action::ManageOwnProfile).is_ok());
    }
}
