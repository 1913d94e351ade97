//! Identity service — application-layer orchestration
//!
//! Registration, email verification, login and the admin account
//! operations. HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use super::access::Principal;
use crate::application::ports::{Mailer, VerificationMail};
use crate::config::RegistrationMode;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, RepositoryProvider, User, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::crypto::token::{generate_verification_token, hash_token};
use crate::shared::validations::{is_basic_email, required};
use crate::shared::InfraError;

const MIN_PASSWORD_LEN: usize = 6;

const MSG_DEV: &str = "Registration successful! You can now sign in.";
const MSG_SENT: &str = "Registration successful! Please check your email to verify your account.";
const MSG_NOT_SENT: &str =
    "Registration successful! Email verification failed to send. Please contact support.";

/// Registration behaviour knobs
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub mode: RegistrationMode,
    /// Origin for links in mail and redirects, without trailing slash
    pub public_base_url: String,
    pub token_ttl_hours: i64,
    pub mail_timeout: Duration,
    pub bcrypt_cost: u32,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            mode: RegistrationMode::Development,
            public_base_url: "http://localhost:8080".into(),
            token_ttl_hours: 24,
            mail_timeout: Duration::from_secs(10),
            bcrypt_cost: crate::infrastructure::crypto::password::DEFAULT_COST,
        }
    }
}

/// Raw registration request
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    /// USER when absent
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub user: User,
    pub token_issued: bool,
    pub email_sent: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct VerifiedEmail {
    pub email: String,
    /// Where the browser goes next
    pub redirect_url: String,
}

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub bookings: u64,
    pub dj_profiles: u64,
    pub users: u64,
}

/// Identity service — orchestrates accounts and authentication.
pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn Mailer>,
    jwt_config: JwtConfig,
    settings: IdentitySettings,
}

impl IdentityService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        mailer: Arc<dyn Mailer>,
        jwt_config: JwtConfig,
        mut settings: IdentitySettings,
    ) -> Self {
        settings.public_base_url = settings.public_base_url.trim_end_matches('/').to_string();
        Self {
            repos,
            mailer,
            jwt_config,
            settings,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.settings.bcrypt_cost)
            .map_err(|e| InfraError::Crypto(format!("Failed to hash password: {}", e)).into())
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register(&self, input: RegisterInput) -> DomainResult<RegistrationOutcome> {
        let missing = || DomainError::validation("Email, password, and name are required");
        let email = required("email", &input.email).map_err(|_| missing())?;
        let name = required("name", &input.name).map_err(|_| missing())?;
        if input.password.is_empty() {
            return Err(missing());
        }

        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "Password must be at least 6 characters",
            ));
        }
        if !is_basic_email(&email) {
            return Err(DomainError::validation("Invalid email format"));
        }

        let role = match input.role.as_deref() {
            None => UserRole::User,
            Some(raw) => match UserRole::parse(raw) {
                Some(role @ (UserRole::User | UserRole::Dj)) => role,
                Some(UserRole::Admin) => {
                    return Err(DomainError::validation("Role ADMIN cannot be self-assigned"))
                }
                None => return Err(DomainError::validation("Role must be USER or DJ")),
            },
        };

        let production = self.settings.mode == RegistrationMode::Production;
        let password_hash = self.hash(&input.password)?;

        let user = self
            .repos
            .users()
            .create(CreateUserDto {
                name,
                email,
                password_hash,
                role,
                email_verified_at: (!production).then(Utc::now),
            })
            .await?;

        metrics::counter!("registrations_total", "role" => user.role.as_str()).increment(1);
        info!(user_id = %user.id, role = %user.role, "New user registered");

        if !production {
            return Ok(RegistrationOutcome {
                user,
                token_issued: false,
                email_sent: false,
                message: MSG_DEV,
            });
        }

        let token = generate_verification_token();
        let expires_at = Utc::now() + chrono::Duration::hours(self.settings.token_ttl_hours);
        self.repos
            .verification_tokens()
            .create(&user.email, &hash_token(&token), expires_at)
            .await?;

        let email_sent = self.send_verification(&user.email, &token).await;

        Ok(RegistrationOutcome {
            user,
            token_issued: true,
            email_sent,
            message: if email_sent { MSG_SENT } else { MSG_NOT_SENT },
        })
    }

    /// Hand the verification mail to the transport. Never fails the caller.
    async fn send_verification(&self, email: &str, token: &str) -> bool {
        let mail = VerificationMail {
            to: email.to_string(),
            verify_url: format!(
                "{}/api/v1/auth/verify-email?token={}",
                self.settings.public_base_url, token
            ),
            expires_in_hours: self.settings.token_ttl_hours,
        };

        match tokio::time::timeout(self.settings.mail_timeout, self.mailer.send_verification(&mail))
            .await
        {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(to = %email, error = %e, "Verification email failed");
                false
            }
            Err(_) => {
                warn!(to = %email, "Verification email timed out");
                false
            }
        }
    }

    // ── Email verification ──────────────────────────────────────

    pub async fn verify_email(&self, token: &str) -> DomainResult<VerifiedEmail> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::validation("Verification token is required"));
        }

        let tokens = self.repos.verification_tokens();
        let record = tokens
            .find_by_hash(&hash_token(token))
            .await?
            .ok_or_else(|| DomainError::not_found("EmailVerificationToken", "token", "<redacted>"))?;

        let now = Utc::now();
        if record.is_expired(now) {
            tokens.delete(&record.id).await?;
            return Err(DomainError::Expired(
                "Verification link has expired. Please register again.".into(),
            ));
        }

        let user = self
            .repos
            .users()
            .find_by_email(&record.email)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "email", &record.email))?;

        self.repos.users().mark_email_verified(&user.id, now).await?;
        tokens.delete(&record.id).await?;

        info!(user_id = %user.id, "Email verified");

        Ok(VerifiedEmail {
            redirect_url: format!(
                "{}/auth/email-verified?email={}",
                self.settings.public_base_url,
                urlencoding::encode(&user.email)
            ),
            email: user.email,
        })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let invalid = || DomainError::Unauthorized("Invalid credentials".into());

        let user = self
            .repos
            .users()
            .find_by_email(email.trim())
            .await?
            .ok_or_else(invalid)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(invalid());
        };
        if !verify_password(password, hash).unwrap_or(false) {
            return Err(invalid());
        }

        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| InfraError::Crypto(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_secs(),
            user,
        })
    }

    /// Decode a bearer token into a principal.
    pub fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Invalid or expired token".into()))?;
        Ok(Principal {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }

    pub async fn me(&self, principal: &Principal) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(&principal.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", &principal.user_id))
    }

    // ── Admin operations ────────────────────────────────────────

    /// Set the role of the user registered under `email`.
    pub async fn set_role_by_email(&self, email: &str, role: &str) -> DomainResult<User> {
        let email = required("email", email)?;
        let role = UserRole::parse(role)
            .ok_or_else(|| DomainError::validation("Role must be USER, DJ or ADMIN"))?;

        let user = self
            .repos
            .users()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "email", &email))?;

        let updated = self.repos.users().set_role(&user.id, role).await?;
        info!(user_id = %updated.id, from = %user.role, to = %role, "User role changed");
        Ok(updated)
    }

    /// Delete accounts by email together with their profiles, tokens and
    /// bookings on both the requester and DJ side.
    pub async fn cleanup(&self, emails: &[String]) -> DomainResult<CleanupReport> {
        let emails: Vec<String> = emails
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if emails.is_empty() {
            return Err(DomainError::validation("At least one email is required"));
        }

        let deleted = self.repos.users().delete_by_emails(&emails).await?;
        warn!(
            bookings = deleted.bookings,
            dj_profiles = deleted.dj_profiles,
            users = deleted.users,
            "Admin cleanup removed accounts"
        );
        Ok(CleanupReport {
            bookings: deleted.bookings,
            dj_profiles: deleted.dj_profiles,
            users: deleted.users,
        })
    }

    /// Create or refresh the bootstrap administrator.
    pub async fn ensure_admin(&self, email: &str, name: &str, password: &str) -> DomainResult<User> {
        let hash = self.hash(password)?;
        let admin = self.repos.users().upsert_admin(email, name, &hash).await?;
        info!(user_id = %admin.id, email = %admin.email, "Bootstrap admin ensured");
        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support;
    use crate::infrastructure::mail::RecordingMailer;

    const COST: u32 = 4;

    async fn service(
        mode: RegistrationMode,
        mailer: Arc<RecordingMailer>,
    ) -> (IdentityService, Arc<dyn RepositoryProvider>) {
        let repos = test_support::repos().await;
        let svc = IdentityService::new(
            repos.clone(),
            mailer,
            JwtConfig::new("test-secret-0123456789", 1),
            IdentitySettings {
                mode,
                public_base_url: "https://mix.test/".into(),
                bcrypt_cost: COST,
                ..Default::default()
            },
        );
        (svc, repos)
    }

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            password: "secret1".into(),
            name: "Dana".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn development_registration_is_verified_without_mail() {
        let mailer = Arc::new(RecordingMailer::new());
        let (svc, _) = service(RegistrationMode::Development, mailer.clone()).await;

        let out = svc.register(input("dana@example.com")).await.unwrap();
        assert!(out.user.is_email_verified());
        assert!(!out.token_issued);
        assert!(!out.email_sent);
        assert_eq!(out.message, MSG_DEV);
        assert_eq!(out.user.role, UserRole::User);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (svc, _) = service(RegistrationMode::Development, Arc::new(RecordingMailer::new())).await;
        svc.register(input("dana@example.com")).await.unwrap();
        let err = svc.register(input("dana@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn registration_validates_input() {
        let (svc, _) = service(RegistrationMode::Development, Arc::new(RecordingMailer::new())).await;

        let mut blank = input("dana@example.com");
        blank.name = "  ".into();
        assert!(matches!(svc.register(blank).await, Err(DomainError::Validation(_))));

        let mut short = input("dana@example.com");
        short.password = "12345".into();
        assert!(matches!(svc.register(short).await, Err(DomainError::Validation(_))));

        assert!(matches!(
            svc.register(input("not-an-email")).await,
            Err(DomainError::Validation(_))
        ));

        let mut admin = input("dana@example.com");
        admin.role = Some("ADMIN".into());
        assert!(matches!(svc.register(admin).await, Err(DomainError::Validation(_))));

        let mut dj = input("dj@example.com");
        dj.role = Some("DJ".into());
        assert_eq!(svc.register(dj).await.unwrap().user.role, UserRole::Dj);
    }

    #[tokio::test]
    async fn production_registration_sends_link_and_verifies_once() {
        let mailer = Arc::new(RecordingMailer::new());
        let (svc, repos) = service(RegistrationMode::Production, mailer.clone()).await;

        let out = svc.register(input("dana@example.com")).await.unwrap();
        assert!(!out.user.is_email_verified());
        assert!(out.token_issued);
        assert!(out.email_sent);
        assert_eq!(out.message, MSG_SENT);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0]
            .verify_url
            .starts_with("https://mix.test/api/v1/auth/verify-email?token="));

        let token = mailer.last_token().unwrap();
        assert_eq!(token.len(), 64);

        let verified = svc.verify_email(&token).await.unwrap();
        assert_eq!(verified.email, "dana@example.com");
        assert_eq!(
            verified.redirect_url,
            "https://mix.test/auth/email-verified?email=dana%40example.com"
        );
        let user = repos.users().find_by_email("dana@example.com").await.unwrap().unwrap();
        assert!(user.is_email_verified());

        let again = svc.verify_email(&token).await.unwrap_err();
        assert!(again.is_not_found_for("EmailVerificationToken"));
    }

    #[tokio::test]
    async fn mail_failure_keeps_the_account() {
        let (svc, repos) = service(RegistrationMode::Production, Arc::new(RecordingMailer::failing())).await;

        let out = svc.register(input("dana@example.com")).await.unwrap();
        assert!(!out.email_sent);
        assert_eq!(out.message, MSG_NOT_SENT);
        assert!(repos.users().find_by_email("dana@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn expired_token_is_deleted_then_rejected() {
        let (svc, repos) = service(RegistrationMode::Production, Arc::new(RecordingMailer::new())).await;
        test_support::user(&repos, "late@example.com", UserRole::User).await;
        repos
            .verification_tokens()
            .create(
                "late@example.com",
                &hash_token("stale"),
                Utc::now() - chrono::Duration::minutes(1),
            )
            .await
            .unwrap();

        let err = svc.verify_email("stale").await.unwrap_err();
        assert!(matches!(err, DomainError::Expired(_)));
        assert!(repos
            .verification_tokens()
            .find_by_hash(&hash_token("stale"))
            .await
            .unwrap()
            .is_none());

        let again = svc.verify_email("stale").await.unwrap_err();
        assert!(again.is_not_found_for("EmailVerificationToken"));
        let user = repos.users().find_by_email("late@example.com").await.unwrap().unwrap();
        assert!(!user.is_email_verified());
    }

    #[tokio::test]
    async fn token_for_missing_user_is_not_found_and_kept() {
        let (svc, repos) = service(RegistrationMode::Production, Arc::new(RecordingMailer::new())).await;
        repos
            .verification_tokens()
            .create(
                "ghost@example.com",
                &hash_token("orphan"),
                Utc::now() + chrono::Duration::hours(1),
            )
            .await
            .unwrap();

        let err = svc.verify_email("orphan").await.unwrap_err();
        assert!(err.is_not_found_for("User"));
        assert!(repos
            .verification_tokens()
            .find_by_hash(&hash_token("orphan"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn blank_token_is_validation_error() {
        let (svc, _) = service(RegistrationMode::Production, Arc::new(RecordingMailer::new())).await;
        assert!(matches!(svc.verify_email(" ").await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn login_issues_token_with_role() {
        let (svc, _) = service(RegistrationMode::Development, Arc::new(RecordingMailer::new())).await;
        svc.register(input("dana@example.com")).await.unwrap();

        let auth = svc.login("dana@example.com", "secret1").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        let principal = svc.authenticate(&auth.token).unwrap();
        assert_eq!(principal.email, "dana@example.com");
        assert_eq!(principal.role, UserRole::User);

        assert!(matches!(
            svc.login("dana@example.com", "wrong-pass").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("nobody@example.com", "secret1").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(svc.authenticate("garbage"), Err(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn role_fix_and_cleanup() {
        let (svc, repos) = service(RegistrationMode::Development, Arc::new(RecordingMailer::new())).await;
        svc.register(input("dana@example.com")).await.unwrap();

        let user = svc.set_role_by_email("dana@example.com", "dj").await.unwrap();
        assert_eq!(user.role, UserRole::Dj);
        assert!(matches!(
            svc.set_role_by_email("dana@example.com", "superuser").await,
            Err(DomainError::Validation(_))
        ));
        assert!(svc
            .set_role_by_email("nobody@example.com", "DJ")
            .await
            .unwrap_err()
            .is_not_found_for("User"));

        let report = svc.cleanup(&["dana@example.com".into()]).await.unwrap();
        assert_eq!(
            report,
            CleanupReport {
                bookings: 0,
                dj_profiles: 0,
                users: 1,
            }
        );
        assert!(repos.users().find_by_email("dana@example.com").await.unwrap().is_none());
        assert!(matches!(svc.cleanup(&[]).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn ensure_admin_can_log_in() {
        let (svc, _) = service(RegistrationMode::Development, Arc::new(RecordingMailer::new())).await;
        let admin = svc.ensure_admin("root@example.com", "Root", "rootpass").await.unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        let auth = svc.login("root@example.com", "rootpass").await.unwrap();
        assert!(svc.authenticate(&auth.token).unwrap().is_admin());
    }
}
