//! Identity module — accounts, authentication and access policy
//!
//! Contains the `IdentityService` which orchestrates registration, email
//! verification, login and the admin account operations, plus the
//! `authorize` policy every protected use-case goes through.

pub mod access;
pub mod service;

pub use access::{authorize, Action, Principal};
pub use service::{
    AuthResult, CleanupReport, IdentityService, IdentitySettings, RegisterInput,
    RegistrationOutcome, VerifiedEmail,
};
