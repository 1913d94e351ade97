//! Application ports (hexagonal architecture boundaries)
//!
//! Persistence contracts live with their aggregates in `domain`.
//! Outbound ports to other side-effecting services live here.

pub mod outbound;

pub use outbound::{Mailer, VerificationMail};
