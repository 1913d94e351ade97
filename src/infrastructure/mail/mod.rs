//! Outbound email

pub mod memory;
pub mod smtp;

pub use memory::RecordingMailer;
pub use smtp::SmtpMailer;
