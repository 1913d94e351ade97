//! Background services

mod token_sweeper;

pub use token_sweeper::{start_token_sweeper, sweep_expired_tokens};
