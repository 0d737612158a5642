//! Command handlers

pub mod config;
pub mod quote;
pub mod transfer;

use quotebox_core::QuoteError;

/// Turn a widget error into the notification the user sees, keeping the detail as its cause
pub fn user_error(error: QuoteError) -> anyhow::Error {
    let message = error.user_message();
    anyhow::Error::new(error).context(message)
}
