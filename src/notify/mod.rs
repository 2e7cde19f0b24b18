//! Outbound notifications
//!
//! Two logical destinations are used: the primary recipient gets the signal
//! report, the log destination gets feed errors and diagnostics.

pub mod telegram;

use async_trait::async_trait;
use std::fmt;

use crate::errors::NotifyResult;

pub use telegram::TelegramNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Primary,
    Log,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Primary => write!(f, "primary"),
            Destination::Log => write!(f, "log"),
        }
    }
}

/// Delivers markdown text to a destination
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, destination: Destination, text: &str) -> NotifyResult<()>;
}

/// Prints messages to stdout instead of sending them
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, destination: Destination, text: &str) -> NotifyResult<()> {
        println!("--- {} ---\n{}", destination, text);
        Ok(())
    }
}
