//! Build notifications rendered as chat cards and posted to an incoming webhook.

pub mod card;
pub mod chat;
pub mod config;
pub mod error;
pub mod legacy;
pub mod notify;
