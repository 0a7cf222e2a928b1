use crate::card::{self, Message};
use crate::error::NotifyError;
use reqwest::header::CONTENT_TYPE;

pub fn send_message(webhook_url: &str, message: &Message) -> Result<(), NotifyError> {
    let body = card::encode(message)?;

    if tracing::enabled!(tracing::Level::DEBUG) {
        let pretty = card::encode_pretty(message)?;
        tracing::debug!(
            "Sending message with body {}",
            String::from_utf8_lossy(&pretty)
        );
    }

    call_webhook(webhook_url, body)
}

fn call_webhook(webhook_url: &str, body: Vec<u8>) -> Result<(), NotifyError> {
    let client = reqwest::blocking::Client::new();

    client
        .post(webhook_url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()?
        .error_for_status()?;

    Ok(())
}
