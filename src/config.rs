use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt::Formatter;
use std::path::Path;
use std::str::FromStr;

pub const CHAT_WEBHOOK_ENV: &str = "CHAT_WEBHOOK";

const BITMOJI_SHOUT: &str = "https://sdk.bitmoji.com/render/panel/44f0e4d9-7f1b-4130-951a-3e49c549add4-4833b118-6c9e-41a4-9557-987f80d99f00-v1.png?transparent=1&palette=1";
const BITMOJI_YES: &str = "https://sdk.bitmoji.com/render/panel/987cfa1b-cbd3-49c6-b4de-5d62bdd31bf8-4833b118-6c9e-41a4-9557-987f80d99f00-v1.png?transparent=1&palette=1";
const BITMOJI_WARNING: &str = "https://sdk.bitmoji.com/render/panel/c96df4f1-0e63-4dd3-816a-f3d4d431c4d4-4833b118-6c9e-41a4-9557-987f80d99f00-v1.png?transparent=1&palette=1";
const BITMOJI_ERROR: &str = "https://sdk.bitmoji.com/render/panel/4a737c47-e262-44e8-b96e-66d11bb30cab-4833b118-6c9e-41a4-9557-987f80d99f00-v1.png?transparent=1&palette=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Yes,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Yes => "yes",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Severity::Yes),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(ConfigError::UnknownSeverity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header image shown for each severity. Keys missing from an images file keep
/// their built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityImages {
    pub yes: String,
    pub info: String,
    pub warning: String,
    pub error: String,
}

impl Default for SeverityImages {
    fn default() -> Self {
        Self {
            yes: BITMOJI_YES.to_string(),
            info: BITMOJI_SHOUT.to_string(),
            warning: BITMOJI_WARNING.to_string(),
            error: BITMOJI_ERROR.to_string(),
        }
    }
}

impl SeverityImages {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json5::from_str::<SeverityImages>(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ImagesFile {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&contents)
    }

    pub fn image_for(&self, severity: Severity) -> &str {
        match severity {
            Severity::Yes => &self.yes,
            Severity::Info => &self.info,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub webhook: String,
    pub images: SeverityImages,
}

pub fn get_config(webhook: Option<String>, images_path: Option<&Path>) -> Result<Config, ConfigError> {
    let webhook = resolve_webhook(webhook, std::env::var(CHAT_WEBHOOK_ENV).ok())?;

    let images = match images_path {
        Some(path) => SeverityImages::load(path)?,
        None => SeverityImages::default(),
    };

    Ok(Config { webhook, images })
}

/// The flag wins over the environment; empty values count as unset.
fn resolve_webhook(flag: Option<String>, env: Option<String>) -> Result<String, ConfigError> {
    flag.filter(|w| !w.is_empty())
        .or_else(|| {
            tracing::debug!("No webhook provided, looking up env {}", CHAT_WEBHOOK_ENV);
            env.filter(|w| !w.is_empty())
        })
        .ok_or(ConfigError::MissingWebhook(CHAT_WEBHOOK_ENV))
}
