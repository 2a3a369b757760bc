//! MassMessage delivery list document.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Namespace prefix of user talk pages
pub const USER_TALK_PREFIX: &str = "User talk:";

/// One page MassMessage will post to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTarget {
    pub title: String,
}

impl DeliveryTarget {
    /// Target the talk page of `username`
    pub fn user_talk(username: &str) -> Self {
        Self {
            title: format!("{USER_TALK_PREFIX}{username}"),
        }
    }
}

/// Spamlist content accepted by MassMessage's JSON content model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryList {
    pub description: String,
    pub targets: Vec<DeliveryTarget>,
}

impl DeliveryList {
    pub fn new(description: impl Into<String>, targets: Vec<DeliveryTarget>) -> Self {
        Self {
            description: description.into(),
            targets,
        }
    }

    /// Render as UTF-8 JSON with four-space indentation
    ///
    /// Non-ASCII text is written as-is, not `\u` escaped.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize delivery list")?;
        Ok(buf)
    }

    /// Write the list to `path`, replacing any existing file
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_json()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write delivery list: {}", path.display()))?;

        info!(
            path = %path.display(),
            targets = self.targets.len(),
            "Delivery list written"
        );

        Ok(())
    }
}
