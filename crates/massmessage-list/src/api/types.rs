//! MediaWiki Action API request and response types.
//!
//! These types cover the two `list=` modules the generator walks:
//! `categorymembers` and `allusers`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Query string for one `action=query` request
///
/// Kept sorted so logged requests and recorded test requests are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Base parameters for a `list=<module>` query
    pub fn list(module: &str) -> Self {
        Self::default()
            .with("action", "query")
            .with("format", "json")
            .with("list", module)
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge a `continue` object into these parameters
    ///
    /// Strings are copied verbatim, other scalars by their JSON text and
    /// nulls are dropped. Existing keys are overwritten.
    pub fn merge_continuation(&mut self, continuation: &Map<String, Value>) {
        for (key, value) in continuation {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.0.insert(key.clone(), value);
        }
    }
}

/// Envelope shared by every `action=query` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse<T> {
    /// Continuation parameters, present while more pages remain
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continuation: Option<Map<String, Value>>,

    /// Module results; absent when a listing is empty on some wikis
    #[serde(default)]
    pub query: Option<T>,

    /// Non-fatal warnings reported by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Value>,
}

/// Error envelope returned with HTTP 200 when a request is rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// `query` payload of `list=categorymembers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryMembersPage {
    #[serde(default)]
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMember {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub ns: Option<i32>,
    /// Namespaced title, e.g. `User:Alice`
    pub title: String,
}

impl CategoryMember {
    /// Title with the namespace prefix removed
    ///
    /// Everything after the first `:`; titles without one are returned whole.
    pub fn bare_title(&self) -> &str {
        match self.title.split_once(':') {
            Some((_, rest)) => rest,
            None => &self.title,
        }
    }
}

/// `query` payload of `list=allusers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllUsersPage {
    #[serde(default)]
    pub allusers: Vec<AllUser>,
}

/// One account from `list=allusers` with `auprop=blockinfo|groups`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllUser {
    #[serde(default)]
    pub userid: Option<u64>,
    pub name: String,
    /// `Some` whenever the key is present, even with a null value
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub blockid: Option<Value>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Map a present field to `Some`, including an explicit `null`
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl AllUser {
    pub fn is_blocked(&self) -> bool {
        self.blockid.is_some()
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}
