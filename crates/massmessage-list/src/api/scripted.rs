//! Scripted API responder for tests.

use super::client::{decode_body, FetchError, QueryApi};
use super::types::QueryParams;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// Replays canned response bodies per `list=` module and records every request
#[derive(Debug, Default, Clone)]
pub struct ScriptedApi {
    pages: HashMap<String, VecDeque<Option<Value>>>,
    pub requests: Vec<QueryParams>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body for `module`
    pub fn page(mut self, module: &str, body: Value) -> Self {
        self.pages
            .entry(module.to_string())
            .or_default()
            .push_back(Some(body));
        self
    }

    /// Queue a failed request for `module`
    pub fn failure(mut self, module: &str) -> Self {
        self.pages.entry(module.to_string()).or_default().push_back(None);
        self
    }

    /// Requests issued for `module`, in order
    pub fn requests_for(&self, module: &str) -> Vec<&QueryParams> {
        self.requests
            .iter()
            .filter(|params| params.get("list") == Some(module))
            .collect()
    }
}

impl QueryApi for ScriptedApi {
    async fn query<T: DeserializeOwned>(&mut self, params: &QueryParams) -> Result<T, FetchError> {
        self.requests.push(params.clone());

        let module = params.get("list").unwrap_or_default();
        match self.pages.get_mut(module).and_then(VecDeque::pop_front) {
            Some(Some(body)) => decode_body(body),
            _ => Err(FetchError::Api {
                code: "scripted".to_string(),
                info: format!("no response queued for list={module}"),
            }),
        }
    }
}
