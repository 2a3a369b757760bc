//! Continuation-driven pagination over `action=query` listings.

use super::client::QueryApi;
use super::throttle::PageThrottle;
use super::types::{QueryParams, QueryResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Walks a listing page by page, following `continue`
///
/// A failed request ends the walk; pages already returned stay valid.
pub struct Paginator<'a, A> {
    api: &'a mut A,
    params: QueryParams,
    throttle: Option<PageThrottle>,
    pages: usize,
    failed: bool,
    done: bool,
}

impl<'a, A: QueryApi> Paginator<'a, A> {
    pub fn new(api: &'a mut A, params: QueryParams) -> Self {
        Self {
            api,
            params,
            throttle: None,
            pages: 0,
            failed: false,
            done: false,
        }
    }

    /// Space consecutive requests through `throttle`
    pub fn with_throttle(mut self, throttle: PageThrottle) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Fetch the next page, or `None` once the listing is exhausted or failed
    pub async fn next_page<T>(&mut self) -> Option<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.done {
            return None;
        }

        if let Some(throttle) = self.throttle.as_mut() {
            throttle.acquire().await;
        }

        let list = self.params.get("list").unwrap_or_default().to_string();

        let response = match self.api.query::<QueryResponse<T>>(&self.params).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    list = %list,
                    page = self.pages + 1,
                    error = %e,
                    "API request failed, ending pagination"
                );
                self.failed = true;
                self.done = true;
                return None;
            }
        };

        self.pages += 1;

        if let Some(warnings) = &response.warnings {
            warn!(list = %list, warnings = %warnings, "API returned warnings");
        }

        match &response.continuation {
            Some(continuation) => {
                debug!(list = %list, page = self.pages, "Following continuation");
                self.params.merge_continuation(continuation);
            }
            None => self.done = true,
        }

        Some(response.query.unwrap_or_default())
    }

    /// Pages successfully fetched so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Whether the walk ended on a failed request
    pub fn failed(&self) -> bool {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scripted::ScriptedApi;
    use crate::api::types::CategoryMembersPage;
    use serde_json::json;
    use std::time::Duration;

    fn members_page(titles: &[&str], cont: Option<&str>) -> serde_json::Value {
        let members: Vec<_> = titles.iter().map(|t| json!({ "ns": 2, "title": t })).collect();
        let mut body = json!({ "query": { "categorymembers": members } });
        if let Some(token) = cont {
            body["continue"] = json!({ "cmcontinue": token, "continue": "-||" });
        }
        body
    }

    #[tokio::test]
    async fn test_single_page_issues_one_request() {
        let mut api = ScriptedApi::new().page("categorymembers", members_page(&["User:A"], None));

        let mut pager = Paginator::new(&mut api, QueryParams::list("categorymembers"));
        let first: Option<CategoryMembersPage> = pager.next_page().await;
        let second: Option<CategoryMembersPage> = pager.next_page().await;

        assert_eq!(first.unwrap().categorymembers.len(), 1);
        assert!(second.is_none());
        assert_eq!(pager.pages(), 1);
        assert!(!pager.failed());
        assert_eq!(api.requests.len(), 1);
    }

    #[tokio::test]
    async fn test_continuation_merged_into_next_request() {
        let mut api = ScriptedApi::new()
            .page("categorymembers", members_page(&["User:A"], Some("page|B")))
            .page("categorymembers", members_page(&["User:B"], Some("page|C")))
            .page("categorymembers", members_page(&["User:C"], None));

        let mut pager = Paginator::new(&mut api, QueryParams::list("categorymembers"))
            .with_throttle(PageThrottle::new(Duration::ZERO));
        let mut seen = Vec::new();
        while let Some(page) = pager.next_page::<CategoryMembersPage>().await {
            seen.extend(page.categorymembers.into_iter().map(|m| m.title));
        }

        assert_eq!(seen, vec!["User:A", "User:B", "User:C"]);
        assert_eq!(pager.pages(), 3);

        let requests = api.requests_for("categorymembers");
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].get("cmcontinue"), None);
        assert_eq!(requests[1].get("cmcontinue"), Some("page|B"));
        assert_eq!(requests[1].get("continue"), Some("-||"));
        assert_eq!(requests[2].get("cmcontinue"), Some("page|C"));
    }

    #[tokio::test]
    async fn test_failure_stops_and_keeps_earlier_pages() {
        let mut api = ScriptedApi::new()
            .page("categorymembers", members_page(&["User:A"], Some("page|B")))
            .failure("categorymembers")
            .page("categorymembers", members_page(&["User:Never"], None));

        let mut pager = Paginator::new(&mut api, QueryParams::list("categorymembers"));
        let mut seen = Vec::new();
        while let Some(page) = pager.next_page::<CategoryMembersPage>().await {
            seen.extend(page.categorymembers.into_iter().map(|m| m.title));
        }

        assert_eq!(seen, vec!["User:A"]);
        assert!(pager.failed());
        assert_eq!(pager.pages(), 1);
        assert_eq!(api.requests.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_query_yields_empty_page() {
        let mut api = ScriptedApi::new().page("categorymembers", json!({ "batchcomplete": "" }));

        let mut pager = Paginator::new(&mut api, QueryParams::list("categorymembers"));
        let page: CategoryMembersPage = pager.next_page().await.unwrap();

        assert!(page.categorymembers.is_empty());
    }
}
