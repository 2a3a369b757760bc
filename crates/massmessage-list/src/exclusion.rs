//! Opt-out list built from category membership.
//!
//! Users who tag their user page with the opt-out category are collected
//! here before enumeration starts and never receive a delivery target.

use crate::api::{CategoryMembersPage, Paginator, QueryApi, QueryParams};
use std::collections::HashSet;
use tracing::{debug, info};

/// Usernames excluded from delivery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    users: HashSet<String>,
}

impl ExclusionList {
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains(name)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of walking the opt-out category
#[derive(Debug, Clone, Default)]
pub struct ExclusionStats {
    pub pages: usize,
    /// False when a failed request cut the walk short
    pub complete: bool,
}

/// Request parameters for the members of `category` in `namespace`
pub fn category_members_params(category: &str, namespace: u32) -> QueryParams {
    QueryParams::list("categorymembers")
        .with("cmtitle", category)
        .with("cmnamespace", namespace)
        .with("cmlimit", "max")
}

/// Collect the bare usernames of every member of `category`
///
/// A failed page ends the walk; members gathered before it are kept.
pub async fn collect_exclusions<A: QueryApi>(
    api: &mut A,
    category: &str,
    namespace: u32,
) -> (ExclusionList, ExclusionStats) {
    info!(category = %category, namespace = namespace, "Fetching opt-out category members");

    let mut users = HashSet::new();
    let mut pager = Paginator::new(api, category_members_params(category, namespace));

    while let Some(page) = pager.next_page::<CategoryMembersPage>().await {
        debug!(members = page.categorymembers.len(), "Category page received");
        users.extend(
            page.categorymembers
                .iter()
                .map(|member| member.bare_title().to_string()),
        );
    }

    let stats = ExclusionStats {
        pages: pager.pages(),
        complete: !pager.failed(),
    };
    let list = ExclusionList { users };

    info!(
        excluded = list.len(),
        pages = stats.pages,
        complete = stats.complete,
        "Opt-out list complete"
    );

    (list, stats)
}
