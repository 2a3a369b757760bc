//! Account enumeration and delivery filtering.
//!
//! Walks `list=allusers` and keeps every account that is not blocked, not a
//! bot and not on the opt-out list, in the order the wiki returns them.

use crate::api::{AllUser, AllUsersPage, PageThrottle, Paginator, QueryApi, QueryParams};
use crate::delivery::DeliveryTarget;
use crate::exclusion::ExclusionList;
use tracing::{debug, info};

/// Why an account does or does not receive a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Deliver,
    Blocked,
    Bot,
    OptedOut,
}

/// Per-account filter, checked in a fixed order
pub struct UserFilter<'a> {
    bot_group: &'a str,
    exclusions: &'a ExclusionList,
}

impl<'a> UserFilter<'a> {
    pub fn new(bot_group: &'a str, exclusions: &'a ExclusionList) -> Self {
        Self {
            bot_group,
            exclusions,
        }
    }

    /// First matching rejection wins: block, then bot group, then opt-out
    pub fn classify(&self, user: &AllUser) -> Verdict {
        if user.is_blocked() {
            Verdict::Blocked
        } else if user.in_group(self.bot_group) {
            // auexcludegroup should already drop these
            Verdict::Bot
        } else if self.exclusions.contains(&user.name) {
            Verdict::OptedOut
        } else {
            Verdict::Deliver
        }
    }
}

/// Counters for one enumeration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Every account record seen
    pub total_accounts: usize,
    /// Accounts that produced a delivery target
    pub delivered: usize,
    pub blocked: usize,
    pub bots: usize,
    pub opted_out: usize,
    pub pages: usize,
    /// False when a failed request cut the walk short
    pub complete: bool,
}

impl EnumerationStats {
    fn record(&mut self, verdict: Verdict) {
        self.total_accounts += 1;
        match verdict {
            Verdict::Deliver => self.delivered += 1,
            Verdict::Blocked => self.blocked += 1,
            Verdict::Bot => self.bots += 1,
            Verdict::OptedOut => self.opted_out += 1,
        }
    }
}

/// Request parameters for all accounts outside `bot_group`
pub fn all_users_params(bot_group: &str) -> QueryParams {
    QueryParams::list("allusers")
        .with("auexcludegroup", bot_group)
        .with("auprop", "blockinfo|groups")
        .with("aulimit", "max")
}

/// Enumerate every account and build the delivery targets
///
/// Targets keep encounter order: page order, then order within the page.
/// A failed page ends the walk; targets gathered before it are kept.
pub async fn collect_targets<A: QueryApi>(
    api: &mut A,
    filter: &UserFilter<'_>,
    throttle: PageThrottle,
) -> (Vec<DeliveryTarget>, EnumerationStats) {
    info!(
        exclude_group = %filter.bot_group,
        page_delay_ms = throttle.min_interval().as_millis(),
        "Enumerating all users"
    );

    let mut targets = Vec::new();
    let mut stats = EnumerationStats::default();
    let mut pager =
        Paginator::new(api, all_users_params(filter.bot_group)).with_throttle(throttle);

    while let Some(page) = pager.next_page::<AllUsersPage>().await {
        for user in &page.allusers {
            let verdict = filter.classify(user);
            stats.record(verdict);

            if verdict == Verdict::Deliver {
                targets.push(DeliveryTarget::user_talk(&user.name));
            } else {
                debug!(user = %user.name, verdict = ?verdict, "Skipping user");
            }
        }

        info!(
            page = pager.pages(),
            seen = stats.total_accounts,
            delivered = stats.delivered,
            "User page processed"
        );
    }

    stats.pages = pager.pages();
    stats.complete = !pager.failed();

    info!(
        total_accounts = stats.total_accounts,
        delivered = stats.delivered,
        blocked = stats.blocked,
        bots = stats.bots,
        opted_out = stats.opted_out,
        complete = stats.complete,
        "User enumeration complete"
    );

    (targets, stats)
}
