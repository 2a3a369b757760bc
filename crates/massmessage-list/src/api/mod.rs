//! MediaWiki Action API access.
//!
//! A thin client for `api.php`, the `continue`-following paginator built on
//! it, and the response types for the listings the generator walks.

pub mod client;
pub mod paginate;
pub mod throttle;
pub mod types;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::{FetchError, QueryApi, WikiClient};
pub use paginate::Paginator;
pub use throttle::PageThrottle;
pub use types::*;
