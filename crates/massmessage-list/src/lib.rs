//! MassMessage delivery list generator.
//!
//! This library enumerates a MediaWiki wiki's registered users through the
//! Action API, drops blocked accounts, bots and users who opted out via a
//! category, and produces a spamlist document for the MassMessage extension.

pub mod api;
pub mod candidates;
pub mod delivery;
pub mod exclusion;
pub mod generator;

pub use api::{FetchError, QueryApi, WikiClient};
pub use candidates::{EnumerationStats, UserFilter, Verdict};
pub use delivery::{DeliveryList, DeliveryTarget};
pub use exclusion::{ExclusionList, ExclusionStats};
pub use generator::{GeneratorReport, ListGenerator};
