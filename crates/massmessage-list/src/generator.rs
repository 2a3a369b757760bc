//! Delivery list orchestrator.
//!
//! Coordinates the whole run: build the opt-out list, enumerate and filter
//! every account, and assemble the MassMessage document.

use crate::api::{PageThrottle, QueryApi};
use crate::candidates::{collect_targets, EnumerationStats, UserFilter};
use crate::delivery::DeliveryList;
use crate::exclusion::{collect_exclusions, ExclusionStats};
use shared::Config;
use tracing::info;

/// Result of one generator run
#[derive(Debug, Clone)]
pub struct GeneratorReport {
    pub list: DeliveryList,
    pub excluded_users: usize,
    pub exclusion: ExclusionStats,
    pub enumeration: EnumerationStats,
}

/// Main generator coordinator
pub struct ListGenerator<A> {
    api: A,
    config: Config,
}

impl<A: QueryApi> ListGenerator<A> {
    /// Create a generator; `config` is fixed for the lifetime of the run
    pub fn new(api: A, config: Config) -> Self {
        Self { api, config }
    }

    /// Run both stages and return the assembled list
    ///
    /// Fetch failures end the affected stage early; they never fail the run.
    pub async fn run(&mut self) -> GeneratorReport {
        let delivery = &self.config.delivery;

        info!("Phase 1: Building opt-out list");
        let (exclusions, exclusion) = collect_exclusions(
            &mut self.api,
            &delivery.exclude_category,
            delivery.category_namespace,
        )
        .await;

        info!("Phase 2: Enumerating and filtering users");
        let filter = UserFilter::new(&delivery.bot_group, &exclusions);
        let throttle = PageThrottle::new(self.config.page_delay());
        let (targets, enumeration) = collect_targets(&mut self.api, &filter, throttle).await;

        GeneratorReport {
            list: DeliveryList::new(delivery.description.clone(), targets),
            excluded_users: exclusions.len(),
            exclusion,
            enumeration,
        }
    }

    pub fn into_api(self) -> A {
        self.api
    }
}
