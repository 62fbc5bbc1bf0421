pub mod catalog_service;
pub mod discovery_service;
pub mod member_service;
pub mod school_service;

use std::sync::Arc;

use crate::config::DiscoveryConfig;
use crate::repository::*;

pub use catalog_service::{CatalogService, ProductQuery};
pub use discovery_service::DiscoveryService;
pub use member_service::MemberService;
pub use school_service::{RankedSchool, SchoolQuery, SchoolService};

pub struct ServiceContext {
    pub event_repo: Arc<dyn EventRepository>,
    pub school_repo: Arc<dyn SchoolRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub member_repo: Arc<dyn MemberRepository>,
    pub discovery_service: Arc<DiscoveryService>,
    pub school_service: Arc<SchoolService>,
    pub catalog_service: Arc<CatalogService>,
    pub member_service: Arc<MemberService>,
}

impl ServiceContext {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        school_repo: Arc<dyn SchoolRepository>,
        product_repo: Arc<dyn ProductRepository>,
        member_repo: Arc<dyn MemberRepository>,
        discovery: DiscoveryConfig,
    ) -> Self {
        let discovery_service = Arc::new(DiscoveryService::new(
            event_repo.clone(),
            discovery.missing_coords,
        ));
        let school_service = Arc::new(SchoolService::new(
            school_repo.clone(),
            discovery.missing_coords,
        ));
        let catalog_service = Arc::new(CatalogService::new(product_repo.clone()));
        let member_service = Arc::new(MemberService::new(member_repo.clone(), event_repo.clone()));

        Self {
            event_repo,
            school_repo,
            product_repo,
            member_repo,
            discovery_service,
            school_service,
            catalog_service,
            member_service,
        }
    }
}
