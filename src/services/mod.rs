//! Business logic services

pub mod catalog;
pub mod loans;
pub mod renewal;
pub mod users;

use crate::{
    config::{AuthConfig, CatalogConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        catalog_config: CatalogConfig,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), catalog_config.page_size),
            loans: loans::LoansService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
        }
    }
}
