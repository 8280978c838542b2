//! Business logic services

pub mod catalog;
pub mod loans;
pub mod stats;
pub mod users;

use crate::{
    config::LendingConfig,
    error::AppResult,
    models::{LibraryStats, Member, MembershipTier, ResourceDetails, ResourceId, UserId},
};

pub use catalog::Catalog;
pub use users::Ledger;

/// One catalog and the ledger lending from it.
///
/// Borrow and return touch both sides, so they go through here with a single
/// `&mut` borrow; callers needing shared access wrap the whole `Library` in one lock.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub catalog: Catalog,
    pub ledger: Ledger,
}

impl Library {
    pub fn new(lending: &LendingConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            ledger: Ledger::new(lending.clone()),
        }
    }

    pub fn create_member(&mut self, name: impl Into<String>, tier: MembershipTier) -> &Member {
        self.ledger.create_member(name, tier)
    }

    pub fn borrow(&mut self, user_id: UserId, ids: &[ResourceId]) -> AppResult<Vec<ResourceId>> {
        self.ledger
            .member_mut(user_id)?
            .borrow(&mut self.catalog, ids)
    }

    pub fn return_resources(
        &mut self,
        user_id: UserId,
        ids: &[ResourceId],
    ) -> AppResult<Vec<ResourceId>> {
        self.ledger
            .member_mut(user_id)?
            .return_resources(&mut self.catalog, ids)
    }

    pub fn borrowed_resource_details(&self, user_id: UserId) -> AppResult<Vec<ResourceDetails>> {
        Ok(self
            .ledger
            .member(user_id)?
            .borrowed_resource_details(&self.catalog))
    }

    pub fn statistics(&self) -> LibraryStats {
        self.catalog.statistics(&self.ledger)
    }
}
