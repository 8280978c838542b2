//! Member (borrower) model

use indexmap::IndexSet;
use serde::Serialize;

use super::enums::MembershipTier;
use super::resource::ResourceId;

pub type UserId = i32;

/// A borrower. Holds only resource ids; the catalog keeps the resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    user_id: UserId,
    name: String,
    membership_tier: MembershipTier,
    borrowing_limit: i32,
    borrowed_resource_ids: IndexSet<ResourceId>,
}

impl Member {
    pub(crate) fn new(
        user_id: UserId,
        name: String,
        membership_tier: MembershipTier,
        borrowing_limit: i32,
    ) -> Self {
        Self {
            user_id,
            name,
            membership_tier,
            borrowing_limit,
            borrowed_resource_ids: IndexSet::new(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn membership_tier(&self) -> MembershipTier {
        self.membership_tier
    }

    /// Remaining number of resources this member may take out
    pub fn borrowing_limit(&self) -> i32 {
        self.borrowing_limit
    }

    /// Ids currently held, in the order they were borrowed
    pub fn borrowed_resource_ids(&self) -> Vec<ResourceId> {
        self.borrowed_resource_ids.iter().copied().collect()
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed_resource_ids.len()
    }

    pub fn has_borrowed(&self, id: ResourceId) -> bool {
        self.borrowed_resource_ids.contains(&id)
    }

    pub(crate) fn record_borrowed(&mut self, id: ResourceId) {
        if self.borrowed_resource_ids.insert(id) {
            self.borrowing_limit -= 1;
        }
    }

    pub(crate) fn record_returned(&mut self, id: ResourceId) {
        if self.borrowed_resource_ids.shift_remove(&id) {
            self.borrowing_limit += 1;
        }
    }
}
