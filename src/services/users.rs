//! Membership ledger: member creation and lookup

use indexmap::IndexMap;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{Member, MembershipTier, UserId},
};

/// Owns every member, in creation order. Members are never removed.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    members: IndexMap<UserId, Member>,
    limits: LendingConfig,
}

impl Ledger {
    pub fn new(limits: LendingConfig) -> Self {
        Self {
            members: IndexMap::new(),
            limits,
        }
    }

    /// Register a new member; the borrowing limit comes from the tier table.
    pub fn create_member(&mut self, name: impl Into<String>, tier: MembershipTier) -> &mut Member {
        let user_id = self.members.keys().max().map_or(1, |max| max + 1);
        let limit = self.limits.limit_for(tier);
        let member = Member::new(user_id, name.into(), tier, limit);
        tracing::info!(
            "Ledger: created {} member id={} {:?} (limit {})",
            tier,
            user_id,
            member.name(),
            limit
        );
        self.members.entry(user_id).or_insert(member)
    }

    pub fn member(&self, user_id: UserId) -> AppResult<&Member> {
        self.members
            .get(&user_id)
            .ok_or(AppError::MemberNotFound(user_id))
    }

    pub fn member_mut(&mut self, user_id: UserId) -> AppResult<&mut Member> {
        self.members
            .get_mut(&user_id)
            .ok_or(AppError::MemberNotFound(user_id))
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Resources currently out on loan across all members
    pub fn total_borrowed(&self) -> usize {
        self.members.values().map(Member::borrowed_count).sum()
    }
}
