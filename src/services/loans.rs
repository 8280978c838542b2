//! Loan management: members borrowing from and returning to the catalog

use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{Member, ResourceDetails, ResourceId, ResourceQuery},
    services::catalog::Catalog,
};

impl Member {
    /// Borrow the requested resources from `catalog`.
    ///
    /// Requests are validated against this member first, then handed to the
    /// catalog. Only what the catalog actually lends is recorded, so the limit
    /// drops by the number of ids returned, which may be fewer than requested.
    pub fn borrow(
        &mut self,
        catalog: &mut Catalog,
        requested: &[ResourceId],
    ) -> AppResult<Vec<ResourceId>> {
        if requested.is_empty() {
            return Err(AppError::EmptyRequest);
        }
        ensure_distinct(requested)?;
        if let Some(&id) = requested.iter().find(|&&id| self.has_borrowed(id)) {
            return Err(AppError::AlreadyBorrowed(id));
        }

        let borrowed = catalog.checkout(requested, self)?;
        for &id in &borrowed {
            self.record_borrowed(id);
        }
        tracing::info!(
            "Member {} borrowed {:?}, limit now {}",
            self.user_id(),
            borrowed,
            self.borrowing_limit()
        );
        Ok(borrowed)
    }

    /// Return previously borrowed resources to `catalog`.
    pub fn return_resources(
        &mut self,
        catalog: &mut Catalog,
        ids: &[ResourceId],
    ) -> AppResult<Vec<ResourceId>> {
        if ids.is_empty() {
            return Err(AppError::EmptyRequest);
        }
        if ids.len() > self.borrowed_count() {
            return Err(AppError::OverReturn {
                returning: ids.len(),
                borrowed: self.borrowed_count(),
            });
        }
        ensure_distinct(ids)?;
        if let Some(&id) = ids.iter().find(|&&id| !self.has_borrowed(id)) {
            return Err(AppError::NotBorrowed(id));
        }

        let returned = catalog.checkin(ids)?;
        for &id in &returned {
            self.record_returned(id);
        }
        tracing::info!(
            "Member {} returned {:?}, limit now {}",
            self.user_id(),
            returned,
            self.borrowing_limit()
        );
        Ok(returned)
    }

    /// Descriptive fields of every held resource, in borrow order
    pub fn borrowed_resource_details(&self, catalog: &Catalog) -> Vec<ResourceDetails> {
        self.borrowed_resource_ids()
            .into_iter()
            .map(ResourceQuery::by_id)
            .filter_map(|query| {
                catalog
                    .find_resources(&query)
                    .next()
                    .map(|r| r.details().clone())
            })
            .collect()
    }
}

fn ensure_distinct(ids: &[ResourceId]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    match ids.iter().find(|&&id| !seen.insert(id)) {
        Some(&id) => Err(AppError::DuplicateRequest(id)),
        None => Ok(()),
    }
}
