//! Statistics service

use crate::{
    models::LibraryStats,
    services::{catalog::Catalog, users::Ledger},
};

impl Catalog {
    /// Entry counts from the catalog, borrowed count from the ledger's members.
    pub fn statistics(&self, ledger: &Ledger) -> LibraryStats {
        let stats = LibraryStats {
            total_resources: self.len(),
            available_resources: self.resources().filter(|r| r.availability_status()).count(),
            total_copies: self.resources().map(|r| i64::from(r.quantity())).sum(),
            borrowed_resources: ledger.total_borrowed(),
        };
        tracing::debug!("Statistics: {:?}", stats);
        stats
    }
}
