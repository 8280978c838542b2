//! Library statistics

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    /// Number of catalog entries, available or not
    pub total_resources: usize,
    pub available_resources: usize,
    /// Copies currently on the shelves across all entries
    pub total_copies: i64,
    /// Sum of every member's borrowed-set size
    pub borrowed_resources: usize,
}
