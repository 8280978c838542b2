//! Catalog management service

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{Member, Resource, ResourceId, ResourceKind, ResourceQuery},
};

/// Owns every resource, keyed by id and kept in insertion order.
/// Entries are never removed; a resource with no copies left is merely unavailable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resources: IndexMap<ResourceId, Resource>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// All resources in catalog order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.values()
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    fn next_id(&self) -> ResourceId {
        self.resources.keys().max().map_or(1, |max| max + 1)
    }

    /// Add `count` copies of a resource.
    ///
    /// If an entry with the same identity exists its quantity grows and its id is
    /// returned; otherwise the resource gets a fresh id and is appended.
    pub fn add_resource(&mut self, mut resource: Resource, count: i32) -> AppResult<ResourceId> {
        if count <= 0 {
            return Err(AppError::InvalidQuantity(count));
        }

        if let Some((&id, existing)) = self
            .resources
            .iter_mut()
            .find(|(_, existing)| existing.same_identity(&resource))
        {
            let quantity = existing
                .quantity()
                .checked_add(count)
                .ok_or(AppError::QuantityOverflow {
                    id,
                    held: existing.quantity(),
                    added: count,
                })?;
            existing.set_quantity(quantity);
            tracing::info!(
                "Catalog add: merged {} {} cop(ies) into id={} (now {})",
                count,
                existing.kind(),
                id,
                existing.quantity()
            );
            return Ok(id);
        }

        let id = self.next_id();
        resource.assign_id(id);
        resource.set_quantity(count);
        tracing::info!(
            "Catalog add: created {} id={} {:?} with {} cop(ies)",
            resource.kind(),
            id,
            resource.title(),
            count
        );
        self.resources.insert(id, resource);
        Ok(id)
    }

    /// Resources matching any field of `query`, in catalog order
    pub fn find_resources<'a>(
        &'a self,
        query: &'a ResourceQuery,
    ) -> impl Iterator<Item = &'a Resource> + 'a {
        tracing::debug!("Catalog find: {}", query);
        self.resources.values().filter(move |r| query.matches(r))
    }

    /// Take `count` copies away from every resource matching `query`.
    ///
    /// All matches are checked before anything changes, so a failing call leaves
    /// the catalog as it was. Returns the ids of the affected entries.
    pub fn remove_resources(
        &mut self,
        count: i32,
        query: &ResourceQuery,
    ) -> AppResult<Vec<ResourceId>> {
        if count <= 0 {
            return Err(AppError::InvalidQuantity(count));
        }

        let matched: Vec<ResourceId> = self
            .resources
            .iter()
            .filter(|(_, r)| query.matches(r))
            .map(|(&id, _)| id)
            .collect();
        if matched.is_empty() {
            return Err(AppError::NotFound(query.to_string()));
        }

        for id in &matched {
            let held = self.resources[id].quantity();
            if count > held {
                return Err(AppError::InsufficientQuantity {
                    id: *id,
                    requested: count,
                    held,
                });
            }
        }

        for id in &matched {
            let resource = &mut self.resources[id];
            resource.set_quantity(resource.quantity() - count);
            tracing::info!(
                "Catalog remove: {} cop(ies) of id={} (now {})",
                count,
                id,
                resource.quantity()
            );
        }
        Ok(matched)
    }

    /// Lend one copy of each requested resource to `member`.
    ///
    /// Unknown ids and ids with no copies left are skipped; the call only fails if
    /// none of the requested ids exist. Returns the ids actually lent, in request order.
    pub fn checkout(
        &mut self,
        requested: &[ResourceId],
        member: &Member,
    ) -> AppResult<Vec<ResourceId>> {
        let limit = member.borrowing_limit();
        if limit < 1 {
            return Err(AppError::BorrowingLimitExhausted(member.user_id()));
        }
        if (limit as usize) < requested.len() {
            return Err(AppError::TooManyRequested {
                requested: requested.len(),
                limit,
            });
        }

        let mut any_found = false;
        let mut borrowed = Vec::with_capacity(requested.len());
        for &id in requested {
            match self.resources.get_mut(&id) {
                None => {
                    tracing::warn!("Catalog checkout: id={} not in catalog, skipped", id);
                }
                Some(resource) if resource.quantity() == 0 => {
                    any_found = true;
                    tracing::warn!(
                        "Catalog checkout: id={} {:?} unavailable, skipped",
                        id,
                        resource.title()
                    );
                }
                Some(resource) => {
                    any_found = true;
                    resource.set_quantity(resource.quantity() - 1);
                    borrowed.push(id);
                }
            }
        }

        if !any_found {
            return Err(AppError::NothingFound(requested.to_vec()));
        }
        tracing::info!(
            "Catalog checkout: member {} took {:?} of {:?}",
            member.user_id(),
            borrowed,
            requested
        );
        Ok(borrowed)
    }

    /// Put one copy of each id back on the shelves.
    ///
    /// No ownership check happens here; that is the ledger's job. Unknown ids are
    /// skipped and the call fails only if none were found. New quantities are
    /// computed for every id before any is written back.
    pub fn checkin(&mut self, ids: &[ResourceId]) -> AppResult<Vec<ResourceId>> {
        let mut returned = Vec::with_capacity(ids.len());
        let mut updated: IndexMap<ResourceId, i32> = IndexMap::new();
        for &id in ids {
            let Some(resource) = self.resources.get(&id) else {
                tracing::warn!("Catalog checkin: id={} not in catalog, skipped", id);
                continue;
            };
            let held = updated.get(&id).copied().unwrap_or(resource.quantity());
            let quantity = held
                .checked_add(1)
                .ok_or(AppError::QuantityOverflow { id, held, added: 1 })?;
            updated.insert(id, quantity);
            returned.push(id);
        }

        if returned.is_empty() {
            return Err(AppError::NothingFound(ids.to_vec()));
        }
        for (id, quantity) in updated {
            self.resources[&id].set_quantity(quantity);
        }
        tracing::info!("Catalog checkin: {:?}", returned);
        Ok(returned)
    }

    pub fn resources_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.values().filter(move |r| r.kind() == kind)
    }

    /// Resources of one kind with at least one copy on the shelves
    pub fn available_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> + '_ {
        self.resources_of_kind(kind)
            .filter(|r| r.availability_status())
    }

    /// Add resources from a JSON array of records (a single object is accepted too).
    ///
    /// Each record carries its `kind`, descriptive fields and an optional `quantity`
    /// (default 1). Records are added to a staged copy that replaces the catalog only
    /// once every record went in, so a failing import changes nothing.
    pub fn import_json(&mut self, value: serde_json::Value) -> AppResult<Vec<ResourceId>> {
        let records = match value {
            serde_json::Value::Array(records) => records,
            other => vec![other],
        };

        let mut parsed = Vec::with_capacity(records.len());
        for record in records {
            let quantity = match record.get("quantity") {
                Some(q) => serde_json::from_value::<i32>(q.clone())?,
                None => 1,
            };
            if quantity <= 0 {
                return Err(AppError::InvalidQuantity(quantity));
            }
            parsed.push((Resource::from_value(record)?, quantity));
        }

        let mut staged = self.clone();
        let ids = parsed
            .into_iter()
            .map(|(resource, quantity)| staged.add_resource(resource, quantity))
            .collect::<AppResult<Vec<_>>>()?;
        *self = staged;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::models::{MembershipTier, ResourceDetails};
    use serde_json::json;

    fn lotr() -> Resource {
        Resource::book(
            "The Lord of the Rings - Trilogy",
            "fantasy fiction",
            "J.R.R. Tolkien",
            "978-0261103252",
        )
    }

    fn hobbit() -> Resource {
        Resource::book(
            "The hobbit, or There and back again",
            "fantasy fiction",
            "J.R.R. Tolkien",
            "978-0007458424",
        )
    }

    fn gladiator() -> Resource {
        Resource::dvd("Gladiator", "historical fiction", "Ridley Scott", "2h 18min")
    }

    fn member(limit: i32) -> Member {
        Member::new(1, "Jane Doe".to_string(), MembershipTier::Premium, limit)
    }

    fn assert_availability_consistent(catalog: &Catalog) {
        for r in catalog.resources() {
            assert_eq!(r.availability_status(), r.quantity() > 0, "id={:?}", r.id());
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.add_resource(lotr(), 4).unwrap(), 1);
        assert_eq!(catalog.add_resource(gladiator(), 1).unwrap(), 2);

        let book = catalog.get(1).unwrap();
        assert_eq!(book.id(), Some(1));
        assert_eq!(book.quantity(), 4);
        assert!(book.availability_status());
    }

    #[test]
    fn test_add_same_identity_merges() {
        let mut catalog = Catalog::new();
        let first = catalog.add_resource(lotr(), 2).unwrap();
        let second = catalog.add_resource(lotr(), 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(first).unwrap().quantity(), 5);
    }

    #[test]
    fn test_add_merges_into_unavailable_entry() {
        let mut catalog = Catalog::new();
        let id = catalog.add_resource(lotr(), 1).unwrap();
        catalog.remove_resources(1, &ResourceQuery::by_id(id)).unwrap();
        assert!(!catalog.get(id).unwrap().availability_status());

        catalog.add_resource(lotr(), 2).unwrap();
        let book = catalog.get(id).unwrap();
        assert_eq!(book.quantity(), 2);
        assert!(book.availability_status());
    }

    #[test]
    fn test_add_rejects_non_positive_count() {
        let mut catalog = Catalog::new();
        assert_matches!(
            catalog.add_resource(lotr(), -1),
            Err(AppError::InvalidQuantity(-1))
        );
        assert_matches!(
            catalog.add_resource(lotr(), 0),
            Err(AppError::InvalidQuantity(0))
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_find_by_single_field() {
        let mut catalog = Catalog::new();
        catalog.add_resource(hobbit(), 2).unwrap();
        catalog.add_resource(lotr(), 1).unwrap();

        let query = ResourceQuery::by_title("The hobbit, or There and back again");
        let found: Vec<_> = catalog.find_resources(&query).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), Some(1));
        assert_eq!(found[0].quantity(), 2);
    }

    #[test]
    fn test_find_multi_field_is_or() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();
        catalog.add_resource(hobbit(), 1).unwrap();
        catalog.add_resource(gladiator(), 1).unwrap();

        let query = ResourceQuery::by_title("Gladiator").author("J.R.R. Tolkien");
        let ids: Vec<_> = catalog.find_resources(&query).filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let none = ResourceQuery::by_title("Dune");
        assert_eq!(catalog.find_resources(&none).count(), 0);
    }

    #[test]
    fn test_remove_partial_and_all() {
        let mut catalog = Catalog::new();
        let id = catalog.add_resource(lotr(), 3).unwrap();

        catalog.remove_resources(1, &ResourceQuery::by_id(id)).unwrap();
        assert_eq!(catalog.get(id).unwrap().quantity(), 2);

        let removed = catalog
            .remove_resources(2, &ResourceQuery::by_title("The Lord of the Rings - Trilogy"))
            .unwrap();
        assert_eq!(removed, vec![id]);
        let book = catalog.get(id).unwrap();
        assert_eq!(book.quantity(), 0);
        assert!(!book.availability_status());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_remove_more_than_held_changes_nothing() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 5).unwrap();
        catalog.add_resource(hobbit(), 1).unwrap();

        let err = catalog
            .remove_resources(2, &ResourceQuery::default().genre("fantasy fiction"))
            .unwrap_err();
        assert_matches!(
            err,
            AppError::InsufficientQuantity { id: 2, requested: 2, held: 1 }
        );
        assert_eq!(catalog.get(1).unwrap().quantity(), 5);
        assert_eq!(catalog.get(2).unwrap().quantity(), 1);
    }

    #[test]
    fn test_remove_without_match() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();
        assert_matches!(
            catalog.remove_resources(1, &ResourceQuery::by_title("Dune")),
            Err(AppError::NotFound(_))
        );
        assert_matches!(
            catalog.remove_resources(1, &ResourceQuery::default()),
            Err(AppError::NotFound(_))
        );
    }

    #[test]
    fn test_checkout_checks_limit_first() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();

        assert_matches!(
            catalog.checkout(&[1], &member(0)),
            Err(AppError::BorrowingLimitExhausted(1))
        );
        assert_matches!(
            catalog.checkout(&[1, 2, 3], &member(2)),
            Err(AppError::TooManyRequested { requested: 3, limit: 2 })
        );
        assert_eq!(catalog.get(1).unwrap().quantity(), 1);
    }

    #[test]
    fn test_checkout_skips_missing_and_unavailable() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();
        catalog.add_resource(hobbit(), 1).unwrap();
        catalog.remove_resources(1, &ResourceQuery::by_id(2)).unwrap();

        let borrowed = catalog.checkout(&[2, 1, 9], &member(4)).unwrap();
        assert_eq!(borrowed, vec![1]);

        let book = catalog.get(1).unwrap();
        assert_eq!(book.quantity(), 0);
        assert!(!book.availability_status());
        assert_availability_consistent(&catalog);
    }

    #[test]
    fn test_checkout_unavailable_only_is_not_an_error() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();
        catalog.remove_resources(1, &ResourceQuery::by_id(1)).unwrap();

        assert_eq!(catalog.checkout(&[1], &member(2)).unwrap(), Vec::<ResourceId>::new());
    }

    #[test]
    fn test_checkout_nothing_found() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();
        assert_matches!(
            catalog.checkout(&[21], &member(2)),
            Err(AppError::NothingFound(ids)) if ids == vec![21]
        );
    }

    #[test]
    fn test_checkin_without_borrow_record() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 1).unwrap();

        assert_eq!(catalog.checkin(&[1, 7]).unwrap(), vec![1]);
        assert_eq!(catalog.get(1).unwrap().quantity(), 2);

        assert_matches!(catalog.checkin(&[7]), Err(AppError::NothingFound(_)));
    }

    #[test]
    fn test_add_rejects_quantity_overflow() {
        let mut catalog = Catalog::new();
        let id = catalog.add_resource(lotr(), i32::MAX).unwrap();

        assert_matches!(
            catalog.add_resource(lotr(), 1),
            Err(AppError::QuantityOverflow { id: 1, held: i32::MAX, added: 1 })
        );
        let book = catalog.get(id).unwrap();
        assert_eq!(book.quantity(), i32::MAX);
        assert!(book.availability_status());
    }

    #[test]
    fn test_checkin_overflow_changes_nothing() {
        let mut catalog = Catalog::new();
        catalog.add_resource(hobbit(), 1).unwrap();
        catalog.add_resource(lotr(), i32::MAX).unwrap();

        assert_matches!(
            catalog.checkin(&[1, 2]),
            Err(AppError::QuantityOverflow { id: 2, .. })
        );
        assert_eq!(catalog.get(1).unwrap().quantity(), 1);
        assert_eq!(catalog.get(2).unwrap().quantity(), i32::MAX);
        assert_availability_consistent(&catalog);
    }

    #[test]
    fn test_import_json_overflow_changes_nothing() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), i32::MAX - 1).unwrap();

        let err = catalog.import_json(json!([
            {"kind": "cd", "title": "Kind of Blue", "genre": "jazz",
             "artist": "Miles Davis", "duration": "45min"},
            {"kind": "book", "title": "The Lord of the Rings - Trilogy",
             "genre": "fantasy fiction", "author": "J.R.R. Tolkien",
             "isbn": "978-0261103252", "quantity": 2}
        ]));
        assert_matches!(err, Err(AppError::QuantityOverflow { id: 1, .. }));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().quantity(), i32::MAX - 1);
    }

    #[test]
    fn test_checkin_same_id_twice() {
        let mut catalog = Catalog::new();
        catalog.add_resource(gladiator(), 1).unwrap();
        assert_eq!(catalog.checkin(&[1, 1]).unwrap(), vec![1, 1]);
        assert_eq!(catalog.get(1).unwrap().quantity(), 3);
    }

    #[test]
    fn test_checkin_restores_availability() {
        let mut catalog = Catalog::new();
        catalog.add_resource(gladiator(), 1).unwrap();
        catalog.checkout(&[1], &member(2)).unwrap();
        assert!(!catalog.get(1).unwrap().availability_status());

        catalog.checkin(&[1]).unwrap();
        assert!(catalog.get(1).unwrap().availability_status());
    }

    #[test]
    fn test_available_of_kind() {
        let mut catalog = Catalog::new();
        catalog.add_resource(lotr(), 2).unwrap();
        catalog.add_resource(hobbit(), 2).unwrap();
        catalog.add_resource(gladiator(), 1).unwrap();
        catalog.remove_resources(2, &ResourceQuery::by_id(1)).unwrap();

        let books: Vec<_> = catalog.available_of_kind(ResourceKind::Book).collect();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "The hobbit, or There and back again");
        assert_eq!(catalog.resources_of_kind(ResourceKind::Book).count(), 2);
        assert_eq!(catalog.available_of_kind(ResourceKind::Cd).count(), 0);
    }

    #[test]
    fn test_import_json() {
        let mut catalog = Catalog::new();
        let ids = catalog
            .import_json(json!([
                {"kind": "cd", "title": "Kind of Blue", "genre": "jazz",
                 "artist": "Miles Davis", "duration": "45min", "quantity": 2},
                {"kind": "cd", "title": "Kind of Blue", "genre": "jazz",
                 "artist": "Miles Davis", "duration": "45min"}
            ]))
            .unwrap();

        assert_eq!(ids, vec![1, 1]);
        assert_eq!(catalog.get(1).unwrap().quantity(), 3);
    }

    #[test]
    fn test_import_json_is_all_or_nothing() {
        let mut catalog = Catalog::new();
        let err = catalog.import_json(json!([
            {"kind": "book", "title": "Dune", "genre": "sf", "author": "Frank Herbert", "isbn": "x"},
            {"kind": "vinyl", "title": "Abbey Road", "genre": "rock"}
        ]));
        assert_matches!(err, Err(AppError::UnsupportedType(_)));

        let err = catalog.import_json(json!({
            "kind": "book", "title": "Dune", "genre": "sf",
            "author": "Frank Herbert", "isbn": "x", "quantity": 0
        }));
        assert_matches!(err, Err(AppError::InvalidQuantity(0)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_details_strip_bookkeeping() {
        let mut catalog = Catalog::new();
        catalog.add_resource(gladiator(), 1).unwrap();
        let details: &ResourceDetails = catalog.get(1).unwrap().details();
        let value = serde_json::to_value(details).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Gladiator",
                "genre": "historical fiction",
                "kind": "dvd",
                "director": "Ridley Scott",
                "duration": "2h 18min"
            })
        );
    }
}
