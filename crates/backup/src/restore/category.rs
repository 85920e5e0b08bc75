use crate::report::{Outcome, Tally};
use crate::snapshot::CategorySnapshot;
use shelf_cache::Transaction;
use shelf_cache::error::Result;

/// Local category id for each position in the snapshot's category list.
///
/// A position that could not be restored maps to `None`.
#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryLookup(Vec<Option<i64>>);

impl CategoryLookup {
    pub(crate) fn get(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied().flatten()
    }
}

/// Match backup categories to local ones by exact name, inserting the rest
/// after the current highest sort order.
pub(crate) async fn restore(tx: &mut Transaction, backup: &[CategorySnapshot]) -> Result<(CategoryLookup, Tally)> {
    let mut local = tx.list_categories().await?;
    let mut next_order = local.iter().map(|c| c.order).max().map_or(0, |max| max + 1);
    let mut ids = Vec::with_capacity(backup.len());
    let mut tally = Tally::default();

    for category in backup {
        if let Some(existing) = local.iter().find(|c| c.name == category.name) {
            ids.push(existing.id);
            tally.record(Outcome::Unchanged);
            continue;
        }
        let mut created = category.to_category();
        created.order = next_order;
        next_order += 1;
        let id = tx.insert_category(&created).await?;
        tracing::debug!(name = %created.name, id, "category created");
        created.id = Some(id);
        local.push(created);
        ids.push(Some(id));
        tally.record(Outcome::Inserted);
    }
    Ok((CategoryLookup(ids), tally))
}

/// Add the entry to the categories it had in the backup. Links are never
/// removed.
pub(crate) async fn link(
    tx: &mut Transaction,
    entry_id: i64,
    indexes: &[usize],
    lookup: &CategoryLookup,
) -> Result<Tally> {
    let mut tally = Tally::default();
    for &index in indexes {
        let Some(category_id) = lookup.get(index) else {
            tally.record(Outcome::Skipped);
            continue;
        };
        let linked = tx.link_entry_category(entry_id, category_id).await?;
        tally.record(if linked { Outcome::Inserted } else { Outcome::Unchanged });
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_cache::{Database, Repository};
    use shelf_models::{Category, Entry};

    fn named(name: &str) -> CategorySnapshot {
        CategorySnapshot { name: name.to_string(), order: 0, flags: 0 }
    }

    #[tokio::test]
    async fn test_new_categories_are_appended() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let mut tx = repo.begin().await.unwrap();
        let existing = tx.insert_category(&Category::new("Reading", 4)).await.unwrap();

        let (lookup, tally) = restore(&mut tx, &[named("Later"), named("Reading"), named("Done")]).await.unwrap();
        assert_eq!(lookup.get(1), Some(existing));
        assert_eq!(tally, Tally { inserted: 2, unchanged: 1, ..Tally::default() });
        assert_eq!(lookup.get(3), None);

        let orders: Vec<_> = tx.list_categories().await.unwrap().into_iter().map(|c| (c.name, c.order)).collect();
        assert_eq!(orders, [("Reading".to_string(), 4), ("Later".to_string(), 5), ("Done".to_string(), 6)]);
    }

    #[tokio::test]
    async fn test_duplicate_names_collapse() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let mut tx = repo.begin().await.unwrap();
        let (lookup, tally) = restore(&mut tx, &[named("A"), named("A")]).await.unwrap();
        assert_eq!(lookup.get(0), lookup.get(1));
        assert_eq!(tally.inserted, 1);
    }

    #[tokio::test]
    async fn test_links_are_added_once() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let mut tx = repo.begin().await.unwrap();
        let entry_id = tx.insert_entry(&Entry::new(1, "/m/1", "M")).await.unwrap();
        let (lookup, _) = restore(&mut tx, &[named("A")]).await.unwrap();

        let first = link(&mut tx, entry_id, &[0, 7], &lookup).await.unwrap();
        assert_eq!(first, Tally { inserted: 1, skipped: 1, ..Tally::default() });
        let second = link(&mut tx, entry_id, &[0], &lookup).await.unwrap();
        assert_eq!(second, Tally { unchanged: 1, ..Tally::default() });
    }
}
