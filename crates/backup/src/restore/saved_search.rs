use crate::report::{Outcome, Tally};
use crate::snapshot::SavedSearchSnapshot;
use shelf_cache::Transaction;
use shelf_cache::error::Result;

/// Append saved searches missing by `(source, name)`.
pub(crate) async fn restore(tx: &mut Transaction, backup: &[SavedSearchSnapshot]) -> Result<Tally> {
    let mut tally = Tally::default();
    for search in backup {
        if tx.find_saved_search(search.source, &search.name).await?.is_some() {
            tally.record(Outcome::Unchanged);
            continue;
        }
        tx.insert_saved_search(&search.to_saved_search()).await?;
        tally.record(Outcome::Inserted);
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_cache::{Database, Repository};

    fn search(source: i64, name: &str) -> SavedSearchSnapshot {
        SavedSearchSnapshot { source, name: name.to_string(), query: Some("q".to_string()), filters: None }
    }

    #[tokio::test]
    async fn test_identity_is_source_and_name() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let mut tx = repo.begin().await.unwrap();

        let backup = [search(1, "Popular"), search(2, "Popular"), search(1, "Popular")];
        let tally = restore(&mut tx, &backup).await.unwrap();
        assert_eq!(tally, Tally { inserted: 2, unchanged: 1, ..Tally::default() });
        assert_eq!(tx.list_saved_searches().await.unwrap().len(), 2);
    }
}
