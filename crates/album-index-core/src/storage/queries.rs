use rusqlite::{params, Row};
use tracing::debug;

use super::models::{CollectionItem, ItemStatus, NewItem};
use super::sqlite::Database;
use super::CollectionStore;
use crate::error::Error;
use crate::paths;

const ITEM_COLUMNS: &str = "id, album_key, name, country, year, status, classification, \
                            valuation, cancellation, notes, damaged, created_at";

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<CollectionItem> {
    let status: Option<String> = row.get(5)?;
    Ok(CollectionItem {
        id: row.get(0)?,
        album_key: row.get(1)?,
        name: row.get(2)?,
        country: row.get(3)?,
        year: row.get(4)?,
        status: status.and_then(|s| s.parse::<ItemStatus>().ok()),
        classification: row.get(6)?,
        valuation: row.get(7)?,
        cancellation: row.get(8)?,
        notes: row.get(9)?,
        damaged: row.get(10)?,
        created_at: row.get(11)?,
    })
}

impl Database {
    pub fn get_item(&self, id: i64) -> Result<Option<CollectionItem>, Error> {
        let sql = format!("SELECT {} FROM collection_item WHERE id = ?1", ITEM_COLUMNS);
        match self.connection().query_row(&sql, params![id], item_from_row) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Album keys that have at least one item, with their item counts.
    pub fn album_keys(&self) -> Result<Vec<(String, i64)>, Error> {
        let mut stmt = self.connection().prepare(
            "SELECT album_key, COUNT(*) FROM collection_item \
             GROUP BY album_key ORDER BY album_key",
        )?;
        let keys = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys)
    }
}

impl CollectionStore for Database {
    fn list(&self, album_key: &str) -> Result<Vec<CollectionItem>, Error> {
        let sql = format!(
            "SELECT {} FROM collection_item WHERE album_key = ?1 ORDER BY id",
            ITEM_COLUMNS
        );
        let mut stmt = self.connection().prepare(&sql)?;
        let items = stmt
            .query_map(params![paths::normalize_key(album_key)], item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn add(&self, item: NewItem) -> Result<CollectionItem, Error> {
        if item.name.trim().is_empty() {
            return Err(Error::InvalidInput("item name must not be empty".to_string()));
        }
        let album_key = paths::normalize_key(&item.album_key);
        let now = chrono::Utc::now().to_rfc3339();
        self.connection().execute(
            "INSERT INTO collection_item (album_key, name, country, year, status, \
             classification, valuation, cancellation, notes, damaged, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                album_key,
                item.name.trim(),
                item.country,
                item.year,
                item.status.map(|s| s.as_str()),
                item.classification,
                item.valuation,
                item.cancellation,
                item.notes,
                item.damaged,
                now,
            ],
        )?;
        let id = self.connection().last_insert_rowid();
        debug!("Added item {} to album '{}'", id, album_key);

        self.get_item(id)?
            .ok_or_else(|| Error::NotFound(format!("item {} after insert", id)))
    }

    fn remove(&self, id: i64) -> Result<bool, Error> {
        let removed = self
            .connection()
            .execute("DELETE FROM collection_item WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
