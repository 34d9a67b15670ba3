pub mod models;
mod queries;
mod sqlite;

pub use models::{CollectionItem, ItemStatus, ItemTally, NewItem};
pub use sqlite::Database;

use crate::error::Error;

/// Repository for collection items entered by hand, keyed by album folder.
pub trait CollectionStore {
    /// Items of one album, oldest first.
    fn list(&self, album_key: &str) -> Result<Vec<CollectionItem>, Error>;
    fn add(&self, item: NewItem) -> Result<CollectionItem, Error>;
    /// Returns whether an item was removed.
    fn remove(&self, id: i64) -> Result<bool, Error>;
}
