use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Mint,
    Used,
    Variety,
    SelfAdhesive,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Mint => "mint",
            ItemStatus::Used => "used",
            ItemStatus::Variety => "variety",
            ItemStatus::SelfAdhesive => "self-adhesive",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mint" | "neuf" => Ok(ItemStatus::Mint),
            "used" | "oblitéré" | "oblitere" => Ok(ItemStatus::Used),
            "variety" | "variété" | "variete" => Ok(ItemStatus::Variety),
            "self-adhesive" | "auto-adhésif" | "auto-adhesif" => Ok(ItemStatus::SelfAdhesive),
            other => Err(format!("unknown item status '{}'", other)),
        }
    }
}

/// An item as entered by the user, before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub album_key: String,
    pub name: String,
    pub country: String,
    pub year: String,
    pub status: Option<ItemStatus>,
    pub classification: String,
    pub valuation: Option<f64>,
    pub cancellation: String,
    pub notes: String,
    pub damaged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: i64,
    pub album_key: String,
    pub name: String,
    pub country: String,
    pub year: String,
    pub status: Option<ItemStatus>,
    pub classification: String,
    pub valuation: Option<f64>,
    pub cancellation: String,
    pub notes: String,
    pub damaged: bool,
    pub created_at: String,
}

/// Counts shown alongside an item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemTally {
    pub total: usize,
    pub used: usize,
    pub mint: usize,
    pub varieties: usize,
    pub self_adhesive: usize,
    pub damaged: usize,
}

impl ItemTally {
    pub fn from_items(items: &[CollectionItem]) -> Self {
        let mut tally = ItemTally {
            total: items.len(),
            ..ItemTally::default()
        };
        for item in items {
            match item.status {
                Some(ItemStatus::Used) => tally.used += 1,
                Some(ItemStatus::Mint) => tally.mint += 1,
                Some(ItemStatus::Variety) => tally.varieties += 1,
                Some(ItemStatus::SelfAdhesive) => tally.self_adhesive += 1,
                None => {}
            }
            if item.damaged {
                tally.damaged += 1;
            }
        }
        tally
    }
}
