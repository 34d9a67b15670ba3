mod aggregate;

pub use aggregate::Aggregator;

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Group receiving contributions that have no top-level folder to belong to.
pub const UNKNOWN_GROUP: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationBucket {
    pub album_count: u64,
    pub item_count: u64,
    /// Full precision; rounding is a presentation concern.
    pub valuation_sum: f64,
}

impl AggregationBucket {
    pub fn merge(&mut self, other: &AggregationBucket) {
        self.album_count += other.album_count;
        self.item_count += other.item_count;
        self.valuation_sum += other.valuation_sum;
    }
}

/// Per-group buckets produced by one subtree walk. Tallies of disjoint
/// subtrees are combined with [`GroupTally::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTally {
    buckets: BTreeMap<String, AggregationBucket>,
}

impl GroupTally {
    pub fn single(group: &str, bucket: AggregationBucket) -> Self {
        let mut tally = Self::default();
        tally.buckets.insert(group.to_string(), bucket);
        tally
    }

    pub fn merge(mut self, other: GroupTally) -> Self {
        for (group, bucket) in other.buckets {
            self.buckets.entry(group).or_default().merge(&bucket);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_report(self) -> StatsReport {
        StatsReport::from_groups(self.buckets)
    }
}

/// Result of one aggregation run. The total is always derived from the
/// groups, and there is always at least one group.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    groups: BTreeMap<String, AggregationBucket>,
    total: AggregationBucket,
}

impl StatsReport {
    pub fn from_groups(mut groups: BTreeMap<String, AggregationBucket>) -> Self {
        let mut total = AggregationBucket::default();
        for bucket in groups.values() {
            total.merge(bucket);
        }
        if groups.is_empty() {
            groups.insert(UNKNOWN_GROUP.to_string(), total);
        }
        Self { groups, total }
    }

    pub fn groups(&self) -> &BTreeMap<String, AggregationBucket> {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&AggregationBucket> {
        self.groups.get(key)
    }

    pub fn total(&self) -> &AggregationBucket {
        &self.total
    }

    /// Grand-total valuation as displayed, two decimals.
    pub fn formatted_total_valuation(&self) -> String {
        format_valuation(self.total.valuation_sum)
    }
}

pub fn format_valuation(value: f64) -> String {
    format!("{:.2}", value)
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalDocument {
    album_count: u64,
    item_count: u64,
    valuation_sum: String,
}

#[derive(serde::Serialize)]
struct StatsDocument<'a> {
    groups: &'a BTreeMap<String, AggregationBucket>,
    total: TotalDocument,
}

impl Serialize for StatsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatsDocument {
            groups: &self.groups,
            total: TotalDocument {
                album_count: self.total.album_count,
                item_count: self.total.item_count,
                valuation_sum: self.formatted_total_valuation(),
            },
        }
        .serialize(serializer)
    }
}
