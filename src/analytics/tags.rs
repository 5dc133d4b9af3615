use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::analytics::time_buckets::{BucketAcc, BucketStats};
use crate::models::Trade;

/// Per-tag performance. A multi-tagged trade counts fully under each of
/// its tags, so tag rows do not sum to the account totals. Untagged
/// trades are left out entirely.
pub fn tag_stats(trades: &[Trade]) -> Vec<BucketStats> {
    let mut by_tag: HashMap<&str, BucketAcc> = HashMap::new();

    for trade in trades {
        // Tags are a set; a duplicate string in the stored array counts once.
        let unique: BTreeSet<&str> = trade
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .collect();
        for tag in unique {
            by_tag.entry(tag).or_default().add(trade);
        }
    }

    let mut stats: Vec<BucketStats> = by_tag
        .into_iter()
        .map(|(tag, acc)| acc.finish(tag.to_string(), true))
        .collect();

    stats.sort_by(|a, b| {
        b.net_pnl
            .partial_cmp(&a.net_pnl)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.trades.cmp(&a.trades))
            .then_with(|| a.key.cmp(&b.key))
    });
    stats
}
