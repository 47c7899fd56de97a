//! View filter
//!
//! Pure filtering of a snapshot for display. Matching is case-insensitive
//! substring on the item name; storage itself stays case-sensitive.

use larder_core::{InventoryItem, Snapshot};

/// Filter a snapshot by case-insensitive substring match on item name.
///
/// An empty query matches everything. Input ordering is preserved; the
/// sequence is filtered, never resorted.
pub fn filter_items(items: &[InventoryItem], query: &str) -> Snapshot {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::ItemDocument;

    fn items(names: &[&str]) -> Snapshot {
        names
            .iter()
            .map(|name| InventoryItem::new(*name, ItemDocument::with_quantity(1)))
            .collect()
    }

    #[test]
    fn test_empty_query_matches_all_in_order() {
        let snapshot = items(&["banana", "apple", "cherry"]);
        let filtered = filter_items(&snapshot, "");
        assert_eq!(filtered, snapshot);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let snapshot = items(&["eggplant", "milk"]);
        let filtered = filter_items(&snapshot, "EGG");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "eggplant");
    }

    #[test]
    fn test_uppercase_names_match_lowercase_query() {
        let snapshot = items(&["Milk", "MILK chocolate", "flour"]);
        let filtered = filter_items(&snapshot, "milk");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let snapshot = items(&["apple", "banana"]);
        assert!(filter_items(&snapshot, "zucchini").is_empty());
    }

    #[test]
    fn test_order_preserved_across_gaps() {
        let snapshot = items(&["pear", "apple", "pepper", "plum"]);
        let filtered = filter_items(&snapshot, "pe");
        let names: Vec<_> = filtered.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["pear", "pepper"]);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let snapshot = items(&["apple"]);
        let _ = filter_items(&snapshot, "x");
        assert_eq!(snapshot.len(), 1);
    }
}
