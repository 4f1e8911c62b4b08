use crate::model::{normalize_for_search, ListItem};

/// Keeps the items whose search text contains `query`, case-insensitively.
/// A blank query keeps everything in its original order.
pub fn filter(items: &[ListItem], query: &str) -> Vec<ListItem> {
    let normalized_query = normalize_for_search(query);
    if normalized_query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| matches_query(item, &normalized_query))
        .cloned()
        .collect()
}

fn matches_query(item: &ListItem, normalized_query: &str) -> bool {
    item.search_text().contains(normalized_query)
}
