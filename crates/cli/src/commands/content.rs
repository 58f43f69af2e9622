//! Content inspection commands.

use noievoi_core::{ContentItem, Page};
use noievoi_site::store::ContentStore;

/// One line per content item: id, type, resolved page and title.
///
/// With `page`, only the items shown on that page are listed.
#[must_use]
pub fn list(store: &ContentStore, page: Option<Page>) -> Vec<String> {
    match page {
        Some(page) => store
            .page_view(page)
            .items()
            .iter()
            .map(|item| format_item(item))
            .collect(),
        None => store.list_content().iter().map(format_item).collect(),
    }
}

fn format_item(item: &ContentItem) -> String {
    format!(
        "{:<24} {:<9} {:<9} {}",
        item.id,
        item.kind().as_str(),
        item.resolved_page().as_str(),
        item.title
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use noievoi_site::store::MemoryStorage;

    #[test]
    fn test_list_all_content() {
        let store = ContentStore::open(Box::new(MemoryStorage::new())).unwrap();
        let lines = list(&store, None);
        assert_eq!(lines.len(), store.list_content().len());
    }

    #[test]
    fn test_list_filters_by_page() {
        let store = ContentStore::open(Box::new(MemoryStorage::new())).unwrap();
        let lines = list(&store, Some(Page::Team));
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|line| line.contains(" team ")));
    }
}
