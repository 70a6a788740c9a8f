//! Filtered, paginated views over a cached collection snapshot.

use serde::Serialize;

use crate::application::pagination::{PageInfo, PageRequest};
use crate::cache::CachedSnapshot;
use crate::domain::entities::ItemRecord;

/// Fields the view builder needs to filter a record.
pub trait CatalogEntry {
    fn entry_id(&self) -> i64;
    fn entry_name(&self) -> &str;
    fn entry_type(&self) -> i64;
}

impl CatalogEntry for ItemRecord {
    fn entry_id(&self) -> i64 {
        i64::from(self.id)
    }

    fn entry_name(&self) -> &str {
        &self.name
    }

    fn entry_type(&self) -> i64 {
        i64::from(self.item_type)
    }
}

/// Optional search text and type filter, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    search: Option<String>,
    search_folded: Option<String>,
    type_id: Option<i64>,
}

impl CatalogFilter {
    /// Whitespace-only search text is treated as no search.
    pub fn new(search: Option<&str>, type_id: Option<i64>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let search_folded = search.as_deref().map(str::to_lowercase);
        Self {
            search,
            search_folded,
            type_id,
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn type_id(&self) -> Option<i64> {
        self.type_id
    }

    /// Name matches case-insensitively, id matches as a decimal substring.
    pub fn matches<T: CatalogEntry>(&self, entry: &T) -> bool {
        if self
            .type_id
            .is_some_and(|type_id| entry.entry_type() != type_id)
        {
            return false;
        }

        match (self.search.as_deref(), self.search_folded.as_deref()) {
            (Some(raw), Some(folded)) => {
                entry.entry_name().to_lowercase().contains(folded)
                    || entry.entry_id().to_string().contains(raw)
            }
            _ => true,
        }
    }
}

/// One response page plus the unfiltered lookup table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<T, A> {
    pub records: Vec<T>,
    pub lookup_table: Vec<A>,
    pub pagination: PageInfo,
}

/// Derive a page from `snapshot`. Pure: no I/O, snapshot untouched.
pub fn build_view<T, A>(
    snapshot: &CachedSnapshot<T, A>,
    filter: &CatalogFilter,
    request: PageRequest,
) -> CatalogView<T, A>
where
    T: CatalogEntry + Clone,
    A: Clone,
{
    let matching: Vec<&T> = snapshot
        .items()
        .iter()
        .filter(|entry| filter.matches(*entry))
        .collect();

    let total = matching.len();
    let records = matching[request.window(total)]
        .iter()
        .map(|entry| (*entry).clone())
        .collect();

    CatalogView {
        records,
        lookup_table: snapshot.auxiliary().to_vec(),
        pagination: PageInfo {
            page: request.page.get(),
            limit: request.size,
            total_count: total as u64,
            total_pages: request.total_pages(total),
            cached_at: snapshot.loaded_at(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use time::OffsetDateTime;

    use super::*;
    use crate::application::pagination::PageSize;
    use crate::domain::entities::ItemTypeRecord;

    fn item(id: i32, name: &str, item_type: i16) -> ItemRecord {
        ItemRecord {
            id,
            name: name.to_string(),
            item_type,
            description: String::new(),
            icon_id: 0,
            part: -1,
            gender: 3,
            power_require: 0,
            is_up_to_up: false,
        }
    }

    fn snapshot(items: Vec<ItemRecord>) -> CachedSnapshot<ItemRecord, ItemTypeRecord> {
        let types = vec![
            ItemTypeRecord {
                id: 0,
                name: "Armor".to_string(),
            },
            ItemTypeRecord {
                id: 1,
                name: "Weapon".to_string(),
            },
        ];
        CachedSnapshot::new(items, types, OffsetDateTime::now_utc(), 1)
    }

    fn page(page: u32, size: PageSize) -> PageRequest {
        PageRequest::new(NonZeroU32::new(page).unwrap(), size)
    }

    fn names(view: &CatalogView<ItemRecord, ItemTypeRecord>) -> Vec<&str> {
        view.records.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn search_matches_names_case_insensitively() {
        let snap = snapshot(vec![
            item(1, "Sword", 1),
            item(2, "Shield", 0),
            item(42, "axe", 1),
        ]);
        let view = build_view(
            &snap,
            &CatalogFilter::new(Some("s"), None),
            page(1, PageSize::Unlimited),
        );
        assert_eq!(names(&view), vec!["Sword", "Shield"]);
    }

    #[test]
    fn search_matches_ids_as_substrings() {
        let snap = snapshot(vec![
            item(1, "Sword", 1),
            item(2, "Shield", 0),
            item(42, "axe", 1),
        ]);
        let view = build_view(
            &snap,
            &CatalogFilter::new(Some("4"), None),
            page(1, PageSize::Unlimited),
        );
        assert_eq!(names(&view), vec!["axe"]);
    }

    #[test]
    fn type_filter_composes_with_search() {
        let snap = snapshot(vec![
            item(1, "Sword", 1),
            item(2, "Shield", 0),
            item(3, "Short Bow", 1),
        ]);
        let view = build_view(
            &snap,
            &CatalogFilter::new(Some("sh"), Some(1)),
            page(1, PageSize::Unlimited),
        );
        assert_eq!(names(&view), vec!["Short Bow"]);
        assert_eq!(view.pagination.total_count, 1);
    }

    #[test]
    fn blank_search_returns_everything() {
        let snap = snapshot(vec![item(1, "Sword", 1), item(2, "Shield", 0)]);
        let view = build_view(
            &snap,
            &CatalogFilter::new(Some("   "), None),
            PageRequest::default(),
        );
        assert_eq!(view.records.len(), 2);
    }

    #[test]
    fn pages_slice_the_filtered_set() {
        let items = (1..=25).map(|id| item(id, &format!("Item {id}"), 0)).collect();
        let snap = snapshot(items);
        let filter = CatalogFilter::default();
        let size = PageSize::limited(10).unwrap();

        let first = build_view(&snap, &filter, page(1, size));
        let third = build_view(&snap, &filter, page(3, size));
        let fourth = build_view(&snap, &filter, page(4, size));

        assert_eq!(first.records.first().map(|item| item.id), Some(1));
        assert_eq!(first.records.len(), 10);
        assert_eq!(
            third.records.iter().map(|item| item.id).collect::<Vec<_>>(),
            vec![21, 22, 23, 24, 25]
        );
        assert!(fourth.records.is_empty());
        for view in [&first, &third, &fourth] {
            assert_eq!(view.pagination.total_pages, 3);
            assert_eq!(view.pagination.total_count, 25);
        }
    }

    #[test]
    fn unlimited_page_size_ignores_page_number() {
        let items = (1..=25).map(|id| item(id, &format!("Item {id}"), 0)).collect();
        let snap = snapshot(items);
        let view = build_view(&snap, &CatalogFilter::default(), page(5, PageSize::Unlimited));

        assert_eq!(view.records.len(), 25);
        assert_eq!(view.pagination.total_pages, 1);
        assert_eq!(view.pagination.page, 5);
    }

    #[test]
    fn lookup_table_is_never_filtered() {
        let snap = snapshot(vec![item(1, "Sword", 1)]);
        let view = build_view(
            &snap,
            &CatalogFilter::new(Some("no match"), Some(9)),
            PageRequest::default(),
        );
        assert!(view.records.is_empty());
        assert_eq!(view.lookup_table.len(), 2);
        assert_eq!(view.pagination.cached_at, snap.loaded_at());
    }

    #[test]
    fn views_serialize_with_camel_case_pagination() {
        let snap = snapshot(vec![item(7, "Ring", 0)]);
        let view = build_view(&snap, &CatalogFilter::default(), PageRequest::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["records"][0]["type"], 0);
        assert_eq!(json["lookupTable"][1]["name"], "Weapon");
        assert_eq!(json["pagination"]["totalCount"], 1);
        assert_eq!(json["pagination"]["totalPages"], 1);
        assert_eq!(json["pagination"]["limit"], 20);
        assert!(json["pagination"]["cachedAt"].is_string());
    }
}
