//! Pre-rendered content fragments, one per (column count, sort direction).
//!
//! Built once at startup and never mutated, so request handlers share it
//! without locking.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use tracing::{debug, error, info};

use crate::ordering::{build_cards, row_count, OrderingStrategy};
use crate::records::Record;
use crate::view::{PageData, Presenter};

/// Column counts a client can be bucketed into.
pub const COLUMN_COUNTS: [usize; 4] = [1, 2, 3, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub columns: usize,
    pub reversed: bool,
}

impl CacheKey {
    pub fn new(columns: usize, reversed: bool) -> Self {
        Self { columns, reversed }
    }

    /// Every key the cache is expected to hold.
    pub fn all() -> impl Iterator<Item = CacheKey> {
        COLUMN_COUNTS
            .into_iter()
            .flat_map(|columns| [false, true].map(|reversed| CacheKey::new(columns, reversed)))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cols:{}:rev:{}", self.columns, self.reversed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageCache {
    entries: HashMap<CacheKey, Bytes>,
}

impl PageCache {
    /// Render every key. A key whose render fails is logged and left out.
    pub fn prebuild(
        records: &[Record],
        strategy: OrderingStrategy,
        image_base: &str,
        presenter: &dyn Presenter,
    ) -> Self {
        let mut entries = HashMap::new();

        for key in CacheKey::all() {
            let cards = build_cards(records, strategy, key.columns, key.reversed, image_base);
            let page = PageData {
                rows: row_count(cards.len(), key.columns),
                columns: key.columns,
                cards,
            };

            match presenter.render_content(&page) {
                Ok(html) => {
                    debug!(key = %key, cards = page.cards.len(), rows = page.rows, bytes = html.len(), "pre-rendered");
                    entries.insert(key, Bytes::from(html));
                }
                Err(e) => error!(key = %key, error = %e, "failed to pre-render"),
            }
        }

        let cache = Self { entries };
        if cache.is_empty() {
            error!(strategy = %strategy, "no layout rendered, every /content request will fail");
        }
        info!(
            entries = cache.len(),
            bytes = cache.total_bytes(),
            strategy = %strategy,
            "content cache ready"
        );
        cache
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<Bytes> {
        self.entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.entries.values().map(|b| b.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::records::RecordStore;
    use crate::view::HtmlPresenter;

    fn record(country: &str, image: &str) -> Record {
        Record {
            country: country.to_string(),
            both: 26.0,
            national_dish: "Soup".to_string(),
            dish_wiki: String::new(),
            image_link: image.to_string(),
            aspect_ratio: 1.0,
            order_2_cols: 1,
            order_3_cols: 1,
            order_4_cols: 1,
        }
    }

    /// Rejects one column count as if it were empty, renders a summary otherwise.
    struct FlakyPresenter {
        broken_columns: usize,
    }

    impl Presenter for FlakyPresenter {
        fn render_content(&self, page: &PageData<'_>) -> Result<String, RenderError> {
            if page.columns == self.broken_columns {
                return Err(RenderError::NoColumns);
            }
            Ok(format!("{}x{}:{}", page.columns, page.rows, page.cards.len()))
        }
    }

    struct FailingPresenter;

    impl Presenter for FailingPresenter {
        fn render_content(&self, _page: &PageData<'_>) -> Result<String, RenderError> {
            Err(RenderError::NoColumns)
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(CacheKey::new(3, true).to_string(), "cols:3:rev:true");
        assert_eq!(CacheKey::new(1, false).to_string(), "cols:1:rev:false");
        assert_eq!(CacheKey::all().count(), 8);
    }

    #[test]
    fn test_prebuild_fills_every_key() {
        let store = RecordStore::embedded().unwrap();
        for strategy in [OrderingStrategy::Natural, OrderingStrategy::Hint, OrderingStrategy::Diagonal] {
            let cache = PageCache::prebuild(store.as_slice(), strategy, "/static/img", &HtmlPresenter);
            assert_eq!(cache.len(), 8);
            for key in CacheKey::all() {
                let bytes = cache.lookup(&key).unwrap();
                assert!(!bytes.is_empty(), "{key}");
            }
        }
    }

    #[test]
    fn test_no_displayable_records() {
        let records = vec![record("A", ""), record("B", "")];
        let cache = PageCache::prebuild(&records, OrderingStrategy::Hint, "", &HtmlPresenter);
        assert_eq!(cache.len(), 8);
        for key in CacheKey::all() {
            let html = String::from_utf8(cache.lookup(&key).unwrap().to_vec()).unwrap();
            assert!(html.contains("data-rows=\"0\""));
            assert!(!html.contains("<article"));
        }
    }

    #[test]
    fn test_render_failure_omits_key() {
        let records = vec![record("A", "a.jpg"), record("B", "b.jpg"), record("C", "c.jpg")];
        let presenter = FlakyPresenter { broken_columns: 3 };
        let cache = PageCache::prebuild(&records, OrderingStrategy::Hint, "", &presenter);

        assert_eq!(cache.len(), 6);
        assert!(cache.lookup(&CacheKey::new(3, false)).is_none());
        assert!(cache.lookup(&CacheKey::new(3, true)).is_none());
        assert_eq!(cache.lookup(&CacheKey::new(2, true)).unwrap(), Bytes::from("2x2:3"));
        assert_eq!(cache.lookup(&CacheKey::new(4, false)).unwrap(), Bytes::from("4x1:3"));
    }

    #[test]
    fn test_total_bytes() {
        let records = vec![record("A", "a.jpg")];
        let cache = PageCache::prebuild(&records, OrderingStrategy::Natural, "", &FlakyPresenter { broken_columns: 0 });
        // "Nx1:1" for each of the 8 keys
        assert_eq!(cache.total_bytes(), 8 * 5);
        assert!(PageCache::default().is_empty());
    }

    #[test]
    fn test_every_render_failing_leaves_cache_empty() {
        let records = vec![record("A", "a.jpg")];
        let presenter = FailingPresenter;
        let cache = PageCache::prebuild(&records, OrderingStrategy::Hint, "", &presenter);
        assert!(cache.is_empty());
        assert!(cache.lookup(&CacheKey::new(1, false)).is_none());
    }
}
