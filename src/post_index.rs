use std::io;

use serde::Deserialize;
use spdlog::debug;
use tokio::sync::OnceCell;

use crate::fetch::{fetch_doc, JsonFetcher};
use crate::post_handle::{IndexEntry, PostHandle};
use crate::sort::{compare_by, SortField};

/// The metadata index document: one entry per post, in publication file
/// order.
#[derive(Deserialize)]
pub struct IndexDoc {
    pub posts: Vec<IndexEntry>,
}

/// Lazily initialized collection of post handles for one directory.
///
/// The index path is the directory concatenated with the index file name,
/// with no separator inserted - callers pass a trailing-slash directory
/// ("posts/"). Handle paths get a separator added when needed.
pub struct PostIndex {
    dir: String,
    index_path: String,
    handles: OnceCell<Vec<PostHandle>>,
}

impl PostIndex {
    pub fn new(index_file: &str, dir: &str) -> PostIndex {
        PostIndex {
            dir: dir.to_string(),
            index_path: format!("{}{}", dir, index_file),
            handles: OnceCell::new(),
        }
    }

    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    pub fn is_initialized(&self) -> bool {
        self.handles.initialized()
    }

    /// Handles loaded so far. Empty before the first retrieval.
    pub fn handles(&self) -> &[PostHandle] {
        match self.handles.get() {
            Some(handles) => handles.as_slice(),
            None => &[],
        }
    }

    /// Returns the handle sequence, fetching and decoding the index
    /// document on first call. Initialization is single-flight: concurrent
    /// first callers await one shared fetch instead of each starting their
    /// own.
    pub async fn get_posts(&self, fetcher: &impl JsonFetcher) -> io::Result<&[PostHandle]> {
        let handles = self.handles.get_or_try_init(|| async {
            let doc: IndexDoc = fetch_doc(fetcher, &self.index_path).await?;
            debug!("Index {} holds {} posts", self.index_path, doc.posts.len());
            let handles = doc.posts.into_iter()
                .map(|entry| PostHandle::from_entry(&self.dir, entry))
                .collect::<Vec<_>>();
            Ok::<_, io::Error>(handles)
        }).await?;

        Ok(handles.as_slice())
    }

    /// Sorted copy of the handle sequence. The sort is stable, so entries
    /// with equal field values keep their index order.
    pub async fn get_posts_sorted(
        &self,
        fetcher: &impl JsonFetcher,
        field: SortField,
        reverse: bool,
    ) -> io::Result<Vec<PostHandle>> {
        let mut handles = self.get_posts(fetcher).await?.to_vec();
        handles.sort_by(compare_by(field, reverse));
        Ok(handles)
    }

    /// Newest first, by creation timestamp.
    pub async fn get_posts_most_recent(&self, fetcher: &impl JsonFetcher) -> io::Result<Vec<PostHandle>> {
        self.get_posts_sorted(fetcher, SortField::Created, true).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use crate::fetch::tests::MapFetcher;
    use crate::test_data::INDEX_JSON;

    use super::*;

    struct CountingFetcher {
        inner: MapFetcher,
        calls: AtomicUsize,
    }

    impl JsonFetcher for CountingFetcher {
        async fn fetch_json(&self, path: &str) -> io::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_json(path).await
        }
    }

    #[test]
    fn test_index_path_is_plain_concatenation() {
        let index = PostIndex::new("meta.json", "posts/");
        assert_eq!(index.index_path(), "posts/meta.json");

        // No separator is inserted; the directory carries its own slash
        let index = PostIndex::new("meta.json", "");
        assert_eq!(index.index_path(), "meta.json");
    }

    #[tokio::test]
    async fn test_lazy_initialization() {
        let fetcher = MapFetcher::from(&[("posts/meta.json", INDEX_JSON)]);
        let index = PostIndex::new("meta.json", "posts/");

        assert!(!index.is_initialized());
        assert!(index.handles().is_empty());

        let handles = index.get_posts(&fetcher).await.unwrap();
        assert_eq!(handles.len(), 3);
        assert!(index.is_initialized());
        assert_eq!(index.handles().len(), 3);
    }

    #[tokio::test]
    async fn test_second_retrieval_reuses_sequence() {
        let fetcher = MapFetcher::from(&[("posts/meta.json", INDEX_JSON)]);
        let index = PostIndex::new("meta.json", "posts/");

        index.get_posts(&fetcher).await.unwrap();
        // A fetcher without the index would fail if a re-fetch happened
        let empty = MapFetcher::from(&[]);
        let handles = index.get_posts(&empty).await.unwrap();
        assert_eq!(handles.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_shares_one_fetch() {
        let fetcher = CountingFetcher {
            inner: MapFetcher::from(&[("posts/meta.json", INDEX_JSON)]),
            calls: AtomicUsize::new(0),
        };
        let index = PostIndex::new("meta.json", "posts/");

        let (a, b) = tokio::join!(
            index.get_posts(&fetcher),
            index.get_posts(&fetcher),
        );
        assert_eq!(a.unwrap().len(), 3);
        assert_eq!(b.unwrap().len(), 3);
        assert!(index.is_initialized());
        // Both callers share one index fetch
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_entries_keep_document_order() {
        let fetcher = MapFetcher::from(&[("posts/meta.json", INDEX_JSON)]);
        let index = PostIndex::new("meta.json", "posts/");
        let handles = index.get_posts(&fetcher).await.unwrap();
        let titles: Vec<_> = handles.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["T0", "T1", "T2"]);
    }

    #[tokio::test]
    async fn test_sorted_newest_first() {
        let fetcher = MapFetcher::from(&[("posts/meta.json", INDEX_JSON)]);
        let index = PostIndex::new("meta.json", "posts/");
        let handles = index.get_posts_most_recent(&fetcher).await.unwrap();
        let created: Vec<_> = handles.iter().map(|h| h.created.as_str()).collect();
        assert_eq!(created, ["2022-01-22", "2022-01-21", "2022-01-20"]);
    }

    #[tokio::test]
    async fn test_missing_index_is_an_error() {
        let fetcher = MapFetcher::from(&[]);
        let index = PostIndex::new("meta.json", "posts/");
        assert!(index.get_posts(&fetcher).await.is_err());
        assert!(!index.is_initialized());
    }
}
