use std::io;

use serde::Deserialize;

use crate::fetch::{fetch_doc, JsonFetcher};
use crate::post::{split_tags, Post, PostDoc};

/// One entry of the metadata index document.
#[derive(Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub path: String,
    pub created: String,
    pub updated: String,
    pub tags: String,
}

/// A lightweight reference to a post: everything the index knows about it,
/// without the body. Timestamps are kept as the raw index strings on
/// purpose - sorting compares them as-is, which for ISO dates matches
/// chronological order without a parse step.
#[derive(Debug, Clone, PartialEq)]
pub struct PostHandle {
    pub title: String,
    pub id: String,
    pub path: String,
    pub created: String,
    pub updated: String,
    pub tags: Vec<String>,
}

impl PostHandle {
    pub fn from_entry(dir: &str, entry: IndexEntry) -> PostHandle {
        let path = if dir.ends_with('/') {
            format!("{}{}", dir, entry.path)
        } else {
            format!("{}/{}", dir, entry.path)
        };

        PostHandle {
            title: entry.title,
            id: entry.path,
            path,
            created: entry.created,
            updated: entry.updated,
            tags: split_tags(&entry.tags),
        }
    }

    /// Fetches the full document at this handle's path and builds the Post.
    /// Not a cache: every call performs a fresh fetch and returns an
    /// independent instance.
    pub async fn resolve(&self, fetcher: &impl JsonFetcher) -> io::Result<Post> {
        let doc: PostDoc = fetch_doc(fetcher, &self.path).await?;
        Post::from_doc(doc)
    }
}

#[cfg(test)]
mod tests {
    use crate::fetch::tests::MapFetcher;
    use crate::test_data::{index_entry, POST_JSON};

    use super::*;

    #[test]
    fn test_path_join() {
        let handle = PostHandle::from_entry("posts", index_entry());
        assert_eq!(handle.id, "a.json");
        assert_eq!(handle.path, "posts/a.json");

        let handle = PostHandle::from_entry("posts/", index_entry());
        assert_eq!(handle.path, "posts/a.json");
    }

    #[test]
    fn test_tags_are_split_raw() {
        let mut entry = index_entry();
        entry.tags = "x, y".to_string();
        let handle = PostHandle::from_entry("posts", entry);
        assert_eq!(handle.tags, ["x", " y"]);
    }

    #[tokio::test]
    async fn test_resolve_happy_case() {
        let fetcher = MapFetcher::from(&[("posts/a.json", POST_JSON)]);
        let handle = PostHandle::from_entry("posts", index_entry());
        let post = handle.resolve(&fetcher).await.unwrap();
        assert_eq!(post.title, "T0");
        assert_eq!(post.content, "L1\nL2");
    }

    #[tokio::test]
    async fn test_resolve_refetches_every_time() {
        let fetcher = MapFetcher::from(&[("posts/a.json", POST_JSON)]);
        let handle = PostHandle::from_entry("posts", index_entry());
        let first = handle.resolve(&fetcher).await.unwrap();
        let second = handle.resolve(&fetcher).await.unwrap();
        // Equal by contract, but independently constructed
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_missing_post() {
        let fetcher = MapFetcher::from(&[]);
        let handle = PostHandle::from_entry("posts", index_entry());
        assert!(handle.resolve(&fetcher).await.is_err());
    }
}
