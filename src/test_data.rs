#![cfg(test)]

use crate::post::{Post, PostDoc};
use crate::post_handle::{IndexEntry, PostHandle};

pub const INDEX_JSON: &str = r#"{
  "posts": [
    {"title": "T0", "path": "a.json", "created": "2022-01-20", "updated": "2022-01-21", "tags": "x,y"},
    {"title": "T1", "path": "b.json", "created": "2022-01-22", "updated": "2022-01-22", "tags": "x"},
    {"title": "T2", "path": "c.json", "created": "2022-01-21", "updated": "2022-01-21", "tags": "z"}
  ]
}"#;

pub const POST_JSON: &str = r#"{
  "title": "T0",
  "created": "2022-01-20",
  "updated": "2022-01-21",
  "author": "Au",
  "tags": "x,y",
  "content": "L1\nL2"
}"#;

pub const POST_JSON_B: &str = r#"{
  "title": "T1",
  "created": "2022-01-22",
  "updated": "2022-01-22",
  "author": "Au",
  "tags": "x",
  "content": "B1"
}"#;

pub const POST_JSON_C: &str = r#"{
  "title": "T2",
  "created": "2022-01-21",
  "updated": "2022-01-21",
  "author": "Au",
  "tags": "z",
  "content": "C1"
}"#;

pub fn post_doc() -> PostDoc {
    PostDoc {
        title: "T0".to_string(),
        created: "2022-01-20".to_string(),
        updated: "2022-01-21".to_string(),
        author: "Au".to_string(),
        tags: "x,y".to_string(),
        content: "L1\nL2".to_string(),
    }
}

pub fn post_with_dates(created: &str, updated: &str) -> Post {
    let mut doc = post_doc();
    doc.created = created.to_string();
    doc.updated = updated.to_string();
    Post::from_doc(doc).unwrap()
}

pub fn index_entry() -> IndexEntry {
    IndexEntry {
        title: "T0".to_string(),
        path: "a.json".to_string(),
        created: "2022-01-20".to_string(),
        updated: "2022-01-21".to_string(),
        tags: "x,y".to_string(),
    }
}

pub fn handles_with_created(created: &[&str]) -> Vec<PostHandle> {
    created.iter().enumerate()
        .map(|(i, c)| {
            let mut entry = index_entry();
            entry.title = format!("T{}", i);
            entry.path = format!("p{}.json", i);
            entry.created = c.to_string();
            entry.updated = c.to_string();
            PostHandle::from_entry("posts", entry)
        })
        .collect()
}
