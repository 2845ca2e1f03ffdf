use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::ErrorKind;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::text_utils::parse_date_time;

/// Wire form of a post document. Decoding fails with one error if any
/// required key is missing, before any field is touched.
#[derive(Deserialize)]
pub struct PostDoc {
    pub title: String,
    pub created: String,
    pub updated: String,
    pub author: String,
    pub tags: String,
    pub content: String,
}

/// A fully loaded blog post. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub author: String,
    pub tags: Vec<String>,
    pub content: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "title={}\ncreated={}\nupdated={}\nauthor={}\ntags={}",
               self.title,
               self.created,
               self.updated,
               self.author,
               self.tags.join(","),
        )
    }
}

/// Example of post document
/// ```json
/// {
///   "title": "What I learned after 20+ years of software development",
///   "created": "2022-04-02",
///   "updated": "2022-04-02",
///   "author": "thiago",
///   "tags": "software,career",
///   "content": "How to be a great software engineer?\nSomeone asked me..."
/// }
/// ```
impl Post {
    pub fn from_doc(doc: PostDoc) -> io::Result<Post> {
        let created = match parse_date_time(&doc.created) {
            Ok(d) => d,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidData, format!("{} - post={}", e, doc.title))),
        };
        let updated = match parse_date_time(&doc.updated) {
            Ok(d) => d,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidData, format!("{} - post={}", e, doc.title))),
        };

        Ok(Post {
            title: doc.title,
            created,
            updated,
            author: doc.author,
            tags: split_tags(&doc.tags),
            content: doc.content,
        })
    }
}

/// Tags come comma-joined. Split only - surrounding whitespace stays part
/// of the tag, matching the flat file convention ("a, b" has the tag " b").
pub fn split_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(',')
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::test_data::post_doc;

    use super::*;

    #[test]
    fn test_from_doc_round_trip() {
        let post = Post::from_doc(post_doc()).unwrap();
        assert_eq!(post.title, "T0");
        assert_eq!(post.author, "Au");
        assert_eq!(post.content, "L1\nL2");
        assert_eq!(post.created, parse_date_time("2022-01-20").unwrap());
        assert_eq!(post.updated, parse_date_time("2022-01-21").unwrap());
        assert_eq!(post.tags, ["x", "y"]);
    }

    #[test]
    fn test_tags_keep_whitespace() {
        assert_eq!(split_tags("a,b, c"), ["a", "b", " c"]);
        assert_eq!(split_tags("a, b"), ["a", " b"]);
        assert_eq!(split_tags(""), [""]);
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let mut doc = post_doc();
        doc.created = "soon".to_string();
        let err = Post::from_doc(doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("T0"));
    }

    #[test]
    fn test_equality_is_field_for_field() {
        let a = Post::from_doc(post_doc()).unwrap();
        let b = Post::from_doc(post_doc()).unwrap();
        assert_eq!(a, b);

        let mut c = Post::from_doc(post_doc()).unwrap();
        c.tags = vec!["x".to_string(), " y".to_string()];
        assert_ne!(a, c);

        let mut d = Post::from_doc(post_doc()).unwrap();
        d.updated = parse_date_time("2023-01-01").unwrap();
        assert_ne!(a, d);
    }

    #[test]
    fn test_display_lists_header_fields() {
        let post = Post::from_doc(post_doc()).unwrap();
        let text = format!("{}", post);
        assert!(text.contains("title=T0"));
        assert!(text.contains("author=Au"));
        assert!(text.contains("tags=x,y"));
    }
}
