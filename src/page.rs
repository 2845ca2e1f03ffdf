use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use regex::Regex;
use spdlog::debug;

use crate::fetch::JsonFetcher;
use crate::html::{render_body, render_post};
use crate::post_index::PostIndex;
use crate::sort::SortField;
use crate::text_utils::{escape_html, truncate_at_space};

/// Options for assembling a post list. The tag filter and the post cap are
/// applied to the sorted handle sequence before any post body is fetched.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub sort_field: SortField,
    pub reverse: bool,
    pub max_posts: Option<usize>,
    pub tag: Option<String>,
    pub wrap_article: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            sort_field: SortField::Created,
            reverse: false,
            max_posts: None,
            tag: None,
            wrap_article: true,
        }
    }
}

/// Renders the whole post list as one HTML string. Posts are resolved and
/// rendered strictly one at a time, in sorted order, so a failure leaves
/// nothing half-written into the page.
pub async fn render_post_list(
    fetcher: &impl JsonFetcher,
    dir: &str,
    index_file: &str,
    options: &ListOptions,
) -> io::Result<String> {
    let index = PostIndex::new(index_file, dir);
    let handles = index.get_posts_sorted(fetcher, options.sort_field, options.reverse).await?;

    let selected = handles.iter()
        .filter(|handle| match &options.tag {
            None => true,
            Some(tag) => handle.tags.iter().any(|t| t == tag),
        })
        .take(options.max_posts.unwrap_or(usize::MAX));

    let mut html = String::new();
    for handle in selected {
        let post = handle.resolve(fetcher).await?;
        html.push_str(&render_post(&post, options.wrap_article));
    }

    debug!("Rendered post list from {}", index.index_path());
    Ok(html)
}

/// Renders the newest post. With a character limit the rendered string is
/// cut at the limit, backed off to the preceding space, and a Read More
/// link pointing at the post is appended.
pub async fn render_latest_post(
    fetcher: &impl JsonFetcher,
    dir: &str,
    index_file: &str,
    max_chars: Option<usize>,
    content_only: bool,
) -> io::Result<String> {
    let index = PostIndex::new(index_file, dir);
    let handles = index.get_posts_most_recent(fetcher).await?;
    let latest = handles.first().ok_or_else(|| io::Error::new(
        ErrorKind::InvalidData, format!("No posts in {}", index.index_path())))?;

    let post = latest.resolve(fetcher).await?;
    let mut html = if content_only {
        render_body(&post)
    } else {
        render_post(&post, true)
    };

    if let Some(max_chars) = max_chars {
        if let Some(truncated) = truncate_at_space(&html, max_chars) {
            let id = latest.id.strip_suffix(".json").unwrap_or(&latest.id);
            html = format!("{}<a href=\"blog.html?id={}\">Read More</a>", truncated, escape_html(id));
        }
    }

    Ok(html)
}

/// Replaces the inner content of the element carrying `id="element_id"`
/// with the given fragment and returns the rewritten page. The previous
/// content of the element is discarded.
pub fn write_into_element(page_html: &str, element_id: &str, fragment: &str) -> io::Result<String> {
    lazy_static! {
        static ref OPEN_TAG_REGEX: Regex = Regex::new(
            r#"<(\w+)([^>]*\bid="([^"]*)"[^>]*)>"#
        ).unwrap();
    }

    for caps in OPEN_TAG_REGEX.captures_iter(page_html) {
        if &caps[3] != element_id {
            continue;
        }
        let tag = caps.get(1).unwrap().as_str();
        let open = caps.get(0).unwrap();

        let content_start = open.end();
        let content_end = find_closing_tag(&page_html[content_start..], tag)
            .map(|offset| content_start + offset)
            .ok_or_else(|| io::Error::new(
                ErrorKind::InvalidInput,
                format!("Unclosed <{}> element with id {}", tag, element_id)))?;

        let mut page = String::with_capacity(page_html.len() + fragment.len());
        page.push_str(&page_html[..content_start]);
        page.push_str(fragment);
        page.push_str(&page_html[content_end..]);
        return Ok(page);
    }

    Err(io::Error::new(
        ErrorKind::InvalidInput, format!("No element with id {} in page", element_id)))
}

/// Byte offset of the `</tag>` that closes an already-open element,
/// counting nested elements of the same name.
fn find_closing_tag(html: &str, tag: &str) -> Option<usize> {
    let open_prefix = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let mut depth = 1;
    let mut pos = 0;
    loop {
        let rest = &html[pos..];
        let next_close = rest.find(close.as_str())?;

        // First genuine open before the close. "<p" must not match "<pre",
        // and a rejected longer-named tag must not hide a real one behind it.
        let mut next_open = None;
        let mut search = 0;
        while let Some(i) = rest[search..next_close].find(open_prefix.as_str()) {
            let idx = search + i;
            let after = &rest[idx + open_prefix.len()..];
            if after.starts_with(|c: char| !c.is_alphanumeric()) {
                next_open = Some(idx);
                break;
            }
            search = idx + open_prefix.len();
        }

        match next_open {
            Some(open_idx) => {
                depth += 1;
                pos += open_idx + open_prefix.len();
            }
            None => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + next_close);
                }
                pos += next_close + close.len();
            }
        }
    }
}
