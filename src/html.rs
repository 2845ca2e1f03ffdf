use crate::post::Post;
use crate::text_utils::{escape_html, format_long_date};

// HTML fragment builders for a loaded post. All text coming out of a post
// document is entity-escaped here; nothing upstream is trusted.

pub fn render_title(post: &Post) -> String {
    format!("<h3>{}</h3>", escape_html(&post.title))
}

/// One timestamp paragraph for the creation date, and a second one only
/// when the updated instant actually differs from the created instant.
/// The instants are compared, not their formatted strings.
pub fn render_timestamp(post: &Post) -> String {
    let mut html = format!(
        "<p class=\"timestamp\">Posted by {} on {}</p>",
        escape_html(&post.author),
        format_long_date(&post.created),
    );
    if post.updated != post.created {
        html.push_str(&format!(
            "<p class=\"timestamp\">Updated on {}</p>",
            format_long_date(&post.updated),
        ));
    }
    html
}

/// Newlines become paragraph boundaries, each line wrapped in its own
/// paragraph, and the whole body wrapped in one more enclosing paragraph.
/// The doubled outer tag is the established output shape of the flat-file
/// blogs this renders; downstream styling relies on it.
pub fn render_body(post: &Post) -> String {
    let lines = escape_html(&post.content).replace('\n', "</p><p>");
    format!("<p><p>{}</p></p>", lines)
}

pub fn render_post(post: &Post, wrap_article: bool) -> String {
    let html = format!("{}{}{}", render_title(post), render_timestamp(post), render_body(post));
    if wrap_article {
        format!("<article>{}</article>", html)
    } else {
        html
    }
}
