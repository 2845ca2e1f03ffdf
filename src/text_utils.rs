use std::ops::Index;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses `YYYY-MM-DD` with an optional ` HH:MM:SS[.mmm]` suffix. Post
/// documents usually carry date-only timestamps, in which case midnight
/// is assumed.
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"(\d{4})-(\d{1,2})-(\d{1,2})( (\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d{1,3})?)?"
        ).unwrap();
    }
    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    // We are using the regex approach to make it more flexible
    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;

    let (h, mn, s) = if caps.get(4).is_some() {
        (to_u32(caps.index(5))?, to_u32(caps.index(6))?, to_u32(caps.index(7))?)
    } else {
        (0, 0, 0)
    };

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Date out of range in {}", buf))?;
    let time = NaiveTime::from_hms_opt(h, mn, s)
        .ok_or_else(|| format!("Time out of range in {}", buf))?;

    Ok(NaiveDateTime::new(date, time))
}

/// "January 20, 2022" - long month name, unpadded day. English only.
pub fn format_long_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%B %-d, %Y").to_string()
}

/// Entity-escapes text before it is embedded into markup. Post documents
/// are not trusted to be markup-free.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Cuts `text` down to at most `max_chars` characters, backing off to the
/// last space before the limit so no word is cut in half. Returns None when
/// the text already fits.
pub fn truncate_at_space(text: &str, max_chars: usize) -> Option<String> {
    let cut = match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return None,
    };

    let head = &text[..cut];
    let truncated = match head.rfind(' ') {
        Some(space_idx) => &head[..space_idx],
        None => head,
    };
    Some(truncated.to_string())
}
