use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::sort::SortField;

#[derive(Deserialize)]
pub struct Paths {
    pub page_template: PathBuf,
    pub output_file: PathBuf,
}

#[derive(Deserialize)]
pub struct Blog {
    /// Directory holding the post documents, trailing slash included
    /// ("site/posts/"). The index path is this directory plus the index
    /// file name.
    pub dir: String,
    pub index_file: String,
}

#[derive(Deserialize)]
pub struct List {
    pub element_id: String,
    #[serde(default)]
    pub sort_field: SortField,
    #[serde(default)]
    pub reverse: bool,
    pub max_posts: Option<usize>,
    pub tag: Option<String>,
}

#[derive(Deserialize)]
pub struct Latest {
    pub element_id: String,
    pub max_chars: Option<usize>,
    #[serde(default)]
    pub content_only: bool,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub blog: Blog,
    pub list: List,
    pub latest: Option<Latest>,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        page_template: parse_path(cfg.paths.page_template),
        output_file: parse_path(cfg.paths.output_file),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r##"
[paths]
page_template = "site/blog.html"
output_file = "out/blog.html"

[blog]
dir = "site/posts/"
index_file = "meta.json"

[list]
element_id = "posts"
sort_field = "created"
reverse = true
max_posts = 10

[latest]
element_id = "latest-post"
max_chars = 300
"##;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.blog.dir, "site/posts/");
        assert_eq!(cfg.list.sort_field, SortField::Created);
        assert!(cfg.list.reverse);
        assert_eq!(cfg.list.max_posts, Some(10));
        assert_eq!(cfg.list.tag, None);

        let latest = cfg.latest.unwrap();
        assert_eq!(latest.max_chars, Some(300));
        assert!(!latest.content_only);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_defaults() {
        let toml_str = r##"
[paths]
page_template = "blog.html"
output_file = "out.html"

[blog]
dir = "posts/"
index_file = "meta.json"

[list]
element_id = "posts"
"##;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.list.sort_field, SortField::Created);
        assert!(!cfg.list.reverse);
        assert_eq!(cfg.list.max_posts, None);
    }
}
