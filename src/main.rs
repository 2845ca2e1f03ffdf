use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{info, warn};

use postfeed::config::{read_config, Config};
use postfeed::fetch::FileFetcher;
use postfeed::logger::configure_logger;
use postfeed::page::{render_latest_post, render_post_list, write_into_element, ListOptions};

const CFG_FILE_NAME: &str = "postfeed.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

fn get_config_path() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    let cur_dir = env::current_dir().unwrap();

    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    if cur_dir.join(CFG_FILE_NAME).exists() {
        return Some(cur_dir.join(CFG_FILE_NAME));
    }

    let cfg_dir = dirs::config_dir().expect("Could not find user config dir");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = cfg_path.unwrap_or(match get_config_path() {
        None => return Err("Could not find postfeed configuration".to_string()),
        Some(x) => x,
    });

    println!("Reading config from {}", config_path.to_str().unwrap());
    match read_config(&config_path) {
        Ok(config) => Ok(config),
        Err(e) => Err(e.to_string()),
    }
}

async fn render_page(config: &Config) -> Result<String> {
    let template_path = &config.paths.page_template;
    let mut page = fs::read_to_string(template_path)
        .with_context(|| format!("Error reading page template {}", template_path.display()))?;

    let fetcher = FileFetcher;
    let blog = &config.blog;

    let options = ListOptions {
        sort_field: config.list.sort_field,
        reverse: config.list.reverse,
        max_posts: config.list.max_posts,
        tag: config.list.tag.clone(),
        ..Default::default()
    };
    let list_html = render_post_list(&fetcher, &blog.dir, &blog.index_file, &options).await
        .context("Error rendering post list")?;
    page = write_into_element(&page, &config.list.element_id, &list_html)?;
    info!("Rendered post list into #{}", config.list.element_id);

    if let Some(ref latest) = config.latest {
        let latest_html = render_latest_post(
            &fetcher, &blog.dir, &blog.index_file, latest.max_chars, latest.content_only).await
            .context("Error rendering latest post")?;
        page = write_into_element(&page, &latest.element_id, &latest_html)?;
        info!("Rendered latest post into #{}", latest.element_id);
    }

    Ok(page)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run postfeed --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting postfeed =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");

    let page = render_page(&config).await?;

    let output_file = &config.paths.output_file;
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_file, page)
        .with_context(|| format!("Error writing {}", output_file.display()))?;
    info!("Wrote {}", output_file.display());

    Ok(())
}
