// src/clients/news.rs

//! Campus news client.
//!
//! Fetches the campus news RSS feed and returns [`NewsItem`] records. The
//! feed is parsed with the HTML parser, which tolerates RSS markup; the one
//! quirk is that `<link>` is a void element in HTML, so an item's URL lands
//! in the text node following the empty link element.

use reqwest::blocking::Client;
use scraper::{ElementRef, Html};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::NewsItem;
use crate::utils::http::{create_client, fetch_document, parse_selector};
use crate::utils::{clean_text, resolve_url};

const NEWS_FEED_BASE: &str = "https://www.pitt.edu/pittwire/feeds/";
const DEFAULT_CATEGORY: &str = "news";

/// Client for the campus news feed.
pub struct NewsClient {
    client: Client,
}

impl NewsClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client with explicit settings.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    /// Fetch the main campus news feed.
    pub fn get_news(&self) -> Result<Vec<NewsItem>> {
        self.get_news_category(DEFAULT_CATEGORY)
    }

    /// Fetch one category's feed (the category names the feed path).
    pub fn get_news_category(&self, category: &str) -> Result<Vec<NewsItem>> {
        let feed_url = format!("{NEWS_FEED_BASE}{category}.rss");
        let document = fetch_document(&self.client, &feed_url, "news feed")?;
        parse_feed(&document, &feed_url)
    }
}

/// Fetch the main campus news feed with default settings.
pub fn get_news() -> Result<Vec<NewsItem>> {
    NewsClient::new()?.get_news()
}

/// Parse feed items; an item without a title is dropped.
fn parse_feed(document: &Html, feed_url: &str) -> Result<Vec<NewsItem>> {
    let item_sel = parse_selector("item")?;
    let title_sel = parse_selector("title")?;
    let link_sel = parse_selector("link")?;
    let date_sel = parse_selector("pubdate")?;
    let base = Url::parse(feed_url)?;

    let items: Vec<NewsItem> = document
        .select(&item_sel)
        .filter_map(|item| {
            let title = clean_text(
                &item
                    .select(&title_sel)
                    .next()?
                    .text()
                    .collect::<String>(),
            );
            if title.is_empty() {
                return None;
            }
            let link = item
                .select(&link_sel)
                .next()
                .and_then(|e| link_text(&e))
                .map(|raw| resolve_url(&base, &raw))
                .unwrap_or_default();
            let date = item
                .select(&date_sel)
                .next()
                .map(|e| clean_text(&e.text().collect::<String>()))
                .filter(|d| !d.is_empty());
            Some(NewsItem { title, link, date })
        })
        .collect();

    if items.is_empty() {
        return Err(Error::parse("news feed", "no items in feed"));
    }
    Ok(items)
}

/// Read a link's URL, falling back to the text node the HTML parser pushed
/// outside the void `<link>` element.
fn link_text(element: &ElementRef<'_>) -> Option<String> {
    let inner = clean_text(&element.text().collect::<String>());
    if !inner.is_empty() {
        return Some(inner);
    }
    let sibling = element.next_sibling()?;
    let text = sibling.value().as_text()?;
    let text = clean_text(text);
    if text.is_empty() { None } else { Some(text) }
}
