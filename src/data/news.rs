//! Google News headline client
//!
//! Pulls the country-level RSS feed and keeps the first few item titles for
//! the headline panel.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_with_headers, FetchError};

/// URL template for the RSS feed; `{country}` is a two-letter country code.
const HEADLINES_URL: &str = "https://news.google.com/news?ned={country}&output=rss";

/// Headlines shown on the mirror.
pub const MAX_HEADLINES: usize = 5;

/// Top headlines for one country feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headlines {
    /// Country code the feed was requested for
    pub country: String,
    /// Item titles, newest first, at most [`MAX_HEADLINES`]
    pub titles: Vec<String>,
}

/// Client for the Google News RSS feed
#[derive(Debug, Clone, Default)]
pub struct NewsClient {
    client: Client,
}

impl NewsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the top headlines for a country code.
    pub async fn fetch_headlines(&self, country: &str) -> Result<Headlines, FetchError> {
        let url = HEADLINES_URL.replace("{country}", country);
        let body = get_with_headers(&self.client, &url).send().await?.bytes().await?;
        let channel = rss::Channel::read_from(&body[..])?;
        Ok(shape_channel(country, &channel))
    }
}

/// Keeps the first [`MAX_HEADLINES`] titled items of the channel.
fn shape_channel(country: &str, channel: &rss::Channel) -> Headlines {
    let titles = channel
        .items()
        .iter()
        .filter_map(|item| item.title().map(str::to_string))
        .take(MAX_HEADLINES)
        .collect();
    Headlines {
        country: country.to_string(),
        titles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(titles: &[&str]) -> rss::Channel {
        let items = titles
            .iter()
            .map(|t| format!("<item><title>{}</title></item>", t))
            .collect::<String>();
        let xml = format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Top Stories</title><link>http://example.com</link><description>d</description>{}</channel></rss>"#,
            items
        );
        rss::Channel::read_from(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_shape_keeps_at_most_five_titles() {
        let channel = feed(&["a", "b", "c", "d", "e", "f", "g"]);
        let headlines = shape_channel("us", &channel);
        assert_eq!(headlines.titles.len(), MAX_HEADLINES);
        assert_eq!(headlines.titles[0], "a");
        assert_eq!(headlines.titles[4], "e");
    }

    #[test]
    fn test_shape_short_feed_keeps_everything() {
        let channel = feed(&["only", "two"]);
        let headlines = shape_channel("us", &channel);
        assert_eq!(headlines.titles, vec!["only", "two"]);
    }

    #[test]
    fn test_shape_empty_feed_yields_no_titles() {
        let channel = feed(&[]);
        let headlines = shape_channel("us", &channel);
        assert!(headlines.titles.is_empty());
    }

    #[test]
    fn test_untitled_items_are_skipped() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title><link>l</link><description>d</description><item><title>kept</title></item><item><link>http://example.com/untitled</link></item></channel></rss>"#;
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let headlines = shape_channel("us", &channel);
        assert_eq!(headlines.titles, vec!["kept"]);
    }

    #[test]
    fn test_garbage_body_is_a_feed_error() {
        let result = rss::Channel::read_from(&b"not xml at all"[..]).map_err(FetchError::from);
        assert!(matches!(result, Err(FetchError::Feed(_))));
    }
}
