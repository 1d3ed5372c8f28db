//! Video page extraction
//!
//! Only the title is mandatory. Every other field is looked up on its own
//! and left unset or empty when the page does not carry it.

use tracing::{debug, instrument};

use crate::crawler::config::SelectorConfig;
use crate::crawler::document::Document;
use crate::crawler::error::CrawlError;
use crate::crawler::fetch::{Fetcher, Throttle};
use crate::record::{NO_TIME_LABEL, VideoRecord};

/// Suffix the site appends to every page title
const TITLE_SUFFIX: &str = " - YouTube";

/// Label preceding the publication date
const PUBLISHED_PREFIX: &str = "Published on ";

/// Base of canonical short links
const SHORT_LINK_BASE: &str = "https://youtu.be/";

/// Trim a page title and drop the site suffix
pub fn strip_title_suffix(title: &str) -> &str {
    let title = title.trim();
    title.strip_suffix(TITLE_SUFFIX).unwrap_or(title)
}

/// Keep only the ASCII digits of a count label
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn button_label(
    page: &impl Document,
    button_selector: &str,
    label_selector: &str,
) -> Option<String> {
    let button = page.find_single(button_selector)?;
    page.find_within(&button, label_selector)
        .map(|label| label.text().to_string())
}

/// Build a video record from an already fetched page
///
/// The time label is set to "NA"; callers that know the duration from a
/// playlist listing overwrite it.
pub fn extract_fields(
    page: &impl Document,
    address: &str,
    selectors: &SelectorConfig,
) -> Result<VideoRecord, CrawlError> {
    let title = page
        .find_single(&selectors.video_title)
        .map(|element| strip_title_suffix(element.text()).to_string())
        .ok_or_else(|| CrawlError::MissingTitle(address.to_string()))?;

    let views = page
        .find_single(&selectors.view_count)
        .map(|element| digits_only(element.text()));

    let publication_date = page
        .find_single(&selectors.publication_date)
        .map(|element| {
            let text = element.text();
            text.strip_prefix(PUBLISHED_PREFIX).unwrap_or(text).to_string()
        })
        .unwrap_or_default();

    let description = page
        .find_single(&selectors.description)
        .map(|element| element.text().to_string())
        .unwrap_or_default();

    let short_link = page
        .find_single(&selectors.video_id)
        .and_then(|element| element.attr("content").map(str::to_string))
        .filter(|id| !id.is_empty())
        .map(|id| format!("{}{}", SHORT_LINK_BASE, id))
        .unwrap_or_else(|| address.to_string());

    let likes = button_label(page, &selectors.like_button, &selectors.button_label);
    let dislikes = button_label(page, &selectors.dislike_button, &selectors.button_label);

    Ok(VideoRecord {
        title,
        address: address.to_string(),
        short_link,
        time_label: NO_TIME_LABEL.to_string(),
        views,
        publication_date,
        likes,
        dislikes,
        description,
    })
}

/// Fetch a video page and extract its record
///
/// An absent page is reported the same way as a page without a title.
#[instrument(skip(fetcher, selectors), level = "debug")]
pub async fn extract_video<T: Throttle>(
    fetcher: &Fetcher<T>,
    address: &str,
    selectors: &SelectorConfig,
) -> Result<VideoRecord, CrawlError> {
    let page = fetcher
        .fetch(address)
        .await?
        .ok_or_else(|| CrawlError::MissingTitle(address.to_string()))?;

    let video = extract_fields(&page, address, selectors)?;
    debug!("Processed video '{}'", video.title);
    Ok(video)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::document::HtmlPage;

    const ADDRESS: &str = "https://www.youtube.com/watch?v=abc123";

    const FULL_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Example Video - YouTube</title>
  <meta itemprop="videoId" content="abc123">
</head>
<body>
  <div class="watch-view-count">12,345 views</div>
  <strong class="watch-time-text">Published on Mar 4, 2016</strong>
  <div id="watch-description-text">A walk through the example.</div>
  <button class="yt-uix-button like-button-renderer-like-button"><span class="yt-uix-button-content">1,024</span></button>
  <button class="yt-uix-button like-button-renderer-dislike-button"><span class="yt-uix-button-content">12</span></button>
</body>
</html>"#;

    #[test]
    fn test_strip_title_suffix() {
        assert_eq!(strip_title_suffix("Example Video - YouTube"), "Example Video");
        assert_eq!(strip_title_suffix("Example Video"), "Example Video");
        assert_eq!(strip_title_suffix("  Padded - YouTube \n"), "Padded");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("12,345 views"), "12345");
        assert_eq!(digits_only("No views"), "");
    }

    #[test]
    fn test_extract_all_fields() {
        let page = HtmlPage::parse(FULL_PAGE);
        let video = extract_fields(&page, ADDRESS, &SelectorConfig::default()).unwrap();

        assert_eq!(video.title, "Example Video");
        assert_eq!(video.address, ADDRESS);
        assert_eq!(video.short_link, "https://youtu.be/abc123");
        assert_eq!(video.time_label, "NA");
        assert_eq!(video.views.as_deref(), Some("12345"));
        assert_eq!(video.publication_date, "Mar 4, 2016");
        assert_eq!(video.description, "A walk through the example.");
        assert_eq!(video.likes.as_deref(), Some("1,024"));
        assert_eq!(video.dislikes.as_deref(), Some("12"));
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let page = HtmlPage::parse(
            r#"<html><head><title>Bare</title></head><body>
            <button class="like-button-renderer-like-button">no label</button>
            </body></html>"#,
        );
        let video = extract_fields(&page, ADDRESS, &SelectorConfig::default()).unwrap();

        assert_eq!(video.title, "Bare");
        assert_eq!(video.short_link, ADDRESS);
        assert_eq!(video.views, None);
        assert_eq!(video.publication_date, "");
        assert_eq!(video.description, "");
        assert_eq!(video.likes, None);
        assert_eq!(video.dislikes, None);
    }

    #[test]
    fn test_date_without_label_is_kept() {
        let page = HtmlPage::parse(
            r#"<html><head><title>Live</title></head><body>
            <strong class="watch-time-text">Streamed live on Jan 1, 2017</strong>
            </body></html>"#,
        );
        let video = extract_fields(&page, ADDRESS, &SelectorConfig::default()).unwrap();
        assert_eq!(video.publication_date, "Streamed live on Jan 1, 2017");
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let page = HtmlPage::parse(
            r#"<html><body><div class="watch-view-count">5 views</div></body></html>"#,
        );
        let result = extract_fields(&page, ADDRESS, &SelectorConfig::default());
        assert!(matches!(result, Err(CrawlError::MissingTitle(ref a)) if a == ADDRESS));
    }
}
