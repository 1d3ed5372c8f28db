//! Channel topology discovery
//!
//! Works out whether a channel lives under the user or the channel scheme and
//! lists the sections shown on its playlist index.

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::crawler::address::{AddressScheme, RunContext};
use crate::crawler::config::SelectorConfig;
use crate::crawler::document::{Document, HtmlPage};
use crate::crawler::error::CrawlError;
use crate::crawler::fetch::{Fetcher, Throttle};
use crate::record::{NO_SECTIONS_TITLE, SectionRecord};

/// Text the site shows in place of an unknown channel
pub const MISSING_CHANNEL_MARKER: &str = "This channel does not exist.";

/// Marker of the "all playlists" control link, which is not a section
const CONTROL_LINK_MARKER: &str = "shelf_id=0";

/// Whether a fetched playlist index actually belongs to a channel
fn is_channel_page(page: Option<HtmlPage>) -> Option<HtmlPage> {
    page.filter(|page| !page.contains_text(MISSING_CHANNEL_MARKER))
}

/// Fetch the channel's playlist index, falling back to the channel scheme
///
/// Returns the run context for whichever scheme answered together with the
/// index page.
#[instrument(skip(fetcher, ctx), fields(channel = %ctx.channel_id()))]
pub async fn resolve_channel<T: Throttle>(
    fetcher: &Fetcher<T>,
    ctx: &RunContext,
) -> Result<(RunContext, HtmlPage), CrawlError> {
    let user = ctx.with_scheme(AddressScheme::User);
    if let Some(page) = is_channel_page(fetcher.fetch(&user.playlists_address()).await?) {
        info!("Channel resolved under the user scheme");
        return Ok((user, page));
    }

    debug!("User scheme failed, trying channel scheme");
    let channel = ctx.with_scheme(AddressScheme::Channel);
    match is_channel_page(fetcher.fetch(&channel.playlists_address()).await?) {
        Some(page) => {
            info!("Channel resolved under the channel scheme");
            Ok((channel, page))
        }
        None => Err(CrawlError::NotFound(ctx.channel_id().to_string())),
    }
}

/// Extract section links from a playlist index
///
/// A section link points at `<id>/playlists`, carries a label element and is
/// not the `shelf_id=0` control link. When nothing qualifies a single
/// "no sections" entry pointing at the aggregate playlist listing is
/// returned instead.
pub fn parse_sections(
    page: &impl Document,
    ctx: &RunContext,
    selectors: &SelectorConfig,
) -> Result<Vec<SectionRecord>, CrawlError> {
    let pattern = Regex::new(&format!("{}/playlists", regex::escape(ctx.channel_id())))
        .map_err(|e| CrawlError::Other(format!("Failed to build section pattern: {}", e)))?;

    let mut sections: Vec<SectionRecord> = page
        .find_all(&selectors.section_link)
        .into_iter()
        .filter_map(|link| {
            let href = link.attr("href")?;
            if !pattern.is_match(href) || href.contains(CONTROL_LINK_MARKER) {
                return None;
            }
            page.find_within(&link, &selectors.section_label)?;
            Some(SectionRecord::new(link.text().trim(), ctx.resolve(href)))
        })
        .collect();

    if sections.is_empty() {
        debug!("No sections found, using the aggregate playlist listing");
        sections.push(SectionRecord::new(NO_SECTIONS_TITLE, ctx.playlists_address()));
    }

    Ok(sections)
}

/// Resolve the channel and list its sections
pub async fn discover_sections<T: Throttle>(
    fetcher: &Fetcher<T>,
    ctx: &RunContext,
    selectors: &SelectorConfig,
) -> Result<(RunContext, Vec<SectionRecord>), CrawlError> {
    let (ctx, page) = resolve_channel(fetcher, ctx).await?;
    let sections = parse_sections(&page, &ctx, selectors)?;
    info!("Found {} sections", sections.len());
    Ok((ctx, sections))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.youtube.com";

    fn ctx(scheme: AddressScheme) -> RunContext {
        RunContext::new(BASE, "somechannel", scheme)
    }

    #[test]
    fn test_parse_sections_filters_links() {
        let page = HtmlPage::parse(
            r#"<html><body>
            <a href="/user/somechannel/playlists?shelf_id=0&amp;view=1"><span>All playlists</span></a>
            <a href="/user/somechannel/playlists?shelf_id=3"><span> Talks </span></a>
            <a href="/user/somechannel/playlists?shelf_id=4">Bare item</a>
            <a href="/user/otherchannel/playlists?shelf_id=5"><span>Elsewhere</span></a>
            <a href="https://www.youtube.com/user/somechannel/playlists?shelf_id=6"><span>Tutorials</span></a>
            <a href="/user/somechannel/playlists?shelf_id=3"><span>Talks</span></a>
            </body></html>"#,
        );

        let sections =
            parse_sections(&page, &ctx(AddressScheme::User), &SelectorConfig::default()).unwrap();
        let found: Vec<_> = sections
            .iter()
            .map(|s| (s.title.as_str(), s.address.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (
                    "Talks",
                    "https://www.youtube.com/user/somechannel/playlists?shelf_id=3"
                ),
                (
                    "Tutorials",
                    "https://www.youtube.com/user/somechannel/playlists?shelf_id=6"
                ),
                (
                    "Talks",
                    "https://www.youtube.com/user/somechannel/playlists?shelf_id=3"
                ),
            ]
        );
        assert!(sections.iter().all(|s| s.playlists.is_empty()));
    }

    #[test]
    fn test_parse_sections_synthesizes_no_sections() {
        let page = HtmlPage::parse("<html><body><p>Nothing here</p></body></html>");
        let sections =
            parse_sections(&page, &ctx(AddressScheme::Channel), &SelectorConfig::default())
                .unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "no sections");
        assert_eq!(
            sections[0].address,
            "https://www.youtube.com/channel/somechannel/playlists"
        );
    }

    #[test]
    fn test_channel_id_matches_literally() {
        let ctx = RunContext::new(BASE, "a.b", AddressScheme::User);
        let page = HtmlPage::parse(
            r#"<html><body>
            <a href="/user/axb/playlists?shelf_id=1"><span>Wrong</span></a>
            <a href="/user/a.b/playlists?shelf_id=2"><span>Right</span></a>
            </body></html>"#,
        );
        let sections = parse_sections(&page, &ctx, &SelectorConfig::default()).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Right");
    }
}
