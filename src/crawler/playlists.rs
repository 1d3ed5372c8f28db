//! Playlist enumeration for a section page

use tracing::{debug, info, instrument};

use crate::crawler::address::RunContext;
use crate::crawler::config::SelectorConfig;
use crate::crawler::document::Document;
use crate::crawler::error::CrawlError;
use crate::crawler::fetch::{Fetcher, Throttle};
use crate::record::{NO_PLAYLISTS_TITLE, PlaylistRecord, SectionRecord};

/// Auto-generated per-account playlist that is never crawled
const LIKED_VIDEOS_TITLE: &str = "Liked videos";

fn no_playlists(ctx: &RunContext) -> Vec<PlaylistRecord> {
    vec![PlaylistRecord::new(NO_PLAYLISTS_TITLE, ctx.videos_address())]
}

/// Extract playlist tiles from a section page
///
/// Falls back to a single "No Playlists" entry pointing at the channel's
/// video listing when the page lists nothing usable.
pub fn parse_playlists(
    page: &impl Document,
    ctx: &RunContext,
    selectors: &SelectorConfig,
) -> Vec<PlaylistRecord> {
    let playlists: Vec<PlaylistRecord> = page
        .find_all(&selectors.tile_link)
        .into_iter()
        .filter(|tile| tile.text() != LIKED_VIDEOS_TITLE)
        .filter_map(|tile| {
            let href = tile.attr("href")?;
            Some(PlaylistRecord::new(tile.text(), ctx.resolve(href)))
        })
        .collect();

    if playlists.is_empty() {
        debug!("No playlists found, using the channel video listing");
        return no_playlists(ctx);
    }
    playlists
}

/// Fetch a section page and list its playlists
#[instrument(skip_all, fields(section = %section.title))]
pub async fn enumerate_playlists<T: Throttle>(
    fetcher: &Fetcher<T>,
    ctx: &RunContext,
    section: &SectionRecord,
    selectors: &SelectorConfig,
) -> Result<Vec<PlaylistRecord>, CrawlError> {
    info!("Getting playlists for section: {}", section.title);

    let playlists = match fetcher.fetch(&section.address).await? {
        Some(page) => parse_playlists(&page, ctx, selectors),
        None => {
            debug!("Section page absent: {}", section.address);
            no_playlists(ctx)
        }
    };

    debug!("Found {} playlists", playlists.len());
    Ok(playlists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::address::AddressScheme;
    use crate::crawler::document::HtmlPage;
    use crate::crawler::fetch::NoDelay;
    use crate::crawler::CrawlerConfig;
    use mockito::Server;

    fn ctx() -> RunContext {
        RunContext::new("https://www.youtube.com", "somechannel", AddressScheme::User)
    }

    #[test]
    fn test_parse_playlists_skips_liked_videos() {
        let page = HtmlPage::parse(
            r#"<html><body>
            <a class="yt-uix-tile-link" href="/playlist?list=PL1">Getting Started</a>
            <a class="yt-uix-tile-link" href="/playlist?list=LL">Liked videos</a>
            <a class="yt-uix-tile-link">No address</a>
            <a class="yt-uix-tile-link" href="https://www.youtube.com/watch?v=solo">Solo</a>
            <a href="/playlist?list=PL9">Not a tile</a>
            </body></html>"#,
        );

        let playlists = parse_playlists(&page, &ctx(), &SelectorConfig::default());
        let found: Vec<_> = playlists
            .iter()
            .map(|p| (p.title.as_str(), p.address.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (
                    "Getting Started",
                    "https://www.youtube.com/playlist?list=PL1"
                ),
                ("Solo", "https://www.youtube.com/watch?v=solo"),
            ]
        );
    }

    #[test]
    fn test_only_liked_videos_falls_back() {
        let page = HtmlPage::parse(
            r#"<html><body><a class="yt-uix-tile-link" href="/playlist?list=LL">Liked videos</a></body></html>"#,
        );
        let playlists = parse_playlists(&page, &ctx(), &SelectorConfig::default());
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].title, "No Playlists");
        assert_eq!(
            playlists[0].address,
            "https://www.youtube.com/user/somechannel/videos"
        );
    }

    #[tokio::test]
    async fn test_absent_section_falls_back() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/section")
            .with_status(404)
            .create_async()
            .await;

        let config = CrawlerConfig::builder().base_url(server.url()).build();
        let fetcher = Fetcher::with_throttle(&config, NoDelay).unwrap();
        let ctx = RunContext::new(&server.url(), "somechannel", AddressScheme::Channel);
        let section = SectionRecord::new("Talks", format!("{}/section", server.url()));

        let playlists = enumerate_playlists(&fetcher, &ctx, &section, &config.selectors)
            .await
            .unwrap();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].title, "No Playlists");
        assert_eq!(
            playlists[0].address,
            format!("{}/channel/somechannel/videos", server.url())
        );
    }
}
