//! Playlist population
//!
//! A playlist page lists its member videos as tile links. Single-video
//! playlists are linked straight to the video page, which has no tiles, so
//! in that case the playlist's own address is crawled as its only video.

use tracing::{info, instrument, warn};

use crate::crawler::address::RunContext;
use crate::crawler::config::{MissingTitlePolicy, SelectorConfig};
use crate::crawler::document::Document;
use crate::crawler::error::CrawlError;
use crate::crawler::fetch::{Fetcher, Throttle};
use crate::crawler::video::extract_video;
use crate::record::{NO_TIME_LABEL, PlaylistRecord};

/// A video entry read from a playlist page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTile {
    /// Absolute address of the video page
    pub address: String,
    /// Duration label following the tile, or "NA"
    pub time_label: String,
}

/// Read video tiles and their duration labels from a playlist page
pub fn parse_video_tiles(
    page: &impl Document,
    ctx: &RunContext,
    selectors: &SelectorConfig,
) -> Vec<VideoTile> {
    page.find_all(&selectors.tile_link)
        .into_iter()
        .filter_map(|tile| {
            let address = ctx.resolve(tile.attr("href")?);
            let time_label = page
                .find_after(&tile, &selectors.time_label)
                .map(|label| label.text().to_string())
                .unwrap_or_else(|| NO_TIME_LABEL.to_string());
            Some(VideoTile {
                address,
                time_label,
            })
        })
        .collect()
}

/// Fetch a playlist and attach the records of all its videos
///
/// A video without a title aborts the run. Under [`MissingTitlePolicy::Skip`]
/// it is left out instead, but a playlist whose every video was skipped
/// still fails, since a playlist always holds at least one video.
#[instrument(skip_all, fields(playlist = %playlist.title))]
pub async fn populate_playlist<T: Throttle>(
    fetcher: &Fetcher<T>,
    ctx: &RunContext,
    playlist: &mut PlaylistRecord,
    selectors: &SelectorConfig,
    missing_title: MissingTitlePolicy,
) -> Result<(), CrawlError> {
    info!("Getting videos for playlist: {}", playlist.title);

    let tiles = match fetcher.fetch(&playlist.address).await? {
        Some(page) => parse_video_tiles(&page, ctx, selectors),
        None => Vec::new(),
    };

    let tiles = if tiles.is_empty() {
        vec![VideoTile {
            address: playlist.address.clone(),
            time_label: NO_TIME_LABEL.to_string(),
        }]
    } else {
        tiles
    };

    let mut videos = Vec::with_capacity(tiles.len());
    let mut skipped = None;
    for tile in tiles {
        match extract_video(fetcher, &tile.address, selectors).await {
            Ok(mut video) => {
                info!("Processing video '{}'", video.title);
                video.time_label = tile.time_label;
                videos.push(video);
            }
            Err(CrawlError::MissingTitle(address))
                if missing_title == MissingTitlePolicy::Skip =>
            {
                warn!("Skipping video without a title: {}", address);
                skipped = Some(address);
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(address) = skipped.filter(|_| videos.is_empty()) {
        return Err(CrawlError::MissingTitle(address));
    }

    playlist.videos = videos;
    Ok(())
}
