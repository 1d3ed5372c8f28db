//! # Crawl Record Tree
//!
//! The nested result of a channel crawl: a [`ChannelRecord`] owns its
//! sections, each [`SectionRecord`] owns its playlists and each
//! [`PlaylistRecord`] owns its videos. Sequences keep the order in which the
//! crawler discovered their entries.
//!
//! Serialized key names match the snapshot format written by
//! [`crate::export::snapshot`], so a saved crawl can be re-rendered without
//! fetching anything.

use serde::{Deserialize, Serialize};

use crate::crawler::AddressScheme;

/// Title of the section synthesized when a channel exposes no sections
pub const NO_SECTIONS_TITLE: &str = "no sections";

/// Title of the playlist synthesized when a section exposes no playlists
pub const NO_PLAYLISTS_TITLE: &str = "No Playlists";

/// Time label used when a video's duration could not be found
pub const NO_TIME_LABEL: &str = "NA";

/// Root of a crawl result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Channel identifier as given on the command line
    #[serde(rename = "channel")]
    pub id: String,

    /// Addressing scheme the channel resolved under
    pub scheme: AddressScheme,

    /// Sections in discovery order
    pub sections: Vec<SectionRecord>,
}

/// A grouping of playlists on the channel's playlist index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub title: String,

    #[serde(rename = "link")]
    pub address: String,

    #[serde(default)]
    pub playlists: Vec<PlaylistRecord>,
}

/// An ordered grouping of videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub title: String,

    #[serde(rename = "link")]
    pub address: String,

    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

/// Metadata extracted from a single video page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Page title without the site suffix
    pub title: String,

    /// Address the video page was fetched from
    #[serde(rename = "link")]
    pub address: String,

    /// `https://youtu.be/<id>` when the page exposes its id, otherwise `address`
    pub short_link: String,

    /// Duration label from the playlist listing, or [`NO_TIME_LABEL`]
    #[serde(rename = "time")]
    pub time_label: String,

    /// View count reduced to its digits
    pub views: Option<String>,

    /// Empty when the page has no publication label
    pub publication_date: String,

    pub likes: Option<String>,

    pub dislikes: Option<String>,

    /// Empty when the page has no description
    pub description: String,
}

impl SectionRecord {
    /// Create a section with no playlists attached yet
    pub fn new(title: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            address: address.into(),
            playlists: Vec::new(),
        }
    }

    /// Whether this is the stand-in for a channel without sections
    pub fn is_synthetic(&self) -> bool {
        self.title == NO_SECTIONS_TITLE
    }
}

impl PlaylistRecord {
    /// Create a playlist with no videos attached yet
    pub fn new(title: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            address: address.into(),
            videos: Vec::new(),
        }
    }

    /// Whether this is the stand-in for a section without playlists
    pub fn is_synthetic(&self) -> bool {
        self.title == NO_PLAYLISTS_TITLE
    }
}

impl ChannelRecord {
    /// Iterate every video together with the section and playlist holding it
    pub fn videos(&self) -> impl Iterator<Item = (&SectionRecord, &PlaylistRecord, &VideoRecord)> {
        self.sections.iter().flat_map(|section| {
            section.playlists.iter().flat_map(move |playlist| {
                playlist
                    .videos
                    .iter()
                    .map(move |video| (section, playlist, video))
            })
        })
    }

    /// Total number of videos across all sections
    pub fn video_count(&self) -> usize {
        self.videos().count()
    }
}
