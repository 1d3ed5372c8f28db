//! # Output Formats
//!
//! Read-only renderings of a finished [`ChannelRecord`](crate::record::ChannelRecord):
//!
//! - `table`: one CSV row per video for spreadsheets and databases
//! - `toc`: an HTML table of contents linking every section, playlist and video
//! - `snapshot`: the full tree as JSON, reloadable without crawling again

pub mod snapshot;
pub mod table;
pub mod toc;

pub use snapshot::{from_snapshot, to_snapshot};
pub use table::{CSV_HEADERS, to_csv, write_csv};
pub use toc::render_html;
