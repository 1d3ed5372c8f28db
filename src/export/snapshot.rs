//! JSON snapshot of a crawl
//!
//! Keys are written in sorted order with four-space indentation so snapshots
//! of unchanged channels compare equal byte for byte.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::record::ChannelRecord;

/// Serialize the record tree
pub fn to_snapshot(channel: &ChannelRecord) -> Result<String> {
    // Going through `Value` sorts object keys.
    let value = serde_json::to_value(channel)?;

    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| Error::Other(format!("Snapshot is not UTF-8: {}", e)))
}

/// Parse a snapshot written by [`to_snapshot`]
pub fn from_snapshot(json: &str) -> Result<ChannelRecord> {
    Ok(serde_json::from_str(json)?)
}
