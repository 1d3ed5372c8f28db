//! CSV export, one row per video

use std::io;

use crate::error::{Error, Result};
use crate::record::ChannelRecord;

pub const CSV_HEADERS: [&str; 11] = [
    "channel",
    "section",
    "playlist",
    "video",
    "link",
    "time",
    "views",
    "publication date",
    "likes",
    "dislikes",
    "description",
];

/// Write the header row and one row per video to `writer`
pub fn write_csv<W: io::Write>(channel: &ChannelRecord, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADERS)?;

    for (section, playlist, video) in channel.videos() {
        writer.write_record([
            channel.id.as_str(),
            section.title.as_str(),
            playlist.title.as_str(),
            video.title.as_str(),
            video.short_link.as_str(),
            video.time_label.as_str(),
            video.views.as_deref().unwrap_or_default(),
            video.publication_date.as_str(),
            video.likes.as_deref().unwrap_or_default(),
            video.dislikes.as_deref().unwrap_or_default(),
            video.description.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Render the CSV table as a string
pub fn to_csv(channel: &ChannelRecord) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(channel, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Other(format!("CSV is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::AddressScheme;
    use crate::record::{PlaylistRecord, SectionRecord, VideoRecord};

    fn channel() -> ChannelRecord {
        let mut playlist =
            PlaylistRecord::new("Basics", "https://www.youtube.com/playlist?list=PL1");
        playlist.videos = vec![
            VideoRecord {
                title: "Intro, part 1".to_string(),
                address: "https://www.youtube.com/watch?v=a".to_string(),
                short_link: "https://youtu.be/a".to_string(),
                time_label: "4:01".to_string(),
                views: Some("12345".to_string()),
                publication_date: "Mar 4, 2016".to_string(),
                likes: Some("10".to_string()),
                dislikes: Some("1".to_string()),
                description: "First line\nsecond line".to_string(),
            },
            VideoRecord {
                title: "Untimed".to_string(),
                address: "https://www.youtube.com/watch?v=b".to_string(),
                short_link: "https://www.youtube.com/watch?v=b".to_string(),
                time_label: "NA".to_string(),
                views: None,
                publication_date: String::new(),
                likes: None,
                dislikes: None,
                description: String::new(),
            },
        ];
        let mut section = SectionRecord::new("Talks", "https://www.youtube.com/user/x/playlists");
        section.playlists = vec![playlist];

        ChannelRecord {
            id: "x".to_string(),
            scheme: AddressScheme::User,
            sections: vec![section],
        }
    }

    #[test]
    fn test_csv_rows() {
        let csv = to_csv(&channel()).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let headers: Vec<_> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, CSV_HEADERS);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "Intro, part 1");
        assert_eq!(&rows[0][4], "https://youtu.be/a");
        assert_eq!(&rows[0][6], "12345");
        assert_eq!(&rows[0][10], "First line\nsecond line");

        assert_eq!(&rows[1][5], "NA");
        assert_eq!(&rows[1][6], "");
        assert_eq!(&rows[1][8], "");
    }
}
