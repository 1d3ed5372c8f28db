//! HTML table of contents

use crate::record::{ChannelRecord, NO_TIME_LABEL};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn tag(name: &str, content: &str) -> String {
    format!("<{0}>{1}</{0}>", name, content)
}

fn link(text: &str, address: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(address), escape(text))
}

/// Render the channel as nested headings and ordered lists
pub fn render_html(channel: &ChannelRecord) -> String {
    let title = format!("YouTube Channel {}", channel.id);

    let mut parts = vec![tag("h1", &escape(&title))];
    for section in &channel.sections {
        parts.push(tag("h2", &link(&section.title, &section.address)));
        for playlist in &section.playlists {
            parts.push(tag("h3", &link(&playlist.title, &playlist.address)));
            if playlist.videos.is_empty() {
                parts.push("<p>Empty Playlist</p>".to_string());
                continue;
            }

            parts.push("<ol>".to_string());
            for video in &playlist.videos {
                let time = if video.time_label == NO_TIME_LABEL {
                    String::new()
                } else {
                    format!(" ({})", escape(&video.time_label))
                };
                parts.push(tag(
                    "li",
                    &format!("{}{}", link(&video.title, &video.short_link), time),
                ));
            }
            parts.push("</ol>".to_string());
        }
    }

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"><title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>",
        escape(&channel.id),
        parts.join("\n")
    )
}
