//! Vorbis-comment serialization for the tag header packet
//!
//! Block layout: u32-LE vendor length, vendor string, u32-LE tag count,
//! then one `NAME=value` entry per tag, each preceded by its u32-LE byte
//! length, optionally closed by a 0x01 framing byte. The whole block is
//! assembled in memory; the tag count is known before any byte is
//! written, so nothing is ever patched after the fact.

use crate::tags::StreamTags;

/// Default vendor string when the tag set does not override it
fn default_vendor() -> String {
    format!("{}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Collect the `NAME=value` entries present in the tag set
fn entries(tags: &StreamTags) -> Vec<String> {
    let named: [(&str, &Option<String>); 8] = [
        ("ARTIST", &tags.artist),
        ("TITLE", &tags.title),
        ("ALBUM", &tags.album),
        ("ALBUMARTIST", &tags.album_artist),
        ("GENRE", &tags.genre),
        ("COPYRIGHT", &tags.copyright),
        ("TRACKNUMBER", &tags.track_number),
        ("COMMENT", &tags.comment),
    ];

    let mut out = Vec::new();
    for (name, value) in named {
        if let Some(value) = value {
            out.push(format!("{}={}", name, value));
        }
    }
    if let Some(date) = &tags.date {
        out.push(format!("DATE={}", date));
    }
    out
}

/// Serialize a tag set into a comment block
///
/// `framing` appends the trailing 0x01 byte some container variants
/// require.
pub fn comment_block(tags: &StreamTags, framing: bool) -> Vec<u8> {
    let vendor = tags.vendor.clone().unwrap_or_else(default_vendor);
    let entries = entries(tags);

    let mut size = 4 + vendor.len() + 4;
    for entry in &entries {
        size += 4 + entry.len();
    }
    if framing {
        size += 1;
    }

    let mut block = Vec::with_capacity(size);
    block.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    block.extend_from_slice(vendor.as_bytes());
    block.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in &entries {
        block.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        block.extend_from_slice(entry.as_bytes());
    }
    if framing {
        block.push(0x01);
    }

    debug_assert_eq!(block.len(), size);
    block
}
