//! Stream metadata tags

/// Vorbis-comment block serialization
pub mod vorbis;

pub use vorbis::comment_block;

/// Metadata attached to a stream at open time
///
/// Serialized into the container's tag/comment header (packet 1). Unset
/// fields are simply omitted from the block.
#[derive(Debug, Clone, Default)]
pub struct StreamTags {
    /// Performing artist
    pub artist: Option<String>,
    /// Track title
    pub title: Option<String>,
    /// Album name
    pub album: Option<String>,
    /// Album artist
    pub album_artist: Option<String>,
    /// Genre
    pub genre: Option<String>,
    /// Copyright notice
    pub copyright: Option<String>,
    /// Track number
    pub track_number: Option<String>,
    /// Free-form comment
    pub comment: Option<String>,
    /// Recording date or year
    pub date: Option<String>,
    /// Vendor string override; the crate name and version otherwise
    pub vendor: Option<String>,
}

impl StreamTags {
    /// Create an empty tag set
    pub fn new() -> Self {
        StreamTags::default()
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the album
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the free-form comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let tags = StreamTags::new()
            .with_artist("someone")
            .with_title("something")
            .with_date("2008");
        assert_eq!(tags.artist.as_deref(), Some("someone"));
        assert_eq!(tags.title.as_deref(), Some("something"));
        assert_eq!(tags.date.as_deref(), Some("2008"));
        assert!(tags.album.is_none());
    }
}
