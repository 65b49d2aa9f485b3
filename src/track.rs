//! The shared track value type and the logical-identity rule used for
//! deduplication across history, merge and filter operations.

use serde::{Deserialize, Serialize};

/// An immutable description of one playable item.
///
/// A `Track` is a value: all "mutation" is performed by constructing a new
/// track with a field replaced, typically via the `with_*` builder methods
/// (e.g. attaching a requester when a track is re-imported).
///
/// # Examples
///
/// ```rust
/// use trackdeck::Track;
///
/// let track = Track::new("Paranoid Android", "Radiohead", 386_000)
///     .with_uri("https://youtu.be/fHiGbolFFGw")
///     .with_requester(1001, "alice");
///
/// assert_eq!(track.display_title(), "Radiohead - Paranoid Android");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// The track title.
    pub title: String,
    /// The artist or channel that authored the track.
    pub author: String,
    /// Canonical locator. Primary identity key when present and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Source-specific id, secondary locator for M3U export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Duration in milliseconds. `0` may denote an unbounded live stream.
    pub length: u64,
    /// True if the track has no fixed end.
    #[serde(default)]
    pub is_stream: bool,
    /// Opaque artwork locator, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// International Standard Recording Code, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    /// Id of whoever queued the track. `None` when unknown, e.g. for
    /// re-imported tracks that have not been re-resolved yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,
    /// Display name of whoever queued the track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,
    /// Provenance tag, set by the component that added the track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
}

impl Track {
    /// Create a track with the required fields; everything else starts unset.
    pub fn new(title: impl Into<String>, author: impl Into<String>, length: u64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            uri: None,
            identifier: None,
            length,
            is_stream: false,
            thumbnail: None,
            isrc: None,
            requester_id: None,
            requester_name: None,
            playlist_name: None,
        }
    }

    /// Set the canonical locator.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the source-specific identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Attach the user who queued this track.
    pub fn with_requester(mut self, id: u64, name: impl Into<String>) -> Self {
        self.requester_id = Some(id);
        self.requester_name = Some(name.into());
        self
    }

    /// Tag the track with the playlist it came from.
    pub fn with_playlist_name(mut self, name: impl Into<String>) -> Self {
        self.playlist_name = Some(name.into());
        self
    }

    /// Mark the track as an unbounded live stream.
    pub fn with_stream(mut self, is_stream: bool) -> Self {
        self.is_stream = is_stream;
        self
    }

    /// Set the artwork locator.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set the ISRC code.
    pub fn with_isrc(mut self, isrc: impl Into<String>) -> Self {
        self.isrc = Some(isrc.into());
        self
    }

    /// Return a copy with the requester fields cleared.
    ///
    /// Used by playlist export when requester metadata is excluded.
    pub fn without_requester(mut self) -> Self {
        self.requester_id = None;
        self.requester_name = None;
        self
    }

    /// `"Author - Title"`, the display form used in M3U metadata lines.
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.author, self.title)
    }

    /// The logical identity of this track for deduplication.
    ///
    /// Two tracks are the same logical item when their non-empty URIs match,
    /// or, when no URI is available, when title and author match under the
    /// requested case policy.
    pub fn identity(&self, case_sensitive: bool) -> TrackIdentity {
        match &self.uri {
            Some(uri) if !uri.is_empty() => TrackIdentity::Uri(uri.clone()),
            _ => TrackIdentity::title_author(&self.title, &self.author, case_sensitive),
        }
    }
}

/// Identity class of a track under the dedup rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackIdentity {
    /// Identified by a non-empty canonical URI.
    Uri(String),
    /// Identified by title and author, already folded per the case policy.
    TitleAuthor(String, String),
}

impl TrackIdentity {
    pub(crate) fn title_author(title: &str, author: &str, case_sensitive: bool) -> Self {
        if case_sensitive {
            TrackIdentity::TitleAuthor(title.to_string(), author.to_string())
        } else {
            TrackIdentity::TitleAuthor(title.to_lowercase(), author.to_lowercase())
        }
    }
}
