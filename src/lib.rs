//! Play history, queue statistics and playlist interchange for
//! media-playback sessions.
//!
//! Three cooperating components share one [`Track`] data model:
//!
//! - [`History`] — a size-bounded, insertion-ordered log of previously
//!   played tracks with a navigation cursor for "previous track" walks.
//! - [`stats`] — stateless analytics over an ordered snapshot of tracks
//!   (the pending queue or a history buffer).
//! - [`PlaylistStore`] — a versioned JSON interchange format with strict
//!   round-trip guarantees, multi-source merge with deduplication, and
//!   extended-M3U export.
//!
//! The [`filter`] and [`search`] modules provide the stateless
//! filter/sort/search boundary consumed by the components above and by
//! callers directly.

pub mod error;
pub mod filter;
pub mod history;
pub mod playlist;
pub mod search;
pub mod stats;
pub mod track;

pub use error::PlaylistError;
pub use history::History;
pub use playlist::{PlaylistDocument, PlaylistInfo, PlaylistStore, FORMAT_VERSION};
pub use search::DedupStrategy;
pub use stats::{DurationBreakdown, LoopMode, QueueSummary, RequesterKey, RequesterStats};
pub use track::{Track, TrackIdentity};

pub type Result<T> = std::result::Result<T, PlaylistError>;
