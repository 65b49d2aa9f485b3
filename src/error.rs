use std::path::PathBuf;
use thiserror::Error;

/// Error types for playlist persistence operations.
///
/// Only the persistence layer produces errors. History, statistics and the
/// filter/search helpers are total over all valid snapshots: empty queues and
/// empty histories are common states, not failures, so those components
/// return zeroed or empty results instead.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use trackdeck::{PlaylistError, PlaylistStore};
///
/// match PlaylistStore::import_playlist(Path::new("mix.json")) {
///     Ok(doc) => println!("loaded {} tracks", doc.tracks.len()),
///     Err(PlaylistError::NotFound { path }) => {
///         eprintln!("no playlist at {}", path.display());
///     }
///     Err(PlaylistError::Format { path, reason }) => {
///         eprintln!("{} is not a playlist document: {}", path.display(), reason);
///     }
///     Err(e) => eprintln!("import failed: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// The playlist file does not exist.
    #[error("playlist file not found: {}", .path.display())]
    NotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The file exists but is not a valid playlist document.
    ///
    /// This covers unparseable content as well as documents declaring a
    /// format version this crate does not recognize.
    #[error("invalid playlist document {}: {reason}", .path.display())]
    Format {
        /// The offending file
        path: PathBuf,
        /// What made the document unreadable
        reason: String,
    },

    /// The document parsed but required fields are missing or malformed.
    #[error("corrupt playlist document {}: {reason}", .path.display())]
    Corrupt {
        /// The offending file
        path: PathBuf,
        /// Which field or record was rejected
        reason: String,
    },

    /// File system I/O errors.
    ///
    /// Raised when an export or merge destination cannot be written, or a
    /// source cannot be read for reasons other than absence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A track could not be encoded.
    ///
    /// Should not occur for well-formed tracks.
    #[error("failed to encode playlist document: {0}")]
    Serialization(#[from] serde_json::Error),
}
