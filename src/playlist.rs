//! Versioned playlist interchange: JSON document export/import, multi-source
//! merge with deduplication, and extended-M3U export.
//!
//! Documents are written atomically (temp file, then rename) so a concurrent
//! reader never observes a partial file. The store only reads and writes the
//! bytes at the paths it is given; ensuring the parent directory exists is
//! the caller's precondition.

use crate::error::PlaylistError;
use crate::stats;
use crate::track::Track;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Format version written to every exported document.
///
/// On import, any declared version sharing the same major version is
/// accepted; unknown extra fields are ignored for forward compatibility.
pub const FORMAT_VERSION: &str = "1.0";

/// One persisted playlist: descriptive metadata plus its track records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    /// Playlist name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the document was created, ISO-8601.
    pub created_at: DateTime<Utc>,
    /// Number of track records.
    pub track_count: usize,
    /// Combined track duration in milliseconds.
    pub total_duration: u64,
    /// Declared format version.
    pub version: String,
    /// The tracks, in playlist order.
    pub tracks: Vec<Track>,
}

/// Document header without the track records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistInfo {
    /// Playlist name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of track records the document declares.
    pub track_count: usize,
    /// Combined track duration in milliseconds.
    pub total_duration: u64,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// Declared format version.
    pub version: String,
}

/// Playlist persistence operations.
///
/// All functions are associated; the store holds no state. File I/O here is
/// blocking, so callers should keep these off latency-critical paths such as
/// an audio-frame loop.
pub struct PlaylistStore;

impl PlaylistStore {
    /// Export a snapshot of tracks as a playlist document.
    ///
    /// When `include_metadata` is false, requester id and name are omitted
    /// from every record. The write is atomic.
    ///
    /// # Arguments
    /// * `tracks` - The snapshot to persist, in order
    /// * `destination` - File path to write; its parent must already exist
    /// * `name` - Playlist name stored in the document header
    /// * `description` - Optional description for the header
    /// * `include_metadata` - Whether requester fields are kept on records
    pub fn export_tracks(
        tracks: &[Track],
        destination: &Path,
        name: &str,
        description: Option<&str>,
        include_metadata: bool,
    ) -> Result<()> {
        let records: Vec<Track> = if include_metadata {
            tracks.to_vec()
        } else {
            tracks.iter().map(|t| t.clone().without_requester()).collect()
        };

        let document = PlaylistDocument {
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: Utc::now(),
            track_count: records.len(),
            total_duration: stats::total_duration(tracks),
            version: FORMAT_VERSION.to_string(),
            tracks: records,
        };

        Self::write_document(&document, destination)?;
        log::debug!(
            "Exported {} tracks to: {}",
            document.track_count,
            destination.display()
        );
        Ok(())
    }

    /// Import a playlist document from a file.
    ///
    /// # Errors
    /// * [`PlaylistError::NotFound`] when the file is missing
    /// * [`PlaylistError::Format`] when the content is not a playlist
    ///   document or declares an unrecognized format version
    /// * [`PlaylistError::Corrupt`] when required fields are missing or
    ///   malformed
    ///
    /// URIs are not validated for reachability.
    pub fn import_playlist(source: &Path) -> Result<PlaylistDocument> {
        let value = Self::read_document_value(source)?;
        let document: PlaylistDocument =
            serde_json::from_value(value).map_err(|e| PlaylistError::Corrupt {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;
        log::debug!(
            "Imported {} tracks from: {}",
            document.tracks.len(),
            source.display()
        );
        Ok(document)
    }

    /// The track URIs of a saved playlist, in playlist order.
    ///
    /// Records without a URI (or with an empty one) are skipped.
    pub fn track_uris(source: &Path) -> Result<Vec<String>> {
        let document = Self::import_playlist(source)?;
        Ok(document
            .tracks
            .into_iter()
            .filter_map(|t| t.uri.filter(|uri| !uri.is_empty()))
            .collect())
    }

    /// Read only the header of a saved playlist.
    ///
    /// The track records are not materialized.
    pub fn playlist_info(source: &Path) -> Result<PlaylistInfo> {
        let value = Self::read_document_value(source)?;
        serde_json::from_value(value).map_err(|e| PlaylistError::Corrupt {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Merge several saved playlists into a new document.
    ///
    /// Sources are read in the given order and their track lists
    /// concatenated, preserving within-source order. With
    /// `remove_duplicates`, the first occurrence of each logical track wins
    /// across the whole concatenation. Totals are recomputed for the merged
    /// result.
    ///
    /// The merge is all-or-nothing: if any source fails to read or parse,
    /// nothing is written to `destination`.
    pub fn merge_playlists(
        sources: &[PathBuf],
        destination: &Path,
        name: &str,
        remove_duplicates: bool,
    ) -> Result<PlaylistDocument> {
        // Every source must parse before any output is written.
        let mut documents = Vec::with_capacity(sources.len());
        for source in sources {
            documents.push(Self::import_playlist(source)?);
        }

        let mut tracks: Vec<Track> = Vec::new();
        let mut seen = HashSet::new();
        for document in documents {
            for track in document.tracks {
                if remove_duplicates && !seen.insert(track.identity(false)) {
                    continue;
                }
                tracks.push(track);
            }
        }

        let merged = PlaylistDocument {
            name: name.to_string(),
            description: Some(format!("Merged from {} playlists", sources.len())),
            created_at: Utc::now(),
            track_count: tracks.len(),
            total_duration: stats::total_duration(&tracks),
            version: FORMAT_VERSION.to_string(),
            tracks,
        };

        Self::write_document(&merged, destination)?;
        log::debug!(
            "Merged {} sources into {} tracks at: {}",
            sources.len(),
            merged.track_count,
            destination.display()
        );
        Ok(merged)
    }

    /// Export tracks as an extended-M3U text file.
    ///
    /// Each track becomes one `#EXTINF` metadata line (duration in seconds
    /// and display title) followed by its locator: the URI, or the
    /// identifier when no URI is set. Tracks with neither are skipped rather
    /// than written as blank entries. Export only; there is no M3U import.
    pub fn export_m3u(tracks: &[Track], destination: &Path, name: Option<&str>) -> Result<()> {
        let mut contents = String::from("#EXTM3U\n");
        if let Some(name) = name {
            contents.push_str(&format!("#PLAYLIST:{name}\n"));
        }

        for track in tracks {
            let locator = track
                .uri
                .as_deref()
                .filter(|uri| !uri.is_empty())
                .or_else(|| track.identifier.as_deref().filter(|id| !id.is_empty()));
            let Some(locator) = locator else {
                log::debug!("Skipping track without locator: {}", track.display_title());
                continue;
            };
            contents.push_str(&format!(
                "#EXTINF:{},{}\n{}\n",
                track.length / 1000,
                track.display_title(),
                locator
            ));
        }

        Self::write_atomic(destination, &contents)?;
        log::debug!("M3U playlist written to: {}", destination.display());
        Ok(())
    }

    fn write_document(document: &PlaylistDocument, destination: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        Self::write_atomic(destination, &json)?;
        Ok(())
    }

    /// Parse a source file up to the version gate, leaving field-level
    /// validation to the caller's target type.
    fn read_document_value(source: &Path) -> Result<serde_json::Value> {
        let raw = fs::read_to_string(source).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PlaylistError::NotFound {
                    path: source.to_path_buf(),
                }
            } else {
                PlaylistError::Io(e)
            }
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| PlaylistError::Format {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;

        let version = value
            .get("version")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| PlaylistError::Format {
                path: source.to_path_buf(),
                reason: "missing format version".to_string(),
            })?;
        if !Self::version_supported(version) {
            return Err(PlaylistError::Format {
                path: source.to_path_buf(),
                reason: format!("unsupported format version {version}"),
            });
        }

        Ok(value)
    }

    /// Accept any version sharing this crate's major format version.
    fn version_supported(version: &str) -> bool {
        version.split('.').next() == Some("1")
    }

    /// Write then rename, so readers never observe a partial file.
    fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
        let mut tmp_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "playlist".into());
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);

        fs::write(&tmp, contents)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_gate_accepts_same_major() {
        assert!(PlaylistStore::version_supported("1.0"));
        assert!(PlaylistStore::version_supported("1.7"));
        assert!(!PlaylistStore::version_supported("2.0"));
        assert!(!PlaylistStore::version_supported("0.9"));
        assert!(!PlaylistStore::version_supported("banana"));
    }

    #[test]
    fn document_round_trips_through_json() {
        let document = PlaylistDocument {
            name: "mix".to_string(),
            description: None,
            created_at: Utc::now(),
            track_count: 1,
            total_duration: 1000,
            version: FORMAT_VERSION.to_string(),
            tracks: vec![Track::new("Song", "Artist", 1000).with_uri("u")],
        };
        let json = serde_json::to_string(&document).unwrap();
        let parsed: PlaylistDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }
}
