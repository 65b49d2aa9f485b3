//! Stateless search, sort, dedup, grouping and sampling over track
//! snapshots.
//!
//! Like [`crate::filter`], everything here returns fresh sequences and never
//! mutates its input. Sorts are stable in both directions.

use crate::track::{Track, TrackIdentity};
use rand::seq::SliceRandom;

/// How [`remove_duplicates`] decides that two tracks are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Match on non-empty URI; tracks without one fall back to
    /// case-insensitive title+author rather than collapsing together.
    ByUri,
    /// Match on title and author under the given case policy, ignoring URIs.
    ByTitleAuthor {
        /// Whether title/author comparison is case sensitive.
        case_sensitive: bool,
    },
}

impl DedupStrategy {
    fn key(self, track: &Track) -> TrackIdentity {
        match self {
            DedupStrategy::ByUri => track.identity(false),
            DedupStrategy::ByTitleAuthor { case_sensitive } => {
                TrackIdentity::title_author(&track.title, &track.author, case_sensitive)
            }
        }
    }
}

/// Tracks whose requested fields contain `query`.
///
/// Matching is OR across the enabled fields. With both field toggles off,
/// nothing matches.
pub fn search_tracks(
    tracks: &[Track],
    query: &str,
    search_title: bool,
    search_author: bool,
    case_sensitive: bool,
) -> Vec<Track> {
    let needle = if case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    };
    let field_matches = |field: &str| {
        if case_sensitive {
            field.contains(&needle)
        } else {
            field.to_lowercase().contains(&needle)
        }
    };

    tracks
        .iter()
        .filter(|t| {
            (search_title && field_matches(&t.title))
                || (search_author && field_matches(&t.author))
        })
        .cloned()
        .collect()
}

/// Sort by duration; `reverse` puts the longest first. Stable.
pub fn sort_by_duration(tracks: &[Track], reverse: bool) -> Vec<Track> {
    let mut sorted = tracks.to_vec();
    if reverse {
        sorted.sort_by(|a, b| b.length.cmp(&a.length));
    } else {
        sorted.sort_by(|a, b| a.length.cmp(&b.length));
    }
    sorted
}

/// Sort alphabetically by title, case-insensitively. Stable.
pub fn sort_by_title(tracks: &[Track], reverse: bool) -> Vec<Track> {
    sort_by_key_str(tracks, reverse, |t| t.title.to_lowercase())
}

/// Sort alphabetically by author, case-insensitively. Stable.
pub fn sort_by_author(tracks: &[Track], reverse: bool) -> Vec<Track> {
    sort_by_key_str(tracks, reverse, |t| t.author.to_lowercase())
}

fn sort_by_key_str(
    tracks: &[Track],
    reverse: bool,
    key: impl Fn(&Track) -> String,
) -> Vec<Track> {
    let mut sorted = tracks.to_vec();
    if reverse {
        sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    } else {
        sorted.sort_by(|a, b| key(a).cmp(&key(b)));
    }
    sorted
}

/// Remove duplicate tracks, keeping the first occurrence of each identity
/// class in input order.
pub fn remove_duplicates(tracks: &[Track], strategy: DedupStrategy) -> Vec<Track> {
    let mut seen = std::collections::HashSet::new();
    tracks
        .iter()
        .filter(|t| seen.insert(strategy.key(t)))
        .cloned()
        .collect()
}

/// Group tracks by author.
///
/// Groups appear in the order each author first occurs; within a group,
/// input order is preserved.
pub fn group_by_author(tracks: &[Track]) -> Vec<(String, Vec<Track>)> {
    group_by(tracks, |t| Some(t.author.clone()))
}

/// Group tracks by provenance playlist; untagged tracks are skipped.
pub fn group_by_playlist(tracks: &[Track]) -> Vec<(String, Vec<Track>)> {
    group_by(tracks, |t| t.playlist_name.clone())
}

fn group_by(
    tracks: &[Track],
    key: impl Fn(&Track) -> Option<String>,
) -> Vec<(String, Vec<Track>)> {
    let mut groups: Vec<(String, Vec<Track>)> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for track in tracks {
        let Some(name) = key(track) else { continue };
        match index.get(&name) {
            Some(&i) => groups[i].1.push(track.clone()),
            None => {
                index.insert(name.clone(), groups.len());
                groups.push((name, vec![track.clone()]));
            }
        }
    }
    groups
}

/// A uniform random sample of `count` tracks, without replacement.
///
/// `count` is clamped to the snapshot size; sample order is random.
pub fn random_tracks(tracks: &[Track], count: usize) -> Vec<Track> {
    let mut sampled = tracks.to_vec();
    let mut rng = rand::rng();
    sampled.shuffle(&mut rng);
    sampled.truncate(count.min(tracks.len()));
    sampled
}
