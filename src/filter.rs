//! Stateless track filtering.
//!
//! Every function returns a fresh `Vec<Track>` containing exactly the
//! elements satisfying the predicate, in input order. Input is never
//! mutated. Match behavior is always explicit: `exact` selects whole-string
//! versus substring matching, `case_sensitive` the case policy.

use crate::track::Track;

fn matches(haystack: &str, needle: &str, exact: bool, case_sensitive: bool) -> bool {
    if case_sensitive {
        if exact {
            haystack == needle
        } else {
            haystack.contains(needle)
        }
    } else {
        let haystack = haystack.to_lowercase();
        let needle = needle.to_lowercase();
        if exact {
            haystack == needle
        } else {
            haystack.contains(&needle)
        }
    }
}

/// Tracks within a duration range, in milliseconds.
///
/// Either bound may be omitted; both are inclusive.
pub fn by_duration(tracks: &[Track], min: Option<u64>, max: Option<u64>) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| min.is_none_or(|min| t.length >= min))
        .filter(|t| max.is_none_or(|max| t.length <= max))
        .cloned()
        .collect()
}

/// Tracks whose author matches `author`.
pub fn by_author(tracks: &[Track], author: &str, exact: bool, case_sensitive: bool) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| matches(&t.author, author, exact, case_sensitive))
        .cloned()
        .collect()
}

/// Tracks whose title matches `title`.
pub fn by_title(tracks: &[Track], title: &str, exact: bool, case_sensitive: bool) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| matches(&t.title, title, exact, case_sensitive))
        .cloned()
        .collect()
}

/// Tracks queued by a specific user.
pub fn by_requester(tracks: &[Track], requester_id: u64) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| t.requester_id == Some(requester_id))
        .cloned()
        .collect()
}

/// Tracks whose provenance playlist name contains `playlist_name`,
/// case-insensitively. Untagged tracks never match.
pub fn by_playlist(tracks: &[Track], playlist_name: &str) -> Vec<Track> {
    let needle = playlist_name.to_lowercase();
    tracks
        .iter()
        .filter(|t| {
            t.playlist_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Only live streams.
pub fn streams_only(tracks: &[Track]) -> Vec<Track> {
    tracks.iter().filter(|t| t.is_stream).cloned().collect()
}

/// Everything except live streams.
pub fn non_streams_only(tracks: &[Track]) -> Vec<Track> {
    tracks.iter().filter(|t| !t.is_stream).cloned().collect()
}

/// Tracks satisfying a caller-supplied predicate.
///
/// # Examples
///
/// ```rust
/// use trackdeck::{filter, Track};
///
/// let tracks = vec![
///     Track::new("A", "X", 1000).with_isrc("USRC17607839"),
///     Track::new("B", "Y", 2000),
/// ];
/// let with_isrc = filter::custom(&tracks, |t| t.isrc.is_some());
/// assert_eq!(with_isrc.len(), 1);
/// ```
pub fn custom(tracks: &[Track], predicate: impl Fn(&Track) -> bool) -> Vec<Track> {
    tracks.iter().filter(|t| predicate(t)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks() -> Vec<Track> {
        vec![
            Track::new("Alpha", "Miles Davis", 120_000)
                .with_requester(1, "alice")
                .with_playlist_name("Jazz Classics"),
            Track::new("beta", "miles davis", 400_000),
            Track::new("Gamma", "Sun Ra", 700_000)
                .with_stream(true)
                .with_playlist_name("Space"),
        ]
    }

    #[test]
    fn duration_bounds_are_inclusive_and_optional() {
        let tracks = tracks();
        assert_eq!(by_duration(&tracks, Some(120_000), None).len(), 3);
        assert_eq!(by_duration(&tracks, Some(120_001), None).len(), 2);
        assert_eq!(by_duration(&tracks, None, Some(400_000)).len(), 2);
        let mid = by_duration(&tracks, Some(200_000), Some(500_000));
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].title, "beta");
        assert_eq!(by_duration(&tracks, None, None).len(), 3);
    }

    #[test]
    fn author_match_flags_are_independent() {
        let tracks = tracks();
        assert_eq!(by_author(&tracks, "Miles Davis", true, true).len(), 1);
        assert_eq!(by_author(&tracks, "Miles Davis", true, false).len(), 2);
        assert_eq!(by_author(&tracks, "miles", false, false).len(), 2);
        assert_eq!(by_author(&tracks, "Miles", false, true).len(), 1);
    }

    #[test]
    fn title_match_preserves_input_order() {
        let tracks = tracks();
        let hits = by_title(&tracks, "a", false, false);
        let titles: Vec<_> = hits.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn requester_and_playlist_filters() {
        let tracks = tracks();
        assert_eq!(by_requester(&tracks, 1).len(), 1);
        assert_eq!(by_requester(&tracks, 99).len(), 0);
        assert_eq!(by_playlist(&tracks, "jazz").len(), 1);
        assert_eq!(by_playlist(&tracks, "nope").len(), 0);
    }

    #[test]
    fn stream_partition() {
        let tracks = tracks();
        let streams = streams_only(&tracks);
        let rest = non_streams_only(&tracks);
        assert_eq!(streams.len(), 1);
        assert_eq!(rest.len(), 2);
        assert_eq!(streams.len() + rest.len(), tracks.len());
    }

    #[test]
    fn custom_predicate() {
        let tracks = tracks();
        let long = custom(&tracks, |t| t.length > 300_000);
        assert_eq!(long.len(), 2);
    }
}
