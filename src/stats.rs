//! Stateless aggregation over an ordered snapshot of tracks.
//!
//! Every function here takes a caller-supplied slice — typically the pending
//! queue or a [`crate::History`] buffer — and computes its result in a single
//! pass (ranking queries add a sort). Nothing mutates or reorders the input,
//! and empty input always yields zeroed or empty results rather than an
//! error.

use crate::track::Track;
use std::collections::HashMap;

/// Duration bucket boundaries, in milliseconds.
const SHORT_MAX_MS: u64 = 3 * 60 * 1000;
const MEDIUM_MAX_MS: u64 = 6 * 60 * 1000;
const LONG_MAX_MS: u64 = 10 * 60 * 1000;

/// Loop state of the owning playback session.
///
/// Loop state is owned by the session, not computed here; it is passed into
/// [`summary`] so one record can describe the whole queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Not looping.
    #[default]
    Off,
    /// Repeat the current track.
    Track,
    /// Repeat the whole queue.
    Queue,
}

impl LoopMode {
    /// True for any mode other than [`LoopMode::Off`].
    pub fn is_looping(self) -> bool {
        !matches!(self, LoopMode::Off)
    }
}

/// Key a requester grouping is filed under.
///
/// Tracks without a requester are grouped under [`RequesterKey::Unknown`]
/// rather than silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequesterKey {
    /// A known user id.
    Known(u64),
    /// No requester information on the track.
    Unknown,
}

impl From<Option<u64>> for RequesterKey {
    fn from(id: Option<u64>) -> Self {
        match id {
            Some(id) => RequesterKey::Known(id),
            None => RequesterKey::Unknown,
        }
    }
}

/// Per-requester aggregate produced by [`requester_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequesterStats {
    /// Display name, first one seen for this requester.
    pub requester_name: Option<String>,
    /// Number of tracks this requester queued.
    pub count: usize,
    /// Combined duration of their tracks, in milliseconds.
    pub total_duration: u64,
    /// Their tracks, in snapshot order.
    pub tracks: Vec<Track>,
}

/// Counts of non-stream tracks per duration bucket.
///
/// Streams are excluded from all four buckets and surfaced separately via
/// [`stream_count`], so bucket counts plus the stream count always partition
/// the snapshot exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    /// Shorter than 3 minutes.
    pub short: usize,
    /// 3 to 6 minutes, upper bound exclusive.
    pub medium: usize,
    /// 6 to 10 minutes, upper bound exclusive.
    pub long: usize,
    /// 10 minutes or longer.
    pub very_long: usize,
}

impl DurationBreakdown {
    /// Sum over all four buckets.
    pub fn total(&self) -> usize {
        self.short + self.medium + self.long + self.very_long
    }
}

/// Fixed summary record combining every aggregate over one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSummary {
    /// Number of tracks in the snapshot.
    pub total_tracks: usize,
    /// Combined duration in milliseconds.
    pub total_duration: u64,
    /// [`format_duration`] of the total.
    pub total_duration_formatted: String,
    /// Mean track duration in milliseconds, 0 for an empty snapshot.
    pub average_duration: f64,
    /// [`format_duration`] of the (truncated) average.
    pub average_duration_formatted: String,
    /// Longest non-stream track, if any.
    pub longest_track: Option<Track>,
    /// Shortest non-stream track, if any.
    pub shortest_track: Option<Track>,
    /// Number of live streams.
    pub stream_count: usize,
    /// Distinct author count.
    pub unique_authors: usize,
    /// Distinct requester count; unknown requesters count as one bucket.
    pub unique_requesters: usize,
    /// Bucketed duration distribution of the non-stream tracks.
    pub duration_breakdown: DurationBreakdown,
    /// Caller-supplied loop state of the owning session.
    pub loop_mode: LoopMode,
    /// Convenience flag derived from `loop_mode`.
    pub is_looping: bool,
}

/// Sum of track lengths in milliseconds.
///
/// Streams contribute their reported `length` (typically 0); callers wanting
/// them excluded should pre-filter with [`crate::filter::non_streams_only`].
pub fn total_duration(tracks: &[Track]) -> u64 {
    tracks.iter().map(|t| t.length).sum()
}

/// Mean track duration in milliseconds, 0.0 for an empty snapshot.
pub fn average_duration(tracks: &[Track]) -> f64 {
    if tracks.is_empty() {
        return 0.0;
    }
    total_duration(tracks) as f64 / tracks.len() as f64
}

/// Render a millisecond duration as `H:MM:SS`, or `M:SS` under an hour.
///
/// # Examples
///
/// ```rust
/// use trackdeck::stats::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(330_000), "5:30");
/// assert_eq!(format_duration(3_661_000), "1:01:01");
/// ```
pub fn format_duration(milliseconds: u64) -> String {
    let seconds = milliseconds / 1000;
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Tracks considered for longest/shortest: non-streams, unless the snapshot
/// holds nothing else.
fn bounded_tracks(tracks: &[Track]) -> impl Iterator<Item = &Track> {
    let any_non_stream = tracks.iter().any(|t| !t.is_stream);
    tracks.iter().filter(move |t| !any_non_stream || !t.is_stream)
}

/// The longest track; first occurrence wins ties.
///
/// Unbounded streams are excluded unless the snapshot contains only streams.
pub fn longest_track(tracks: &[Track]) -> Option<&Track> {
    bounded_tracks(tracks).fold(None, |best: Option<&Track>, track| match best {
        Some(b) if track.length <= b.length => Some(b),
        Some(_) => Some(track),
        None => Some(track),
    })
}

/// The shortest track; first occurrence wins ties.
///
/// Unbounded streams are excluded unless the snapshot contains only streams.
pub fn shortest_track(tracks: &[Track]) -> Option<&Track> {
    bounded_tracks(tracks).fold(None, |best: Option<&Track>, track| match best {
        Some(b) if track.length >= b.length => Some(b),
        Some(_) => Some(track),
        None => Some(track),
    })
}

/// Group the snapshot by requester.
///
/// Tracks without requester information land under
/// [`RequesterKey::Unknown`].
pub fn requester_stats(tracks: &[Track]) -> HashMap<RequesterKey, RequesterStats> {
    let mut stats: HashMap<RequesterKey, RequesterStats> = HashMap::new();
    for track in tracks {
        let entry = stats
            .entry(RequesterKey::from(track.requester_id))
            .or_insert_with(|| RequesterStats {
                requester_name: track.requester_name.clone(),
                count: 0,
                total_duration: 0,
                tracks: Vec::new(),
            });
        entry.count += 1;
        entry.total_duration += track.length;
        entry.tracks.push(track.clone());
    }
    stats
}

/// Requesters ranked by track count, descending.
///
/// Ties keep the order in which each requester first appears in the
/// snapshot. At most `limit` entries are returned.
pub fn top_requesters(tracks: &[Track], limit: usize) -> Vec<(RequesterKey, usize)> {
    ranked_counts(tracks.iter().map(|t| RequesterKey::from(t.requester_id)), limit)
}

/// Track count per author.
pub fn author_distribution(tracks: &[Track]) -> HashMap<String, usize> {
    let mut distribution = HashMap::new();
    for track in tracks {
        *distribution.entry(track.author.clone()).or_insert(0) += 1;
    }
    distribution
}

/// Authors ranked by track count, descending, first-appearance tie-break.
pub fn top_authors(tracks: &[Track], limit: usize) -> Vec<(String, usize)> {
    ranked_counts(tracks.iter().map(|t| t.author.clone()), limit)
}

/// Track count per provenance playlist; untagged tracks are skipped.
pub fn playlist_distribution(tracks: &[Track]) -> HashMap<String, usize> {
    let mut distribution = HashMap::new();
    for track in tracks {
        if let Some(name) = &track.playlist_name {
            *distribution.entry(name.clone()).or_insert(0) += 1;
        }
    }
    distribution
}

/// Number of live streams in the snapshot.
pub fn stream_count(tracks: &[Track]) -> usize {
    tracks.iter().filter(|t| t.is_stream).count()
}

/// Bucket the non-stream tracks by duration.
///
/// Together with [`stream_count`], the buckets partition the snapshot: every
/// track is counted exactly once.
pub fn duration_breakdown(tracks: &[Track]) -> DurationBreakdown {
    let mut breakdown = DurationBreakdown::default();
    for track in tracks {
        if track.is_stream {
            continue;
        }
        if track.length < SHORT_MAX_MS {
            breakdown.short += 1;
        } else if track.length < MEDIUM_MAX_MS {
            breakdown.medium += 1;
        } else if track.length < LONG_MAX_MS {
            breakdown.long += 1;
        } else {
            breakdown.very_long += 1;
        }
    }
    breakdown
}

/// Build the full [`QueueSummary`] for one snapshot.
///
/// `loop_mode` comes from the owning session.
pub fn summary(tracks: &[Track], loop_mode: LoopMode) -> QueueSummary {
    let total = total_duration(tracks);
    let average = average_duration(tracks);
    let mut requesters = std::collections::HashSet::new();
    let mut authors = std::collections::HashSet::new();
    for track in tracks {
        requesters.insert(RequesterKey::from(track.requester_id));
        authors.insert(track.author.as_str());
    }

    QueueSummary {
        total_tracks: tracks.len(),
        total_duration: total,
        total_duration_formatted: format_duration(total),
        average_duration: average,
        average_duration_formatted: format_duration(average as u64),
        longest_track: longest_track(tracks).cloned(),
        shortest_track: shortest_track(tracks).cloned(),
        stream_count: stream_count(tracks),
        unique_authors: authors.len(),
        unique_requesters: requesters.len(),
        duration_breakdown: duration_breakdown(tracks),
        loop_mode,
        is_looping: loop_mode.is_looping(),
    }
}

/// Count `keys` and rank descending, breaking ties by first appearance.
fn ranked_counts<K>(keys: impl Iterator<Item = K>, limit: usize) -> Vec<(K, usize)>
where
    K: std::hash::Hash + Eq + Clone,
{
    let mut order: Vec<(K, usize)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, length: u64) -> Track {
        Track::new(title, "Artist", length)
    }

    #[test]
    fn empty_snapshot_yields_zeroes() {
        let tracks: Vec<Track> = Vec::new();
        assert_eq!(total_duration(&tracks), 0);
        assert_eq!(average_duration(&tracks), 0.0);
        assert!(longest_track(&tracks).is_none());
        assert!(shortest_track(&tracks).is_none());
        assert!(requester_stats(&tracks).is_empty());
        assert!(top_authors(&tracks, 5).is_empty());
        assert_eq!(duration_breakdown(&tracks), DurationBreakdown::default());

        let summary = summary(&tracks, LoopMode::Off);
        assert_eq!(summary.total_tracks, 0);
        assert_eq!(summary.total_duration_formatted, "0:00");
        assert!(!summary.is_looping);
    }

    #[test]
    fn format_duration_fixtures() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59_999), "0:59");
        assert_eq!(format_duration(60_000), "1:00");
        assert_eq!(format_duration(330_000), "5:30");
        assert_eq!(format_duration(3_600_000), "1:00:00");
        assert_eq!(format_duration(3_661_000), "1:01:01");
    }

    #[test]
    fn totals_and_average() {
        let tracks = vec![track("a", 60_000), track("b", 120_000), track("c", 0)];
        assert_eq!(total_duration(&tracks), 180_000);
        assert_eq!(average_duration(&tracks), 60_000.0);
    }

    #[test]
    fn longest_and_shortest_skip_streams() {
        let tracks = vec![
            track("short", 60_000),
            track("stream", 0).with_stream(true),
            track("long", 600_000),
        ];
        assert_eq!(longest_track(&tracks).unwrap().title, "long");
        assert_eq!(shortest_track(&tracks).unwrap().title, "short");
    }

    #[test]
    fn all_stream_snapshot_still_has_extremes() {
        let tracks = vec![
            track("s1", 0).with_stream(true),
            track("s2", 5_000).with_stream(true),
        ];
        assert_eq!(longest_track(&tracks).unwrap().title, "s2");
        assert_eq!(shortest_track(&tracks).unwrap().title, "s1");
    }

    #[test]
    fn extremes_break_ties_by_first_occurrence() {
        let tracks = vec![track("first", 60_000), track("second", 60_000)];
        assert_eq!(longest_track(&tracks).unwrap().title, "first");
        assert_eq!(shortest_track(&tracks).unwrap().title, "first");
    }

    #[test]
    fn requester_stats_keeps_unknown_bucket() {
        let tracks = vec![
            track("a", 60_000).with_requester(1, "alice"),
            track("b", 30_000),
            track("c", 10_000).with_requester(1, "alice"),
        ];
        let stats = requester_stats(&tracks);
        assert_eq!(stats.len(), 2);

        let alice = &stats[&RequesterKey::Known(1)];
        assert_eq!(alice.count, 2);
        assert_eq!(alice.total_duration, 70_000);
        assert_eq!(alice.requester_name.as_deref(), Some("alice"));

        let unknown = &stats[&RequesterKey::Unknown];
        assert_eq!(unknown.count, 1);
        assert_eq!(unknown.tracks[0].title, "b");
    }

    #[test]
    fn top_requesters_orders_by_count_then_first_appearance() {
        let tracks = vec![
            track("a", 0).with_requester(7, "g"),
            track("b", 0).with_requester(9, "h"),
            track("c", 0).with_requester(9, "h"),
            track("d", 0).with_requester(5, "i"),
        ];
        let top = top_requesters(&tracks, 10);
        assert_eq!(
            top,
            vec![
                (RequesterKey::Known(9), 2),
                (RequesterKey::Known(7), 1),
                (RequesterKey::Known(5), 1),
            ]
        );

        assert_eq!(top_requesters(&tracks, 1).len(), 1);
    }

    #[test]
    fn top_authors_counts_and_truncates() {
        let tracks = vec![
            Track::new("1", "Nina Simone", 0),
            Track::new("2", "Bowie", 0),
            Track::new("3", "Nina Simone", 0),
        ];
        assert_eq!(
            top_authors(&tracks, 2),
            vec![("Nina Simone".to_string(), 2), ("Bowie".to_string(), 1)]
        );
        assert_eq!(author_distribution(&tracks).len(), 2);
    }

    #[test]
    fn breakdown_buckets_partition_non_streams() {
        let tracks = vec![
            track("s", 60_000),              // short
            track("m", 180_000),             // medium (inclusive lower bound)
            track("l", 6 * 60 * 1000),       // long
            track("xl", 10 * 60 * 1000),     // very_long (inclusive)
            track("live", 600_000).with_stream(true),
        ];
        let breakdown = duration_breakdown(&tracks);
        assert_eq!(breakdown.short, 1);
        assert_eq!(breakdown.medium, 1);
        assert_eq!(breakdown.long, 1);
        assert_eq!(breakdown.very_long, 1);
        assert_eq!(breakdown.total() + stream_count(&tracks), tracks.len());
    }

    #[test]
    fn stream_scenario_from_mixed_snapshot() {
        let tracks = vec![
            track("song", 60_000),
            track("radio", 600_000).with_stream(true),
        ];
        assert_eq!(stream_count(&tracks), 1);
        let breakdown = duration_breakdown(&tracks);
        assert_eq!(breakdown.short, 1);
        assert_eq!(breakdown.medium, 0);
        assert_eq!(breakdown.long, 0);
        assert_eq!(breakdown.very_long, 0);
    }

    #[test]
    fn playlist_distribution_skips_untagged() {
        let tracks = vec![
            track("a", 0).with_playlist_name("mix"),
            track("b", 0).with_playlist_name("mix"),
            track("c", 0),
        ];
        let distribution = playlist_distribution(&tracks);
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution["mix"], 2);
    }

    #[test]
    fn summary_combines_everything() {
        let tracks = vec![
            track("a", 120_000).with_requester(1, "alice"),
            track("b", 240_000).with_requester(2, "bob"),
            Track::new("c", "Other", 0).with_stream(true),
        ];
        let summary = summary(&tracks, LoopMode::Queue);
        assert_eq!(summary.total_tracks, 3);
        assert_eq!(summary.total_duration, 360_000);
        assert_eq!(summary.total_duration_formatted, "6:00");
        assert_eq!(summary.average_duration_formatted, "2:00");
        assert_eq!(summary.longest_track.as_ref().unwrap().title, "b");
        assert_eq!(summary.shortest_track.as_ref().unwrap().title, "a");
        assert_eq!(summary.stream_count, 1);
        assert_eq!(summary.unique_authors, 2);
        // alice, bob and the unknown bucket for the stream.
        assert_eq!(summary.unique_requesters, 3);
        assert_eq!(summary.loop_mode, LoopMode::Queue);
        assert!(summary.is_looping);
    }
}
