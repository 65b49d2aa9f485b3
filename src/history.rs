//! Bounded, insertion-ordered play history with a navigation cursor.
//!
//! A [`History`] keeps the most recently played tracks up to a fixed
//! capacity, evicting the oldest entries first. An independent cursor
//! supports "previous track" / "next track" walks over the log: adding a
//! track always resets the walk back to "now", since navigation is relative
//! to whatever is currently playing.
//!
//! One history belongs to exactly one playback session. Mutation takes
//! `&mut self`, so the single-mutator discipline is enforced by ownership;
//! sessions that share a history across threads wrap it in a `Mutex`.

use crate::track::Track;
use std::collections::VecDeque;

/// Bounded log of previously played tracks.
///
/// # Examples
///
/// ```rust
/// use trackdeck::{History, Track};
///
/// let mut history = History::new(100);
/// history.add(Track::new("First", "Artist", 180_000));
/// history.add(Track::new("Second", "Artist", 200_000));
///
/// assert_eq!(history.current().unwrap().title, "Second");
/// assert_eq!(history.previous().unwrap().title, "First");
/// assert_eq!(history.next().unwrap().title, "Second");
/// ```
#[derive(Debug, Clone)]
pub struct History {
    buffer: VecDeque<Track>,
    max_size: usize,
    /// Navigation position, or `None` when parked at the newest entry.
    cursor: Option<usize>,
}

impl History {
    /// Create an empty history holding at most `max_size` tracks.
    ///
    /// `max_size` is clamped to at least 1.
    pub fn new(max_size: usize) -> Self {
        Self {
            buffer: VecDeque::new(),
            max_size: max_size.max(1),
            cursor: None,
        }
    }

    /// Append a track as the newest entry.
    ///
    /// Evicts oldest entries while the buffer exceeds its capacity, and
    /// resets the navigation cursor back to the newest end. Always succeeds.
    pub fn add(&mut self, track: Track) {
        self.buffer.push_back(track);
        while self.buffer.len() > self.max_size {
            self.buffer.pop_front();
        }
        self.cursor = None;
    }

    /// The configured capacity.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of tracks currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when no tracks have been recorded.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Remove all tracks and unset the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = None;
    }

    /// Iterate over the buffer in insertion order (oldest first).
    ///
    /// Useful for feeding the history into [`crate::stats`] as a snapshot.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.buffer.iter()
    }

    /// All tracks, most recent first.
    pub fn all(&self) -> Vec<Track> {
        self.buffer.iter().rev().cloned().collect()
    }

    /// The last `count` tracks, most recent first.
    ///
    /// Returns fewer than `count` when the history is shorter.
    pub fn last(&self, count: usize) -> Vec<Track> {
        self.buffer.iter().rev().take(count).cloned().collect()
    }

    /// Tracks whose title or author contains `query`, in buffer order.
    pub fn search(&self, query: &str, case_sensitive: bool) -> Vec<Track> {
        let needle = if case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        self.buffer
            .iter()
            .filter(|track| {
                if case_sensitive {
                    track.title.contains(&needle) || track.author.contains(&needle)
                } else {
                    track.title.to_lowercase().contains(&needle)
                        || track.author.to_lowercase().contains(&needle)
                }
            })
            .cloned()
            .collect()
    }

    /// Tracks queued by a specific user, in buffer order.
    pub fn by_requester(&self, requester_id: u64) -> Vec<Track> {
        self.buffer
            .iter()
            .filter(|track| track.requester_id == Some(requester_id))
            .cloned()
            .collect()
    }

    /// First occurrence of each logical track, in buffer order.
    ///
    /// Identity follows the dedup rule: non-empty URI, else
    /// case-insensitive title+author.
    pub fn unique_tracks(&self) -> Vec<Track> {
        let mut seen = std::collections::HashSet::new();
        self.buffer
            .iter()
            .filter(|track| seen.insert(track.identity(false)))
            .cloned()
            .collect()
    }

    /// The track at the cursor, or the newest entry when the cursor is unset.
    pub fn current(&self) -> Option<&Track> {
        match self.cursor {
            Some(index) => self.buffer.get(index),
            None => self.buffer.back(),
        }
    }

    /// Step the cursor one entry toward the oldest end and return the track
    /// there.
    ///
    /// Starts from the newest entry when the cursor is unset. Returns `None`
    /// without moving once the oldest entry is reached; repeated calls at the
    /// boundary keep returning `None` rather than wrapping.
    pub fn previous(&mut self) -> Option<&Track> {
        if self.buffer.is_empty() {
            return None;
        }
        let position = self.cursor.unwrap_or(self.buffer.len() - 1);
        if position == 0 {
            return None;
        }
        self.cursor = Some(position - 1);
        self.buffer.get(position - 1)
    }

    /// Step the cursor one entry toward the newest end and return the track
    /// there.
    ///
    /// Returns `None` without wrapping once the newest entry has been
    /// passed, including when the cursor is already unset.
    pub fn next(&mut self) -> Option<&Track> {
        let position = self.cursor?;
        if position + 1 >= self.buffer.len() {
            return None;
        }
        self.cursor = Some(position + 1);
        self.buffer.get(position + 1)
    }
}
