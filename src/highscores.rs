//! Score tracking with a persisted high score
//!
//! The high score is stored as decimal text under
//! [`HIGH_SCORE_KEY`](crate::consts::HIGH_SCORE_KEY). If the store cannot be
//! read or written, the tracker keeps the high score in memory for the rest
//! of the session and stops touching the store.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Current-run score plus best score
pub struct ScoreTracker {
    current: u64,
    high_score: u64,
    store: Box<dyn KeyValueStore>,
    /// False once the store has failed; the session is then memory-only
    persistent: bool,
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("current", &self.current)
            .field("high_score", &self.high_score)
            .field("persistent", &self.persistent)
            .finish()
    }
}

impl ScoreTracker {
    /// Create a tracker and read the stored high score
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let mut tracker = Self {
            current: 0,
            high_score: 0,
            store,
            persistent: true,
        };
        tracker.high_score = tracker.load();
        tracker
    }

    fn load(&mut self) -> u64 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(text)) => parse_score(&text),
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("High score store unavailable, keeping it in memory: {}", e);
                self.persistent = false;
                0
            }
        }
    }

    /// Add to the current score
    pub fn increment(&mut self, amount: u64) {
        self.current = self.current.saturating_add(amount);
    }

    /// Zero the current score; the high score is kept
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    /// Best committed score
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Best score including the run in progress
    pub fn best(&self) -> u64 {
        self.high_score.max(self.current)
    }

    /// Whether the high score is still being written to the store
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Record the current score if it beats the high score.
    ///
    /// Returns true if a new high score was set.
    pub fn commit_if_high_score(&mut self) -> bool {
        if self.current <= self.high_score {
            return false;
        }
        self.high_score = self.current;
        log::info!("New high score: {}", self.high_score);

        if self.persistent {
            if let Err(e) = self.store.set(HIGH_SCORE_KEY, &self.high_score.to_string()) {
                log::warn!("High score not saved, keeping it in memory: {}", e);
                self.persistent = false;
            }
        }
        true
    }
}

/// Leading decimal digits of `text`; anything unreadable counts as 0
fn parse_score(text: &str) -> u64 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse() {
        Ok(score) => score,
        Err(_) => {
            log::warn!("Ignoring unreadable high score {:?}", text);
            0
        }
    }
}
