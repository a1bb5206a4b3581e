//! Constellation Connect - star-matching puzzle
//!
//! The player links stars by clicking one and then another. A link counts
//! only if it is one of the constellation's edges (in either direction).
//! Once every edge is linked the level is complete and the next one loads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Click distance that still selects a star
pub const STAR_HIT_RADIUS: f32 = 20.0;

/// Square canvas the star coordinates are laid out on
pub const CANVAS_SIZE: f32 = 600.0;

/// Undirected link between two star indices, stored low index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link(pub usize, pub usize);

impl Link {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// A constellation level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub name: String,
    pub level: u32,
    pub stars: Vec<Vec2>,
    pub links: Vec<Link>,
    pub story: String,
    /// Hints shown while linking, in order
    pub steps: Vec<String>,
}

impl Constellation {
    /// Index of the first star within [`STAR_HIT_RADIUS`] of `point`
    pub fn star_at(&self, point: Vec2) -> Option<usize> {
        self.stars
            .iter()
            .position(|star| star.distance(point) < STAR_HIT_RADIUS)
    }

    pub fn has_link(&self, link: Link) -> bool {
        self.links.contains(&link)
    }
}

/// Built-in levels
pub fn builtin_levels() -> Vec<Constellation> {
    fn pts(coords: &[(f32, f32)]) -> Vec<Vec2> {
        coords.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }
    fn links(pairs: &[(usize, usize)]) -> Vec<Link> {
        pairs.iter().map(|&(a, b)| Link::new(a, b)).collect()
    }
    fn steps(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    vec![
        Constellation {
            name: "Ursa Major (Big Dipper)".to_string(),
            level: 1,
            stars: pts(&[
                (200.0, 200.0),
                (250.0, 210.0),
                (300.0, 220.0),
                (350.0, 230.0),
                (400.0, 260.0),
                (380.0, 310.0),
                (420.0, 340.0),
            ]),
            links: links(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]),
            story: "The Great Bear is one of the oldest known star patterns. In Greek myth it \
                    is Callisto, turned into a bear by the jealous goddess Hera."
                .to_string(),
            steps: steps(&[
                "Connect the first star to form the dipper's cup",
                "Connect the next star to continue the cup",
                "Connect the next star to complete the cup",
                "Connect the next star to start the handle",
                "Connect the next star to continue the handle",
                "Connect the final star to complete the handle",
            ]),
        },
        Constellation {
            name: "Orion".to_string(),
            level: 2,
            stars: pts(&[
                (250.0, 150.0),
                (300.0, 200.0),
                (350.0, 200.0),
                (400.0, 200.0),
                (450.0, 150.0),
                (250.0, 300.0),
                (450.0, 300.0),
            ]),
            links: links(&[(0, 1), (1, 2), (2, 3), (3, 4), (0, 5), (4, 6)]),
            story: "Orion was a mighty hunter in Greek myth. Three bright stars in the middle \
                    form his belt."
                .to_string(),
            steps: steps(&[
                "Connect the left shoulder to the belt",
                "Connect the three stars to form Orion's belt",
                "Connect the right shoulder",
                "Connect the left leg",
                "Connect the right leg",
            ]),
        },
    ]
}

/// Result of a click on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the cursor
    Missed,
    /// First star of a pair picked
    Selected(usize),
    /// Second star formed a new valid link
    Linked(Link),
    /// Second star did not form a new valid link; selection cleared
    Rejected,
}

/// Result of asking whether the level is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Some links still missing
    Incomplete { missing: usize },
    /// Done; the next level is now loaded
    Advanced { level: u32 },
    /// Done, and it was the last level
    Finished,
}

/// Puzzle session over a list of levels
#[derive(Debug, Clone)]
pub struct ConstellationPuzzle {
    levels: Vec<Constellation>,
    current: usize,
    links: Vec<Link>,
    selected: Option<usize>,
    show_hint: bool,
}

impl Default for ConstellationPuzzle {
    fn default() -> Self {
        Self::new(builtin_levels())
    }
}

impl ConstellationPuzzle {
    pub fn new(levels: Vec<Constellation>) -> Self {
        Self {
            levels,
            current: 0,
            links: Vec::new(),
            selected: None,
            show_hint: false,
        }
    }

    /// Current level, or `None` if there are no levels
    pub fn constellation(&self) -> Option<&Constellation> {
        self.levels.get(self.current)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hint_visible(&self) -> bool {
        self.show_hint
    }

    pub fn toggle_hint(&mut self) {
        self.show_hint = !self.show_hint;
    }

    /// Handle a click at canvas coordinates
    pub fn click(&mut self, point: Vec2) -> ClickOutcome {
        let Some(constellation) = self.levels.get(self.current) else {
            return ClickOutcome::Missed;
        };
        let Some(star) = constellation.star_at(point) else {
            return ClickOutcome::Missed;
        };

        let Some(first) = self.selected.take() else {
            self.selected = Some(star);
            return ClickOutcome::Selected(star);
        };

        let link = Link::new(first, star);
        if first != star && constellation.has_link(link) && !self.links.contains(&link) {
            self.links.push(link);
            ClickOutcome::Linked(link)
        } else {
            ClickOutcome::Rejected
        }
    }

    /// Check whether every link is in place; advance if so
    pub fn check_completion(&mut self) -> Completion {
        let Some(constellation) = self.levels.get(self.current) else {
            return Completion::Finished;
        };
        let missing = constellation
            .links
            .iter()
            .filter(|link| !self.links.contains(*link))
            .count();
        if missing > 0 {
            return Completion::Incomplete { missing };
        }

        log::info!("Completed constellation {}", constellation.name);
        if self.current + 1 < self.levels.len() {
            self.current += 1;
            self.links.clear();
            self.selected = None;
            let level = self.levels[self.current].level;
            Completion::Advanced { level }
        } else {
            Completion::Finished
        }
    }

    /// Drop all links and the selection on the current level
    pub fn reset_level(&mut self) {
        self.links.clear();
        self.selected = None;
    }
}
