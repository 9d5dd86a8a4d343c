//! Sampling zones along the sun-approach line
//!
//! The zone set is fixed: six slots at 20-mile steps from the observer. Which
//! zones obstruct the view and which colour the light is defined once here
//! and shared by the sampler, the rating engine and the impact mapper.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distance bucket along the line toward the sun event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "0miles")]
    Miles0,
    #[serde(rename = "20miles")]
    Miles20,
    #[serde(rename = "40miles")]
    Miles40,
    #[serde(rename = "60miles")]
    Miles60,
    #[serde(rename = "80miles")]
    Miles80,
    #[serde(rename = "100miles")]
    Miles100,
}

/// How a zone participates in scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reach {
    /// Observer side, clouds here block the view
    Near,
    /// Toward the horizon, clouds here catch colour
    Far,
    /// Boundary sample, reported but never scored
    Reference,
}

impl Zone {
    pub const COUNT: usize = 6;

    /// All zones in order of increasing distance
    pub const ALL: [Zone; Zone::COUNT] = [
        Zone::Miles0,
        Zone::Miles20,
        Zone::Miles40,
        Zone::Miles60,
        Zone::Miles80,
        Zone::Miles100,
    ];

    #[must_use]
    pub fn distance_miles(self) -> f64 {
        match self {
            Zone::Miles0 => 0.0,
            Zone::Miles20 => 20.0,
            Zone::Miles40 => 40.0,
            Zone::Miles60 => 60.0,
            Zone::Miles80 => 80.0,
            Zone::Miles100 => 100.0,
        }
    }

    #[must_use]
    pub fn reach(self) -> Reach {
        match self {
            Zone::Miles0 | Zone::Miles20 | Zone::Miles40 => Reach::Near,
            Zone::Miles60 | Zone::Miles80 => Reach::Far,
            Zone::Miles100 => Reach::Reference,
        }
    }

    #[must_use]
    pub fn is_near(self) -> bool {
        self.reach() == Reach::Near
    }

    #[must_use]
    pub fn is_far(self) -> bool {
        self.reach() == Reach::Far
    }

    /// Position of this zone in [`Zone::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Zones with the given reach, in distance order
    pub fn with_reach(reach: Reach) -> impl Iterator<Item = Zone> {
        Zone::ALL.into_iter().filter(move |zone| zone.reach() == reach)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}miles", self.distance_miles() as u32)
    }
}
