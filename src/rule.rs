//! Ruleset catalog for the automaton.
//!
//! Rules follow the birth/survival model on the Moore neighborhood: a
//! live cell survives when its live-neighbor count is in the survival
//! set, a dead cell is born when the count is in the birth set. The
//! catalog is closed: simulations can only select one of the entries
//! defined here, so every reachable rule has a stable key and a
//! human-readable name.

use crate::error::LifeError;
use std::fmt;
use std::str::FromStr;

/// Set of neighbor counts in `[0, 8]`, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NeighborSet(u16);

impl NeighborSet {
    const fn from_counts(counts: &[u8]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < counts.len() {
            assert!(counts[i] <= 8);
            mask |= 1 << counts[i];
            i += 1;
        }
        Self(mask)
    }

    const fn contains(self, count: u8) -> bool {
        count <= 8 && self.0 & (1 << count) != 0
    }

    fn counts(self) -> Vec<u8> {
        (0..=8).filter(|&n| self.contains(n)).collect()
    }
}

/// A named birth/survival rule.
///
/// Immutable by construction; engines refer to catalog entries and can
/// never hold a rule that is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ruleset {
    name: &'static str,
    survival: NeighborSet,
    birth: NeighborSet,
}

impl Ruleset {
    const fn new(name: &'static str, survival: &[u8], birth: &[u8]) -> Self {
        Self {
            name,
            survival: NeighborSet::from_counts(survival),
            birth: NeighborSet::from_counts(birth),
        }
    }

    /// Human-readable name, e.g. `"Classic (B3/S23)"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when a live cell with `neighbors` live neighbors stays alive.
    pub fn survives(&self, neighbors: u8) -> bool {
        self.survival.contains(neighbors)
    }

    /// True when a dead cell with `neighbors` live neighbors comes alive.
    pub fn born(&self, neighbors: u8) -> bool {
        self.birth.contains(neighbors)
    }

    /// Next state of one cell under this rule.
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survives(neighbors)
        } else {
            self.born(neighbors)
        }
    }

    /// Neighbor counts that let a live cell survive, ascending.
    pub fn survival_counts(&self) -> Vec<u8> {
        self.survival.counts()
    }

    /// Neighbor counts that bring a dead cell to life, ascending.
    pub fn birth_counts(&self) -> Vec<u8> {
        self.birth.counts()
    }

    /// Birth/survival rulestring, e.g. `"B3/S23"`.
    pub fn notation(&self) -> String {
        let digits = |set: NeighborSet| {
            set.counts()
                .iter()
                .map(|n| n.to_string())
                .collect::<String>()
        };
        format!("B{}/S{}", digits(self.birth), digits(self.survival))
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const CLASSIC: Ruleset = Ruleset::new("Classic (B3/S23)", &[2, 3], &[3]);
const HIGH_LIFE: Ruleset = Ruleset::new("High Life (B36/S23)", &[2, 3], &[3, 6]);
const DAY_AND_NIGHT: Ruleset =
    Ruleset::new("Day & Night (B3678/S34678)", &[3, 4, 6, 7, 8], &[3, 6, 7, 8]);
const SEEDS: Ruleset = Ruleset::new("Seeds (B2/)", &[], &[2]);

/// Key identifying one entry of the ruleset catalog.
///
/// Keys are what configuration files and UI layers pass around; the
/// rule definitions themselves stay internal to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RulesetKey {
    Classic,
    HighLife,
    DayAndNight,
    Seeds,
}

impl Default for RulesetKey {
    fn default() -> Self {
        Self::Classic
    }
}

impl RulesetKey {
    /// Every catalog entry, in presentation order.
    pub const ALL: [RulesetKey; 4] = [
        Self::Classic,
        Self::HighLife,
        Self::DayAndNight,
        Self::Seeds,
    ];

    /// Stable lookup key as exposed to UI layers and config files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::HighLife => "highLife",
            Self::DayAndNight => "dayAndNight",
            Self::Seeds => "seeds",
        }
    }

    /// Display name for presentation lists.
    pub fn display_name(&self) -> &'static str {
        self.rules().name()
    }

    /// The rule definition behind this key.
    pub fn rules(&self) -> &'static Ruleset {
        match self {
            Self::Classic => &CLASSIC,
            Self::HighLife => &HIGH_LIFE,
            Self::DayAndNight => &DAY_AND_NIGHT,
            Self::Seeds => &SEEDS,
        }
    }

    /// Resolve a B/S rulestring (e.g. `"B3/S23"`) to a catalog entry,
    /// if one matches. Used when importing patterns that declare their
    /// own rule.
    pub fn from_notation(notation: &str) -> Option<Self> {
        let (birth, survival) = parse_notation(notation)?;
        Self::ALL.into_iter().find(|key| {
            let rules = key.rules();
            rules.birth == birth && rules.survival == survival
        })
    }
}

impl fmt::Display for RulesetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RulesetKey {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "highLife" => Ok(Self::HighLife),
            "dayAndNight" => Ok(Self::DayAndNight),
            "seeds" => Ok(Self::Seeds),
            _ => Err(LifeError::UnknownRuleset(s.to_string())),
        }
    }
}

/// The catalog as `(key, display name)` pairs, in presentation order.
pub fn catalog() -> impl Iterator<Item = (RulesetKey, &'static str)> {
    RulesetKey::ALL
        .into_iter()
        .map(|key| (key, key.display_name()))
}

fn parse_notation(notation: &str) -> Option<(NeighborSet, NeighborSet)> {
    let (birth_part, survival_part) = notation.trim().split_once('/')?;
    let birth_digits = birth_part
        .strip_prefix('B')
        .or_else(|| birth_part.strip_prefix('b'))?;
    let survival_digits = survival_part
        .strip_prefix('S')
        .or_else(|| survival_part.strip_prefix('s'))
        .unwrap_or(survival_part);

    let to_set = |digits: &str| -> Option<NeighborSet> {
        let mut mask = 0u16;
        for ch in digits.chars() {
            let count = ch.to_digit(10)?;
            if count > 8 {
                return None;
            }
            mask |= 1 << count;
        }
        Some(NeighborSet(mask))
    };

    Some((to_set(birth_digits)?, to_set(survival_digits)?))
}
