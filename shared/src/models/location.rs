//! Storage location codes
//!
//! Codes look like `P2-A-01`: the aisle token (`P2`) comes before the first
//! dash and the rack type (`A`) is the second segment. Codes are compared in
//! upper case everywhere.

use serde::{Deserialize, Serialize};

/// Aisle letters that take part in the bin and optimizer views
pub const RECOGNIZED_AISLES: [char; 5] = ['P', 'Q', 'R', 'S', 'T'];

/// Which side of the aisle a location sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Left,
    Right,
    /// The aisle token carries no digits, so parity cannot be computed
    Unknown,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
            Side::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized (trimmed, upper-cased) location code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCode(String);

impl LocationCode {
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment before the first dash, e.g. `P2`
    pub fn aisle(&self) -> &str {
        self.segment(0)
    }

    /// First character of the aisle token
    pub fn aisle_letter(&self) -> Option<char> {
        self.aisle().chars().next()
    }

    /// Second dash-delimited segment; empty when the code has no rack part
    pub fn rack_type(&self) -> &str {
        self.segment(1)
    }

    /// Even aisle numbers are on the right, odd on the left.
    ///
    /// All digits in the aisle token form the aisle number, so only the last
    /// digit matters for parity.
    pub fn side(&self) -> Side {
        match self.aisle().chars().filter(char::is_ascii_digit).last() {
            Some(digit) => {
                let value = digit.to_digit(10).unwrap_or(0);
                if value % 2 == 0 {
                    Side::Right
                } else {
                    Side::Left
                }
            }
            None => Side::Unknown,
        }
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split('-').nth(index).unwrap_or("")
    }
}

impl std::fmt::Display for LocationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The configured set of aisle letters the reports cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AisleSet {
    letters: Vec<char>,
}

impl AisleSet {
    pub fn new<I>(letters: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut letters: Vec<char> = letters
            .into_iter()
            .map(|c| c.to_ascii_uppercase())
            .collect();
        letters.sort_unstable();
        letters.dedup();
        Self { letters }
    }

    /// Build from configuration strings such as `["P", "Q"]`
    pub fn from_strings(values: &[String]) -> Self {
        Self::new(values.iter().filter_map(|v| v.trim().chars().next()))
    }

    pub fn contains_letter(&self, letter: char) -> bool {
        self.letters.contains(&letter.to_ascii_uppercase())
    }

    /// Whether a location belongs to a recognized aisle
    pub fn covers(&self, location: &LocationCode) -> bool {
        location
            .aisle_letter()
            .is_some_and(|letter| self.contains_letter(letter))
    }

    pub fn letters(&self) -> Vec<String> {
        self.letters.iter().map(char::to_string).collect()
    }
}

impl Default for AisleSet {
    fn default() -> Self {
        Self::new(RECOGNIZED_AISLES)
    }
}
