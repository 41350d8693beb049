//! Named entities of a tournament: players, localizations and timeslots.

use std::cmp::Ordering;
use std::fmt;

/// A participant of an event.
///
/// Two players are the same player when their names are equal, which is how
/// a player taking part in several events is recognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A court, field or venue where a match takes place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Localization {
    name: String,
}

impl Localization {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A schedulable unit of time.
///
/// Timeslots are totally ordered by their chronological order: a lower value
/// happens earlier. The optional label only breaks ties and names the slot
/// when schedules are displayed.
///
/// # Examples
///
/// ```
/// use courtforge_core::Timeslot;
///
/// let morning = Timeslot::labelled(0, "09:00");
/// let noon = Timeslot::generic(1);
///
/// assert!(morning < noon);
/// assert_eq!(morning.to_string(), "09:00");
/// assert_eq!(noon.to_string(), "t1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeslot {
    chronological_order: i32,
    label: Option<String>,
}

impl Timeslot {
    /// Creates an unlabelled timeslot.
    pub fn generic(chronological_order: i32) -> Self {
        Self {
            chronological_order,
            label: None,
        }
    }

    /// Creates a timeslot with a display label such as `"Sat 10:00"`.
    pub fn labelled(chronological_order: i32, label: impl Into<String>) -> Self {
        Self {
            chronological_order,
            label: Some(label.into()),
        }
    }

    #[inline]
    pub fn chronological_order(&self) -> i32 {
        self.chronological_order
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns true if this slot happens strictly before `other`.
    pub fn is_before(&self, other: &Timeslot) -> bool {
        self < other
    }
}

impl Ord for Timeslot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chronological_order
            .cmp(&other.chronological_order)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for Timeslot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => f.write_str(label),
            None => write!(f, "t{}", self.chronological_order),
        }
    }
}

/// Creates `count` players named `Player 1` .. `Player n`.
pub fn players(count: usize) -> Vec<Player> {
    (1..=count).map(|i| Player::new(format!("Player {i}"))).collect()
}

/// Creates `count` localizations named `Court 1` .. `Court n`.
pub fn localizations(count: usize) -> Vec<Localization> {
    (1..=count)
        .map(|i| Localization::new(format!("Court {i}")))
        .collect()
}

/// Creates `count` generic timeslots with chronological orders `0..count`.
pub fn timeslots(count: usize) -> Vec<Timeslot> {
    (0..count as i32).map(Timeslot::generic).collect()
}
