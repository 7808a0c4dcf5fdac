//! Hour-by-hour alibi timelines
//!
//! A suspect's claimed whereabouts, one slot per hour of the day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last valid hour of the day (24h clock)
pub const LAST_HOUR: u8 = 23;

/// One hour of a suspect's claimed whereabouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub hour: u8,
    pub location: String,          // Opaque location key, e.g. "downtown_office"
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub witnesses: Vec<String>,    // People who can vouch, in authored order
}

impl TimeSlot {
    pub fn new(hour: u8, location: &str, activity: &str) -> Self {
        Self {
            hour,
            location: location.to_string(),
            activity: activity.to_string(),
            witnesses: Vec::new(),
        }
    }

    pub fn with_witnesses(mut self, witnesses: &[&str]) -> Self {
        self.witnesses = witnesses.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn has_witnesses(&self) -> bool {
        !self.witnesses.is_empty()
    }
}

/// Why a list of slots cannot form a timeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    #[error("alibi hour {0} is outside 0-23")]
    HourOutOfRange(u8),

    #[error("alibi timeline has more than one slot for hour {0}")]
    DuplicateHour(u8),
}

/// A suspect's claimed timeline, keyed by hour.
///
/// Hours need not be contiguous or cover the whole day. Serialized as a plain
/// JSON array of slots in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimeSlot>", into = "Vec<TimeSlot>")]
pub struct Timeline {
    slots: BTreeMap<u8, TimeSlot>,
}

impl Timeline {
    /// The slot claimed for an hour, if any
    pub fn at(&self, hour: u8) -> Option<&TimeSlot> {
        self.slots.get(&hour)
    }

    /// Slots in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.values()
    }

    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl TryFrom<Vec<TimeSlot>> for Timeline {
    type Error = TimelineError;

    fn try_from(slots: Vec<TimeSlot>) -> Result<Self, Self::Error> {
        let mut map = BTreeMap::new();
        for slot in slots {
            if slot.hour > LAST_HOUR {
                return Err(TimelineError::HourOutOfRange(slot.hour));
            }
            let hour = slot.hour;
            if map.insert(hour, slot).is_some() {
                return Err(TimelineError::DuplicateHour(hour));
            }
        }
        Ok(Self { slots: map })
    }
}

impl From<Timeline> for Vec<TimeSlot> {
    fn from(timeline: Timeline) -> Self {
        timeline.slots.into_values().collect()
    }
}
