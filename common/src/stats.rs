use serde::{Deserialize, Serialize};

use crate::submission::{Attendance, RsvpSubmission, WeddingEvent};

/// Per-ceremony attendance counters. Every RSVP that lists an event counts
/// toward it, regardless of attendance answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub haldi: u32,
    pub mehandi: u32,
    pub wedding: u32,
}

/// Aggregate view over all RSVP submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpStats {
    pub total: u32,
    pub attending: u32,
    pub not_attending: u32,
    pub maybe: u32,
    /// Sum of guest counts over attendance=yes entries only.
    pub total_guests: u32,
    pub events: EventCounts,
}

impl RsvpStats {
    pub fn from_submissions(rsvps: &[RsvpSubmission]) -> Self {
        let mut stats = RsvpStats {
            total: rsvps.len() as u32,
            ..Default::default()
        };
        for rsvp in rsvps {
            match rsvp.attendance {
                Attendance::Yes => {
                    stats.attending += 1;
                    stats.total_guests += rsvp.guest_count_value();
                }
                Attendance::No => stats.not_attending += 1,
                Attendance::Maybe => stats.maybe += 1,
            }
            for event in &rsvp.events {
                match event {
                    WeddingEvent::Haldi => stats.events.haldi += 1,
                    WeddingEvent::Mehandi => stats.events.mehandi += 1,
                    WeddingEvent::Wedding => stats.events.wedding += 1,
                }
            }
        }
        stats
    }
}
