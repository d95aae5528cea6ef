use serde::{Deserialize, Serialize};

use crate::align::training::TrainingData;
use crate::structs::PoreModel;

pub const NUM_STRANDS: usize = 2;

/// The two strands of a 2D nanopore read. Each strand carries its own
/// event trace, pore model and training accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    Template,
    Complement,
}

impl Strand {
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Strand::Template => 0,
            Strand::Complement => 1,
        }
    }
}

/// One discretized observation of electrical current over a short
/// time window.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Event {
    /// Mean current level (pA)
    pub mean: f32,
    /// Current level spread within the event
    pub stdv: f32,
    /// Start time of the event, in seconds from the start of the read
    pub start: f32,
    /// Duration of the event, in seconds
    pub duration: f32,
}

/// One sequencing read: the per-strand event traces together with the
/// calibrated pore models and the per-strand training accumulators that
/// the external re-estimation loop merges.
pub struct SquiggleRead {
    pub events: [Vec<Event>; NUM_STRANDS],
    pub pore_model: [PoreModel; NUM_STRANDS],
    pub training: [TrainingData; NUM_STRANDS],
}

impl SquiggleRead {
    pub fn new(events: [Vec<Event>; NUM_STRANDS], pore_model: [PoreModel; NUM_STRANDS]) -> Self {
        SquiggleRead {
            events,
            pore_model,
            training: [TrainingData::default(), TrainingData::default()],
        }
    }

    /// The observed current level at an event, with the per-read baseline
    /// drift subtracted out.
    #[inline]
    pub fn drift_corrected_level(&self, event_idx: usize, strand: Strand) -> f32 {
        let event = &self.events[strand.index()][event_idx];
        event.mean - self.pore_model[strand.index()].calibration.drift * event.start
    }

    /// The raw current spread at an event.
    #[inline]
    pub fn event_stdv(&self, event_idx: usize, strand: Strand) -> f32 {
        self.events[strand.index()][event_idx].stdv
    }

    /// The duration of an event, in seconds.
    #[inline]
    pub fn event_duration(&self, event_idx: usize, strand: Strand) -> f32 {
        self.events[strand.index()][event_idx].duration
    }
}
