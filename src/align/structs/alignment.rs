use serde::{Deserialize, Serialize};

pub const NUM_HMM_STATES: usize = 3;

/// The three per-position states of the profile:
///
/// * `Match` consumes one event and advances one k-mer.
/// * `EventSplit` consumes one event and stays at the same k-mer,
///   modeling a kinetic stall that split one k-mer across several
///   consecutive events.
/// * `KmerSkip` consumes no event and advances one k-mer, modeling a
///   k-mer that moved through the pore too quickly to be sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum HmmState {
    Match = 0,
    EventSplit = 1,
    KmerSkip = 2,
}

impl HmmState {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => HmmState::Match,
            1 => HmmState::EventSplit,
            2 => HmmState::KmerSkip,
            _ => panic!("no such profile state: {index}"),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            HmmState::Match => 'M',
            HmmState::EventSplit => 'E',
            HmmState::KmerSkip => 'K',
        }
    }
}

/// One cell of a decoded Viterbi path.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct AlignmentStep {
    /// Index of the consumed event in the read's event trace
    pub event_idx: usize,
    /// Index of the k-mer in the candidate sequence
    pub kmer_idx: usize,
    pub state: HmmState,
    /// The cumulative log score of the Viterbi matrix at this cell
    pub score: f32,
}

impl std::fmt::Debug for AlignmentStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{}> e: {} k: {} ({:.3})",
            self.state.to_char(),
            self.event_idx,
            self.kmer_idx,
            self.score,
        )
    }
}
