use crate::align::structs::{HmmState, NUM_HMM_STATES};
use crate::util::LogAbuse;

/// Log transition probabilities between the three profile states,
/// keyed by the k-mer position the transition lands on.
///
/// The core treats this as an opaque per-read lookup; how the
/// probabilities are estimated is the concern of the external
/// re-estimation loop.
pub trait TransitionModel {
    fn lp(&self, from: HmmState, to: HmmState, kmer_idx: usize) -> f32;
}

/// A position-independent transition table.
#[derive(Clone, Debug)]
pub struct StateTransitions {
    lp: [[f32; NUM_HMM_STATES]; NUM_HMM_STATES],
}

impl StateTransitions {
    /// All transitions equally likely.
    pub fn uniform() -> Self {
        let lp = (1.0f32 / NUM_HMM_STATES as f32).ln();
        StateTransitions {
            lp: [[lp; NUM_HMM_STATES]; NUM_HMM_STATES],
        }
    }

    /// Build from probabilities, row per from-state, column per to-state.
    /// Zero probabilities become -inf, which the fill engine treats as
    /// "impossible", not as an error.
    pub fn from_probabilities(p: [[f32; NUM_HMM_STATES]; NUM_HMM_STATES]) -> Self {
        let mut lp = [[0.0f32; NUM_HMM_STATES]; NUM_HMM_STATES];
        for from in 0..NUM_HMM_STATES {
            for to in 0..NUM_HMM_STATES {
                lp[from][to] = p[from][to].ln_or_inf();
            }
        }
        StateTransitions { lp }
    }
}

impl TransitionModel for StateTransitions {
    #[inline]
    fn lp(&self, from: HmmState, to: HmmState, _kmer_idx: usize) -> f32 {
        self.lp[from as usize][to as usize]
    }
}
