//! Shared fixtures for the HMM tests: a deterministic pore model, reads
//! built from raw level traces, and path-consistency checks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::align::structs::{AlignmentStep, EventWindow, HmmState};
use crate::alphabet::NUM_KMERS;
use crate::structs::{
    Calibration, Event, PoreModel, PoreModelState, Sequence, SquiggleRead, StateTransitions,
};

pub const MODEL_BASE_LEVEL: f32 = 50.0;
pub const MODEL_LEVEL_STEP: f32 = 0.1;
pub const MODEL_LEVEL_STDV: f32 = 1.0;

/// The level mean the test pore model assigns to a k-mer rank.
pub fn model_mean_for_rank(rank: usize) -> f32 {
    MODEL_BASE_LEVEL + rank as f32 * MODEL_LEVEL_STEP
}

/// A pore model whose level means fan out by rank, so that different
/// k-mers are distinguishable from the signal.
pub fn test_pore_model() -> PoreModel {
    let states = (0..NUM_KMERS)
        .map(|rank| PoreModelState {
            level_mean: model_mean_for_rank(rank),
            level_stdv: MODEL_LEVEL_STDV,
            sd_mean: 1.0,
            sd_stdv: 0.5,
        })
        .collect();
    PoreModel::new(states, Calibration::default())
}

/// A template-strand read whose events carry the given levels.
pub fn read_from_levels(levels: &[f32]) -> SquiggleRead {
    let events: Vec<Event> = levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Event {
            mean: level,
            stdv: 1.0,
            start: i as f32 * 0.01,
            duration: 0.01,
        })
        .collect();
    SquiggleRead::new([events, vec![]], [test_pore_model(), test_pore_model()])
}

/// A random candidate sequence and a read whose events walk its k-mers
/// in order, re-emitting the final k-mer once the sequence runs out.
pub fn synthetic_input(n_events: usize, seq_len: usize) -> (Sequence, SquiggleRead, EventWindow) {
    let mut rng = Pcg64::seed_from_u64(0x5eed);
    let sequence = Sequence::random_dna(seq_len, &mut rng);
    let n_kmers = sequence.kmer_count();

    let levels: Vec<f32> = (0..n_events)
        .map(|i| {
            let kmer_idx = i.min(n_kmers - 1);
            let jitter = rng.gen_range(-0.25..0.25);
            model_mean_for_rank(sequence.kmer_rank(kmer_idx)) + jitter
        })
        .collect();

    let read = read_from_levels(&levels);
    let window = EventWindow::forward(0, n_events - 1);
    (sequence, read, window)
}

/// Transitions that favor match moves but leave every state reachable.
pub fn match_friendly_transitions() -> StateTransitions {
    StateTransitions::from_probabilities([
        [0.90, 0.05, 0.05],
        [0.90, 0.05, 0.05],
        [0.90, 0.05, 0.05],
    ])
}

/// A standard normal draw via Box-Muller.
pub fn sample_standard_normal(rng: &mut impl Rng) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

/// Re-derive every backtrack decision from the recorded event and k-mer
/// indices: consecutive steps must be related by exactly the move their
/// state allows.
pub fn assert_path_consistent(alignment: &[AlignmentStep], window: &EventWindow) {
    let offset_of = |event_idx: usize| {
        (0..window.event_count())
            .find(|&o| window.event_at(o) == event_idx)
            .unwrap()
    };

    for pair in alignment.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        // k-mer indices never decrease along the path
        assert!(curr.kmer_idx >= prev.kmer_idx);

        let kmer_delta = curr.kmer_idx - prev.kmer_idx;
        let event_delta = offset_of(curr.event_idx) as isize - offset_of(prev.event_idx) as isize;

        match curr.state {
            HmmState::Match => {
                assert_eq!(event_delta, 1);
                assert_eq!(kmer_delta, 1);
            }
            HmmState::EventSplit => {
                assert_eq!(event_delta, 1);
                assert_eq!(kmer_delta, 0);
            }
            HmmState::KmerSkip => {
                assert_eq!(event_delta, 0);
                assert_eq!(kmer_delta, 1);
            }
        }
    }
}
