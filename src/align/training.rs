use serde::{Deserialize, Serialize};

use crate::align::structs::{AlignmentStep, EventWindow, HmmInput, HmmState, NUM_HMM_STATES};
use crate::align::{viterbi::align, AlignmentError};
use crate::structs::{PoreModel, Sequence, SquiggleRead, Strand, TransitionModel};

/// Entries this close to either end of a decoded path are left out of
/// the statistics; alignments are unreliable near their boundaries.
pub const EDGE_TRIM: usize = 5;

/// One observed k-mer-to-k-mer move: the calibrated model levels either
/// side of the transition and the state that produced it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KmerTransitionObservation {
    pub from_level_mean: f32,
    pub to_level_mean: f32,
    pub state: HmmState,
}

/// Per-strand sufficient statistics for re-estimating a read's signal
/// model. One training pass over one read fills this; the external EM
/// loop merges accumulators across reads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrainingData {
    /// State tallies over the entire path, untrimmed
    pub n_matches: u32,
    pub n_merges: u32,
    pub n_skips: u32,
    pub kmer_transitions: Vec<KmerTransitionObservation>,
    /// Normalized residuals (level - mean) / stdv for match states
    pub match_emissions: Vec<f32>,
    /// Counts of state-to-state moves between retained entries
    pub state_transitions: [[u32; NUM_HMM_STATES]; NUM_HMM_STATES],
}

impl TrainingData {
    /// Fold a decoded path into the accumulator. `levels` holds the
    /// drift-corrected level for each path entry's event.
    pub fn accumulate(
        &mut self,
        alignment: &[AlignmentStep],
        levels: &[f32],
        sequence: &Sequence,
        pore_model: &PoreModel,
    ) {
        debug_assert_eq!(alignment.len(), levels.len());
        let n_kmers = sequence.kmer_count();
        let mut prev_state = HmmState::Match;

        for (pi, step) in alignment.iter().enumerate() {
            if pi >= EDGE_TRIM && pi + EDGE_TRIM < alignment.len() {
                // no k-mer move is made in an event-split state, so it
                // contributes no transition observation
                if step.state != HmmState::EventSplit {
                    let from = alignment[pi - 1].kmer_idx;
                    let to = if step.state == HmmState::KmerSkip {
                        // record only the first k-mer of a multi-skip
                        // run, to avoid biasing toward long skips
                        from + 1
                    } else {
                        step.kmer_idx
                    };

                    assert!(
                        from < n_kmers && to < n_kmers,
                        "k-mer transition {from} -> {to} is outside the candidate range \
                         (path entry {pi}, {n_kmers} k-mers)"
                    );

                    let level_1 = pore_model.scaled_parameters(sequence.kmer_rank(from));
                    let level_2 = pore_model.scaled_parameters(sequence.kmer_rank(to));

                    self.kmer_transitions.push(KmerTransitionObservation {
                        from_level_mean: level_1.mean,
                        to_level_mean: level_2.mean,
                        state: step.state,
                    });
                }

                self.state_transitions[prev_state as usize][step.state as usize] += 1;

                assert!(
                    step.kmer_idx < n_kmers,
                    "decoded k-mer index {} is outside the candidate range \
                     (path entry {pi}, event {}, {n_kmers} k-mers)",
                    step.kmer_idx,
                    step.event_idx,
                );

                let model = pore_model.scaled_parameters(sequence.kmer_rank(step.kmer_idx));
                let norm_level = (levels[pi] - model.mean) / model.stdv;

                if step.state == HmmState::Match {
                    self.match_emissions.push(norm_level);
                }

                prev_state = step.state;
            }

            self.n_matches += (step.state == HmmState::Match) as u32;
            self.n_merges += (step.state == HmmState::EventSplit) as u32;
            self.n_skips += (step.state == HmmState::KmerSkip) as u32;
        }
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &TrainingData) {
        self.n_matches += other.n_matches;
        self.n_merges += other.n_merges;
        self.n_skips += other.n_skips;
        self.kmer_transitions
            .extend_from_slice(&other.kmer_transitions);
        self.match_emissions.extend_from_slice(&other.match_emissions);
        for from in 0..NUM_HMM_STATES {
            for to in 0..NUM_HMM_STATES {
                self.state_transitions[from][to] += other.state_transitions[from][to];
            }
        }
    }
}

/// Decode the best alignment of the candidate against one read/strand
/// and fold it into that strand's training accumulator.
pub fn update_training(
    sequence: &Sequence,
    read: &mut SquiggleRead,
    strand: Strand,
    window: EventWindow,
    transitions: &impl TransitionModel,
) -> Result<(), AlignmentError> {
    let alignment = align(sequence, &HmmInput::new(read, strand, window), transitions)?;

    let levels: Vec<f32> = alignment
        .iter()
        .map(|step| read.drift_corrected_level(step.event_idx, strand))
        .collect();

    let strand_idx = strand.index();
    let pore_model = &read.pore_model[strand_idx];
    let training = &mut read.training[strand_idx];

    training.accumulate(&alignment, &levels, sequence, pore_model);
    Ok(())
}
