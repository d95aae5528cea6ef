use crate::align::emission::{log_probability_event_insert, log_probability_match};
use crate::align::structs::{
    state_col, BacktrackMatrix, FloatMatrix, HmmInput, HmmState, NUM_HMM_STATES,
};
use crate::log_sum;
use crate::max_f32;
use crate::structs::{Sequence, TransitionModel};
use crate::util::log_add;

/// How a filled cell combines its candidate predecessor scores.
///
/// The recurrence is written once; the two passes differ only in whether
/// a cell sums its predecessors in log space (forward) or takes the
/// maximum and remembers where it came from (Viterbi).
pub trait FillOutput {
    /// Combine the per-predecessor-state scores for a cell, add the
    /// emission, and store the result.
    fn update(&mut self, row: usize, col: usize, scores: [f32; NUM_HMM_STATES], lp_emission: f32);

    fn score(&self, row: usize, col: usize) -> f32;
}

/// Sums predecessor probabilities via log-sum-exp. Writes no backtrack.
pub struct ForwardOutput<'a> {
    matrix: &'a mut FloatMatrix,
}

impl<'a> ForwardOutput<'a> {
    pub fn new(matrix: &'a mut FloatMatrix) -> Self {
        ForwardOutput { matrix }
    }
}

impl FillOutput for ForwardOutput<'_> {
    #[inline]
    fn update(&mut self, row: usize, col: usize, scores: [f32; NUM_HMM_STATES], lp_emission: f32) {
        let sum = log_sum!(scores[0], scores[1], scores[2]);
        self.matrix.set(row, col, sum + lp_emission);
    }

    #[inline]
    fn score(&self, row: usize, col: usize) -> f32 {
        self.matrix.get(row, col)
    }
}

/// Takes the maximum predecessor and records which state it was in.
pub struct ViterbiOutput<'a> {
    matrix: &'a mut FloatMatrix,
    backtrack: &'a mut BacktrackMatrix,
}

impl<'a> ViterbiOutput<'a> {
    pub fn new(matrix: &'a mut FloatMatrix, backtrack: &'a mut BacktrackMatrix) -> Self {
        ViterbiOutput { matrix, backtrack }
    }
}

impl FillOutput for ViterbiOutput<'_> {
    #[inline]
    fn update(&mut self, row: usize, col: usize, scores: [f32; NUM_HMM_STATES], lp_emission: f32) {
        let max = max_f32!(scores[0], scores[1], scores[2]);

        let mut arg: u8 = 0;
        for (from, &score) in scores.iter().enumerate() {
            if score == max {
                arg = from as u8;
                break;
            }
        }

        self.matrix.set(row, col, max + lp_emission);
        self.backtrack.set(row, col, arg);
    }

    #[inline]
    fn score(&self, row: usize, col: usize) -> f32 {
        self.matrix.get(row, col)
    }
}

/// Set up row 0 of a score matrix: nothing has been consumed yet, so
/// every cell is impossible except the match cell of the start block,
/// which holds log probability one.
pub fn initialize(matrix: &mut FloatMatrix) {
    for col in 0..matrix.n_cols {
        matrix.set(0, col, -f32::INFINITY);
    }
    matrix.set(0, state_col(0, HmmState::Match), 0.0);
}

/// Fill the score matrix for one read/strand against a candidate
/// sequence, driving the emission model once per event-consuming cell,
/// and return the score of the cell the alignment terminates in.
///
/// Every cell combines, through the output policy, the scores of the
/// three predecessor cells reachable by one allowed transition:
///
/// * match: previous row, previous block (one event, one k-mer)
/// * event split: previous row, same block (one event, no k-mer)
/// * k-mer skip: same row, previous block (no event, one k-mer)
///
/// Blocks are filled left to right within a row so that a skip cell can
/// see the current row of the preceding block.
pub fn fill_generic<O: FillOutput>(
    sequence: &Sequence,
    input: &HmmInput,
    transitions: &impl TransitionModel,
    output: &mut O,
) -> f32 {
    let n_kmers = sequence.kmer_count();
    let n_rows = input.window.event_count() + 1;

    for row in 1..n_rows {
        let event_idx = input.window.event_at(row - 1);

        for block in 1..=n_kmers {
            let kmer_idx = block - 1;
            let rank = sequence.kmer_rank(kmer_idx);

            // match: consume one event, advance one k-mer
            output.update(
                row,
                state_col(block, HmmState::Match),
                predecessors(
                    output,
                    row - 1,
                    block - 1,
                    HmmState::Match,
                    kmer_idx,
                    transitions,
                ),
                log_probability_match(input.read, input.strand, rank, event_idx, 1.0, 0.0),
            );

            // event split: consume one event, stay on this k-mer
            output.update(
                row,
                state_col(block, HmmState::EventSplit),
                predecessors(
                    output,
                    row - 1,
                    block,
                    HmmState::EventSplit,
                    kmer_idx,
                    transitions,
                ),
                log_probability_event_insert(input.read, input.strand, rank, event_idx),
            );

            // k-mer skip: consume nothing, advance one k-mer; reachable
            // purely through the transition structure, no emission
            output.update(
                row,
                state_col(block, HmmState::KmerSkip),
                predecessors(
                    output,
                    row,
                    block - 1,
                    HmmState::KmerSkip,
                    kmer_idx,
                    transitions,
                ),
                0.0,
            );
        }
    }

    // the alignment ends by leaving the match state of the last k-mer,
    // a transition we take with log probability zero
    output.score(n_rows - 1, state_col(n_kmers, HmmState::Match)) + LP_END_TRANSITION
}

/// The explicit end-of-sequence transition out of the final match state.
pub const LP_END_TRANSITION: f32 = 0.0;

#[inline]
fn predecessors<O: FillOutput>(
    output: &O,
    row: usize,
    block: usize,
    to: HmmState,
    kmer_idx: usize,
    transitions: &impl TransitionModel,
) -> [f32; NUM_HMM_STATES] {
    [
        output.score(row, state_col(block, HmmState::Match))
            + transitions.lp(HmmState::Match, to, kmer_idx),
        output.score(row, state_col(block, HmmState::EventSplit))
            + transitions.lp(HmmState::EventSplit, to, kmer_idx),
        output.score(row, state_col(block, HmmState::KmerSkip))
            + transitions.lp(HmmState::KmerSkip, to, kmer_idx),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::structs::num_cols;
    use crate::align::test_support::{match_friendly_transitions, synthetic_input};
    use crate::structs::StateTransitions;

    #[test]
    fn test_initialize() {
        let mut matrix = FloatMatrix::new(3, num_cols(2));
        initialize(&mut matrix);

        assert_eq!(matrix.get(0, state_col(0, HmmState::Match)), 0.0);
        assert_eq!(
            matrix.get(0, state_col(0, HmmState::EventSplit)),
            -f32::INFINITY
        );
        assert_eq!(matrix.get(0, state_col(1, HmmState::Match)), -f32::INFINITY);
    }

    #[test]
    fn test_forward_and_viterbi_agree_on_reachability() {
        let (sequence, read, window) = synthetic_input(8, 6);
        let input = HmmInput::new(&read, crate::structs::Strand::Template, window);
        let transitions = match_friendly_transitions();

        let n_rows = input.window.event_count() + 1;
        let cols = num_cols(sequence.kmer_count());

        let mut fm = FloatMatrix::new(n_rows, cols);
        initialize(&mut fm);
        let forward_score = {
            let mut output = ForwardOutput::new(&mut fm);
            fill_generic(&sequence, &input, &transitions, &mut output)
        };

        let mut vm = FloatMatrix::new(n_rows, cols);
        let mut bm = BacktrackMatrix::new(n_rows, cols);
        initialize(&mut vm);
        let viterbi_score = {
            let mut output = ViterbiOutput::new(&mut vm, &mut bm);
            fill_generic(&sequence, &input, &transitions, &mut output)
        };

        // a cell is reachable under one pass iff it is reachable under
        // the other, and the forward sum dominates the single best path
        for row in 0..n_rows {
            for col in 0..cols {
                assert_eq!(
                    fm.get(row, col) == -f32::INFINITY,
                    vm.get(row, col) == -f32::INFINITY
                );
                assert!(fm.get(row, col) >= vm.get(row, col));
            }
        }
        assert!(forward_score >= viterbi_score);
        assert!(!forward_score.is_nan());
    }

    #[test]
    fn test_impossible_transitions_propagate() {
        let (sequence, read, window) = synthetic_input(4, 6);
        let input = HmmInput::new(&read, crate::structs::Strand::Template, window);

        // only match transitions allowed: skips and splits stay at -inf
        let transitions = StateTransitions::from_probabilities([
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ]);

        let n_rows = input.window.event_count() + 1;
        let cols = num_cols(sequence.kmer_count());
        let mut fm = FloatMatrix::new(n_rows, cols);
        initialize(&mut fm);
        let mut output = ForwardOutput::new(&mut fm);
        let score = fill_generic(&sequence, &input, &transitions, &mut output);

        for row in 1..n_rows {
            for block in 1..=sequence.kmer_count() {
                assert_eq!(
                    fm.get(row, state_col(block, HmmState::EventSplit)),
                    -f32::INFINITY
                );
                assert_eq!(
                    fm.get(row, state_col(block, HmmState::KmerSkip)),
                    -f32::INFINITY
                );
            }
        }

        // 4 events over 2 k-mers cannot be an all-match path
        assert_eq!(score, -f32::INFINITY);
    }
}
