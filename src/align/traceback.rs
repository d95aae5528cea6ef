use crate::align::structs::{
    state_col, AlignmentStep, BacktrackMatrix, EventWindow, FloatMatrix, HmmState, NUM_HMM_STATES,
};

/// Walk the backtrack matrix from the terminal cell to the origin and
/// reconstruct the optimal path.
///
/// Decoding starts at the last event row in the match sub-column of the
/// last real sequence-position block, and walks predecessors until all
/// events are accounted for. The row strictly decreases on match and
/// event-split moves and the block strictly decreases on skip moves, so
/// the walk is bounded by rows + blocks. Entries come out terminal-first
/// and are reversed before returning.
pub fn traceback(
    matrix: &FloatMatrix,
    backtrack: &BacktrackMatrix,
    n_kmers: usize,
    window: &EventWindow,
) -> Vec<AlignmentStep> {
    let mut alignment: Vec<AlignmentStep> = vec![];

    let mut row = matrix.n_rows - 1;
    let mut col = state_col(n_kmers, HmmState::Match);

    while row > 0 {
        let mut block = col / NUM_HMM_STATES;
        assert!(block > 0, "traceback reached the start block early");
        assert!(
            matrix.get(row, col) != -f32::INFINITY,
            "traceback entered an unreachable cell at row {row}, col {col}"
        );

        let state = HmmState::from_index(col % NUM_HMM_STATES);

        alignment.push(AlignmentStep {
            event_idx: window.event_at(row - 1),
            kmer_idx: block - 1,
            state,
            score: matrix.get(row, col),
        });

        // the state of the optimal predecessor is stored in the
        // backtrack matrix for the current cell
        let prev_state = HmmState::from_index(backtrack.get(row, col) as usize);

        match state {
            HmmState::Match => {
                row -= 1;
                block -= 1;
            }
            HmmState::EventSplit => {
                row -= 1;
            }
            HmmState::KmerSkip => {
                block -= 1;
            }
        }

        col = state_col(block, prev_state);
    }

    alignment.reverse();
    alignment
}
