use crate::align::fill::{fill_generic, initialize, ViterbiOutput};
use crate::align::structs::{num_cols, AlignmentStep, BacktrackMatrix, FloatMatrix, HmmInput};
use crate::align::traceback::traceback;
use crate::align::AlignmentError;
use crate::alphabet::KMER_LENGTH;
use crate::structs::{Sequence, TransitionModel};

/// Decoding is meaningless for fewer events than this.
pub const MIN_DECODE_EVENTS: usize = 2;

/// The most probable alignment between the events in the input window
/// and the candidate sequence, as an ordered path from sequence start to
/// sequence end.
pub fn align(
    sequence: &Sequence,
    input: &HmmInput,
    transitions: &impl TransitionModel,
) -> Result<Vec<AlignmentStep>, AlignmentError> {
    let n_kmers = sequence.kmer_count();
    if n_kmers == 0 {
        return Err(AlignmentError::SequenceTooShort {
            length: sequence.length,
            k: KMER_LENGTH,
        });
    }

    let n_events = input.window.event_count();
    if n_events < MIN_DECODE_EVENTS {
        return Err(AlignmentError::WindowTooShort {
            found: n_events,
            required: MIN_DECODE_EVENTS,
        });
    }

    let n_rows = n_events + 1;

    let mut viterbi_matrix = FloatMatrix::new(n_rows, num_cols(n_kmers));
    let mut backtrack_matrix = BacktrackMatrix::new(n_rows, num_cols(n_kmers));
    initialize(&mut viterbi_matrix);

    let mut output = ViterbiOutput::new(&mut viterbi_matrix, &mut backtrack_matrix);
    fill_generic(sequence, input, transitions, &mut output);

    Ok(traceback(
        &viterbi_matrix,
        &backtrack_matrix,
        n_kmers,
        &input.window,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::forward::score;
    use crate::align::structs::{EventWindow, HmmState};
    use crate::align::test_support::{
        assert_path_consistent, match_friendly_transitions, model_mean_for_rank, read_from_levels,
        synthetic_input,
    };
    use crate::structs::Strand;

    #[test]
    fn test_two_events_two_kmers_is_all_match() -> Result<(), AlignmentError> {
        // a sequence of K + 1 bases has exactly 2 k-mers; with 2 events
        // the only way to reach the terminal cell is the match diagonal
        let sequence = Sequence::from_utf8(b"ACGTAC").unwrap();
        assert_eq!(sequence.kmer_count(), 2);

        let means = [
            model_mean_for_rank(sequence.kmer_rank(0)),
            model_mean_for_rank(sequence.kmer_rank(1)),
        ];
        let read = read_from_levels(&means);
        let input = HmmInput::new(&read, Strand::Template, EventWindow::forward(0, 1));

        let alignment = align(&sequence, &input, &match_friendly_transitions())?;

        assert_eq!(alignment.len(), 2);
        assert!(alignment.iter().all(|s| s.state == HmmState::Match));
        assert_eq!(alignment[0].kmer_idx, 0);
        assert_eq!(alignment[1].kmer_idx, 1);
        Ok(())
    }

    #[test]
    fn test_align_rejects_single_event_window() {
        let (sequence, read, _) = synthetic_input(6, 8);
        let input = HmmInput::new(&read, Strand::Template, EventWindow::forward(0, 0));

        let result = align(&sequence, &input, &match_friendly_transitions());
        assert!(matches!(
            result,
            Err(AlignmentError::WindowTooShort {
                found: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn test_path_accounts_for_every_event() -> Result<(), AlignmentError> {
        let (sequence, read, window) = synthetic_input(12, 10);
        let input = HmmInput::new(&read, Strand::Template, window);

        let alignment = align(&sequence, &input, &match_friendly_transitions())?;
        assert_path_consistent(&alignment, &window);

        // every event in the window is consumed exactly once by an
        // event-consuming state; skips add extra entries
        let consuming = alignment
            .iter()
            .filter(|s| s.state != HmmState::KmerSkip)
            .count();
        assert_eq!(consuming, window.event_count());
        assert!(alignment.len() >= window.event_count());
        Ok(())
    }

    #[test]
    fn test_forward_dominates_viterbi() -> Result<(), AlignmentError> {
        let (sequence, read, window) = synthetic_input(9, 9);
        let input = HmmInput::new(&read, Strand::Template, window);
        let transitions = match_friendly_transitions();

        let forward_lp = score(&sequence, &input, &transitions)?;
        let alignment = align(&sequence, &input, &transitions)?;
        let viterbi_lp = alignment.last().unwrap().score;

        assert!(forward_lp.value() >= viterbi_lp);
        Ok(())
    }

    #[test]
    fn test_reverse_window_alignment() -> Result<(), AlignmentError> {
        let (sequence, read, window) = synthetic_input(8, 8);
        let n = window.event_count();
        let reverse = EventWindow::new(n - 1, 0, -1);
        let input = HmmInput::new(&read, Strand::Template, reverse);

        let alignment = align(&sequence, &input, &match_friendly_transitions())?;
        assert_path_consistent(&alignment, &reverse);

        // the first consumed event is the window start, i.e. the last
        // event of the trace
        assert_eq!(alignment[0].event_idx, n - 1);
        Ok(())
    }
}
