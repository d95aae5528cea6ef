use crate::align::fill::{fill_generic, initialize, ForwardOutput};
use crate::align::structs::{num_cols, FloatMatrix, HmmInput};
use crate::align::{AlignmentError, Nats};
use crate::alphabet::KMER_LENGTH;
use crate::structs::{Sequence, TransitionModel};

/// The forward log-likelihood that the candidate sequence produced the
/// events in the input window, summed over all consistent paths.
pub fn score(
    sequence: &Sequence,
    input: &HmmInput,
    transitions: &impl TransitionModel,
) -> Result<Nats, AlignmentError> {
    let n_kmers = sequence.kmer_count();
    if n_kmers == 0 {
        return Err(AlignmentError::SequenceTooShort {
            length: sequence.length,
            k: KMER_LENGTH,
        });
    }

    let n_rows = input.window.event_count() + 1;

    let mut forward_matrix = FloatMatrix::new(n_rows, num_cols(n_kmers));
    initialize(&mut forward_matrix);

    let mut output = ForwardOutput::new(&mut forward_matrix);
    let lp = fill_generic(sequence, input, transitions, &mut output);

    Ok(Nats(lp))
}

/// Run the forward algorithm over multiple read/strand inputs and sum
/// the result.
pub fn score_inputs(
    sequence: &Sequence,
    inputs: &[HmmInput],
    transitions: &impl TransitionModel,
) -> Result<Nats, AlignmentError> {
    let mut total = Nats(0.0);
    for input in inputs {
        total = total + score(sequence, input, transitions)?;
    }
    Ok(total)
}
