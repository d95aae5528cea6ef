use thiserror::Error;

pub mod structs;

pub mod emission;
pub use emission::{
    log_probability_event_insert, log_probability_kmer_insert, log_probability_match,
};

mod fill;
pub use fill::{fill_generic, initialize, FillOutput, ForwardOutput, ViterbiOutput};

mod forward;
pub use forward::{score, score_inputs};

mod viterbi;
pub use viterbi::{align, MIN_DECODE_EVENTS};

mod traceback;
pub use traceback::traceback;

pub mod training;
pub use training::{update_training, KmerTransitionObservation, TrainingData};

mod scoring;
pub use scoring::{Bits, Nats};

#[cfg(test)]
pub mod test_support;

/// Precondition violations of the score/align/train entry points.
///
/// These terminate the offending call; the outer consensus loop decides
/// whether to skip the candidate. A score of -inf is not an error.
#[derive(Error, Debug)]
pub enum AlignmentError {
    #[error("candidate sequence of {length} bases is shorter than the k-mer length {k}")]
    SequenceTooShort { length: usize, k: usize },
    #[error("event window holds {found} events but decoding requires at least {required}")]
    WindowTooShort { found: usize, required: usize },
}
