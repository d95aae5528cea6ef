pub mod pore_model;
pub use pore_model::{Calibration, GaussianParameters, PoreModel, PoreModelState};

pub mod read;
pub use read::{Event, SquiggleRead, Strand, NUM_STRANDS};

pub mod sequence;
pub use sequence::Sequence;

pub mod transitions;
pub use transitions::{StateTransitions, TransitionModel};
