pub mod alignment;
pub use alignment::{AlignmentStep, HmmState, NUM_HMM_STATES};

pub mod dp_matrix;
pub use dp_matrix::{num_cols, state_col, BacktrackMatrix, FloatMatrix};

pub mod event_window;
pub use event_window::{EventWindow, HmmInput};
