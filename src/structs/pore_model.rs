use serde::{Deserialize, Serialize};

use crate::alphabet::NUM_KMERS;

/// The parameters of a Gaussian emission distribution.
///
/// `log_stdv` is materialized so that the HMM inner loop never has to
/// call `ln()`: any caller that widens `stdv` by a multiplicative factor
/// must add the log of the same factor to `log_stdv` instead of
/// recomputing it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GaussianParameters {
    pub mean: f32,
    pub stdv: f32,
    pub log_stdv: f32,
}

impl GaussianParameters {
    pub fn new(mean: f32, stdv: f32) -> Self {
        GaussianParameters {
            mean,
            stdv,
            log_stdv: stdv.ln(),
        }
    }
}

/// The raw (uncalibrated) signal model for one k-mer: a Gaussian over the
/// event current level and a Gaussian over the event spread.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PoreModelState {
    pub level_mean: f32,
    pub level_stdv: f32,
    pub sd_mean: f32,
    pub sd_stdv: f32,
}

/// The per-read linear correction applied to the pore model. `scale`,
/// `shift` and `var` adjust the level Gaussians, `drift` compensates the
/// slow baseline drift of the current over the course of the read, and
/// `scale_sd`/`var_sd` adjust the spread Gaussians.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Calibration {
    pub scale: f32,
    pub shift: f32,
    pub drift: f32,
    pub var: f32,
    pub scale_sd: f32,
    pub var_sd: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            scale: 1.0,
            shift: 0.0,
            drift: 0.0,
            var: 1.0,
            scale_sd: 1.0,
            var_sd: 1.0,
        }
    }
}

/// A pore model: one signal distribution per k-mer rank, with the
/// calibrated level Gaussians precomputed so that lookups in the HMM
/// inner loop are a single indexed copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoreModel {
    pub states: Vec<PoreModelState>,
    pub calibration: Calibration,
    scaled_states: Vec<GaussianParameters>,
}

impl PoreModel {
    pub fn new(states: Vec<PoreModelState>, calibration: Calibration) -> Self {
        assert_eq!(states.len(), NUM_KMERS, "pore model must cover every k-mer");

        let scaled_states = states
            .iter()
            .map(|state| {
                GaussianParameters::new(
                    state.level_mean * calibration.scale + calibration.shift,
                    state.level_stdv * calibration.var,
                )
            })
            .collect();

        PoreModel {
            states,
            calibration,
            scaled_states,
        }
    }

    /// The calibrated level Gaussian for a k-mer rank.
    #[inline]
    pub fn scaled_parameters(&self, kmer_rank: usize) -> GaussianParameters {
        self.scaled_states[kmer_rank]
    }

    /// The calibrated spread Gaussian for a k-mer rank.
    #[cfg(feature = "model-stdv")]
    pub fn scaled_sd_parameters(&self, kmer_rank: usize) -> GaussianParameters {
        let state = &self.states[kmer_rank];
        let c = &self.calibration;
        GaussianParameters::new(
            state.sd_mean * c.scale_sd,
            state.sd_stdv * (c.scale_sd.powi(3) / c.var_sd).sqrt(),
        )
    }
}
