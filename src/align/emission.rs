use lazy_static::lazy_static;

use crate::structs::{GaussianParameters, SquiggleRead, Strand};

/// ln(1 / sqrt(2 * pi))
pub const LOG_INV_SQRT_2PI: f32 = -0.918_938_5;

/// How much the level Gaussian is widened when an extra event is
/// attributed to a k-mer it did not come from.
pub const EVENT_SPLIT_STDV_SCALE: f32 = 1.75;

lazy_static! {
    static ref LOG_EVENT_SPLIT_STDV_SCALE: f32 = EVENT_SPLIT_STDV_SCALE.ln();
}

#[inline]
fn log_normal_pdf(x: f32, g: &GaussianParameters) -> f32 {
    let a = (x - g.mean) / g.stdv;
    LOG_INV_SQRT_2PI - g.log_stdv + (-0.5 * a * a)
}

/// The log probability density of the drift-corrected level at an event
/// under the calibrated Gaussian for a k-mer, with the Gaussian widened
/// by `state_scale`.
///
/// We go to great lengths to avoid calling ln() in the inner loop of the
/// HMM, so the caller passes both the scale and its precomputed log and
/// the widened `log_stdv` is formed by addition, never recomputed.
#[inline]
pub fn log_probability_match(
    read: &SquiggleRead,
    strand: Strand,
    kmer_rank: usize,
    event_idx: usize,
    state_scale: f32,
    log_state_scale: f32,
) -> f32 {
    let pm = &read.pore_model[strand.index()];

    let level = read.drift_corrected_level(event_idx, strand);

    let mut model = pm.scaled_parameters(kmer_rank);
    model.stdv *= state_scale;
    model.log_stdv += log_state_scale;

    #[allow(unused_mut)]
    let mut lp = log_normal_pdf(level, &model);

    #[cfg(feature = "model-stdv")]
    {
        let stdv = read.event_stdv(event_idx, strand);
        let sd_model = pm.scaled_sd_parameters(kmer_rank);
        lp += log_normal_pdf(stdv, &sd_model);
    }

    lp
}

/// Emission for an event-split state: an extra event attributed to one
/// k-mer, scored against a 1.75x widened Gaussian.
#[inline]
pub fn log_probability_event_insert(
    read: &SquiggleRead,
    strand: Strand,
    kmer_rank: usize,
    event_idx: usize,
) -> f32 {
    log_probability_match(
        read,
        strand,
        kmer_rank,
        event_idx,
        EVENT_SPLIT_STDV_SCALE,
        *LOG_EVENT_SPLIT_STDV_SCALE,
    )
}

/// Emission for an inserted k-mer.
///
/// Despite the name this is numerically identical to an unscaled match;
/// the distinct entry point is kept for callers that key off the state
/// that produced the emission.
#[inline]
pub fn log_probability_kmer_insert(
    read: &SquiggleRead,
    strand: Strand,
    kmer_rank: usize,
    event_idx: usize,
) -> f32 {
    log_probability_match(read, strand, kmer_rank, event_idx, 1.0, 0.0)
}
