use std::io::Write;

use anyhow::Result;

use super::{HmmState, NUM_HMM_STATES};

/// The flat column index of a state cell.
///
/// Columns come in blocks of three, one block per sequence position plus
/// two synthetic terminal blocks: block 0 is the start block and block
/// (kmer_count + 1) is the end block, so block b covers k-mer (b - 1).
#[inline]
pub fn state_col(block: usize, state: HmmState) -> usize {
    NUM_HMM_STATES * block + state as usize
}

/// The number of columns of a matrix over a sequence with `kmer_count` k-mers.
#[inline]
pub fn num_cols(kmer_count: usize) -> usize {
    NUM_HMM_STATES * (kmer_count + 2)
}

/// A dense row-major matrix of log scores, one row per consumed event
/// plus a synthetic row 0 for "no events consumed yet".
///
/// Every cell starts at -inf, the log of probability zero.
#[derive(Clone)]
pub struct FloatMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    data: Vec<f32>,
}

impl FloatMatrix {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        FloatMatrix {
            n_rows,
            n_cols,
            data: vec![-f32::INFINITY; n_rows * n_cols],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        debug_assert!(row < self.n_rows);
        debug_assert!(col < self.n_cols);
        self.data[row * self.n_cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        debug_assert!(row < self.n_rows);
        debug_assert!(col < self.n_cols);
        self.data[row * self.n_cols + col] = value;
    }

    pub fn dump(&self, out: &mut impl Write) -> Result<()> {
        let column_width = 13;
        let precision = 3;

        write!(out, "    ")?;
        for block in 0..self.n_cols / NUM_HMM_STATES {
            for state in ["M", "E", "K"] {
                write!(out, "{:>w$} ", format!("{block}{state}"), w = column_width)?;
            }
        }
        writeln!(out)?;

        for row in 0..self.n_rows {
            write!(out, "{row:3} ")?;
            for col in 0..self.n_cols {
                write!(
                    out,
                    "{:w$.p$} ",
                    self.get(row, col),
                    w = column_width,
                    p = precision
                )?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

/// The companion of a Viterbi [`FloatMatrix`]: for every cell, the state
/// tag of the predecessor cell the maximum came from.
#[derive(Clone)]
pub struct BacktrackMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    data: Vec<u8>,
}

impl BacktrackMatrix {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        BacktrackMatrix {
            n_rows,
            n_cols,
            data: vec![0; n_rows * n_cols],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        debug_assert!(row < self.n_rows);
        debug_assert!(col < self.n_cols);
        self.data[row * self.n_cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        debug_assert!(row < self.n_rows);
        debug_assert!(col < self.n_cols);
        self.data[row * self.n_cols + col] = value;
    }
}
