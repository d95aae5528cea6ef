use std::fmt::{Debug, Display, Formatter};

use rand::Rng;
use thiserror::Error;

use crate::alphabet::{kmer_rank, DNA_INVERSE_MAP, KMER_LENGTH, NUM_BASES, UTF8_TO_DIGITAL_DNA};

#[derive(Error, Debug)]
#[error("unknown UTF8 sequence byte: {byte}")]
pub struct UnknownUtf8SequenceByteError {
    byte: u8,
}

#[derive(Error, Debug)]
#[error("unknown digital sequence byte: {byte}")]
pub struct UnknownDigitalSequenceByteError {
    byte: u8,
}

/// A candidate nucleotide sequence, held both as UTF8 bytes and as
/// "digital" bytes mapped to [0u8..4u8], with the base-4 rank of the
/// k-mer starting at every position precomputed.
pub struct Sequence {
    /// The length of the sequence
    pub length: usize,
    /// The string bytes, mapped to [0u8..4u8]
    pub digital_bytes: Vec<u8>,
    /// The UTF8 bytes that make up the sequence in the "normal" alphabet
    pub utf8_bytes: Vec<u8>,
    /// The pore model rank of the k-mer at each position; there are
    /// (length - K + 1) of these
    kmer_ranks: Vec<usize>,
}

impl Sequence {
    pub fn from_utf8(bytes: &[u8]) -> anyhow::Result<Self> {
        let mut digital_bytes: Vec<u8> = Vec::with_capacity(bytes.len());

        for utf8_byte in bytes {
            let digital_byte = match UTF8_TO_DIGITAL_DNA.get(utf8_byte) {
                Some(b) => *b,
                None => return Err(UnknownUtf8SequenceByteError { byte: *utf8_byte }.into()),
            };
            digital_bytes.push(digital_byte);
        }

        Ok(Self::from_digital_unchecked(bytes.to_vec(), digital_bytes))
    }

    pub fn from_digital(bytes: &[u8]) -> anyhow::Result<Self> {
        let mut utf8_bytes: Vec<u8> = Vec::with_capacity(bytes.len());

        for digital_byte in bytes {
            let utf8_byte = match DNA_INVERSE_MAP.get(digital_byte) {
                Some(b) => *b,
                None => {
                    return Err(UnknownDigitalSequenceByteError {
                        byte: *digital_byte,
                    }
                    .into())
                }
            };
            utf8_bytes.push(utf8_byte);
        }

        Ok(Self::from_digital_unchecked(utf8_bytes, bytes.to_vec()))
    }

    /// A uniform random DNA sequence of the given length.
    pub fn random_dna(length: usize, rng: &mut impl Rng) -> Self {
        let digital_bytes: Vec<u8> = (0..length)
            .map(|_| rng.gen_range(0..NUM_BASES as u8))
            .collect();
        let utf8_bytes: Vec<u8> = digital_bytes.iter().map(|b| DNA_INVERSE_MAP[b]).collect();
        Self::from_digital_unchecked(utf8_bytes, digital_bytes)
    }

    fn from_digital_unchecked(utf8_bytes: Vec<u8>, digital_bytes: Vec<u8>) -> Self {
        let kmer_ranks = if digital_bytes.len() >= KMER_LENGTH {
            digital_bytes
                .windows(KMER_LENGTH)
                .map(kmer_rank)
                .collect()
        } else {
            vec![]
        };

        Sequence {
            length: digital_bytes.len(),
            digital_bytes,
            utf8_bytes,
            kmer_ranks,
        }
    }

    /// The number of k-mers in the sequence, zero if the
    /// sequence is shorter than the k-mer length.
    pub fn kmer_count(&self) -> usize {
        self.kmer_ranks.len()
    }

    /// The pore model rank of the k-mer starting at `kmer_idx`.
    pub fn kmer_rank(&self, kmer_idx: usize) -> usize {
        self.kmer_ranks[kmer_idx]
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(&self.utf8_bytes) {
            Ok(seq) => write!(f, "{seq}"),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
