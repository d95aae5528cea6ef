use phf::phf_map;

/// The length of the k-mers that the pore signal model is defined over.
pub const KMER_LENGTH: usize = 5;

pub const NUM_BASES: usize = 4;

/// The number of distinct k-mers, i.e. the number of states in a pore model.
pub const NUM_KMERS: usize = NUM_BASES.pow(KMER_LENGTH as u32);

pub const DNA_ALPHABET: [&str; 4] = ["A", "C", "G", "T"];

pub const UTF8_TO_DIGITAL_DNA: phf::Map<u8, u8> = phf_map! {
    // upper case
    65u8 => 0,   // A
    67u8 => 1,   // C
    71u8 => 2,   // G
    84u8 => 3,   // T
    // lower case
    97u8 => 0,   // a
    99u8 => 1,   // c
    103u8 => 2,  // g
    116u8 => 3,  // t
};

/// maps from <digital DNA byte> -> <UTF8 byte>
pub const DNA_INVERSE_MAP: phf::Map<u8, u8> = phf_map! {
    0u8 => 65,  // A
    1u8 => 67,  // C
    2u8 => 71,  // G
    3u8 => 84,  // T
};

/// The base-4 rank of a k-mer given as digital bytes.
///
/// The rank is the lookup key into a pore model's states: AAAAA has
/// rank 0, AAAAC has rank 1, and so on up to TTTTT.
pub fn kmer_rank(digital_bytes: &[u8]) -> usize {
    debug_assert_eq!(digital_bytes.len(), KMER_LENGTH);
    digital_bytes
        .iter()
        .fold(0usize, |rank, &base| rank * NUM_BASES + base as usize)
}
