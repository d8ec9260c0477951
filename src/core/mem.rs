//! Word-addressed data memory.
//!
//! One flat array of 2^18 signed words (2^20 bytes). The low end of the byte
//! address space is reserved for the instruction region: data accesses below
//! `4 * |instructions|` are invalid, as are unaligned or out-of-range ones.

use crate::error::Fault;

/// Total byte capacity of the modeled memory.
pub const MEM_BYTES: usize = 1 << 20;

/// Total word capacity.
pub const MEM_WORDS: usize = MEM_BYTES >> 2;

/// The data memory, plus the size of the reserved instruction region.
pub struct DataMemory {
    words: Vec<i32>,
    text_words: usize,
}

impl DataMemory {
    /// Creates a zeroed memory reserving `text_words` words for instructions.
    pub fn new(text_words: usize) -> Self {
        DataMemory {
            words: vec![0; MEM_WORDS],
            text_words,
        }
    }

    /// Validates a byte address from the ALU and converts it to a word index.
    ///
    /// The address must be word-aligned, outside the instruction region, and
    /// inside the memory.
    pub fn resolve(&self, byte_addr: i32) -> Result<usize, Fault> {
        let addr = byte_addr as i64;
        if addr % 4 != 0 || addr < 4 * self.text_words as i64 || addr >= MEM_BYTES as i64 {
            return Err(Fault::InvalidAddress);
        }
        Ok((addr / 4) as usize)
    }

    pub fn load(&self, word: usize) -> i32 {
        self.words[word]
    }

    pub fn store(&mut self, word: usize, value: i32) {
        self.words[word] = value;
    }

    /// Iterates over the non-zero words as `(word_index, value)` pairs, in
    /// address order. Used by the end-of-run report.
    pub fn nonzero_words(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, &v)| (i, v))
    }
}
