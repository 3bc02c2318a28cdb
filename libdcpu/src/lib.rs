use std::fmt::Display;

pub mod instruction;
pub mod source;
pub mod value;

pub type Word = u16;
pub type WordSigned = i16;
pub type DoubleWord = u32;
pub type DoubleWordSigned = i32;

pub const BYTES_PER_WORD: usize = 2;

/// Number of addressable words, every 16-bit address is valid.
pub const MEMORY_SIZE: usize = 1 << Word::BITS;

pub const REGISTER_COUNT: usize = 8;

/// Reinterprets a signed word as its two's complement bit pattern.
pub const fn signed(word: WordSigned) -> Word {
    word as Word
}

/// Sign-extends a word to a double word.
pub const fn sign_extend(word: Word) -> DoubleWordSigned {
    word as WordSigned as DoubleWordSigned
}

/// Splits a double word into its (high, low) words.
pub const fn split(double: DoubleWord) -> (Word, Word) {
    ((double >> Word::BITS) as Word, double as Word)
}

pub const fn split_signed(double: DoubleWordSigned) -> (Word, Word) {
    split(double as DoubleWord)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    A,
    B,
    C,
    X,
    Y,
    Z,
    I,
    J,
}

impl Register {
    pub const ALL: [Register; REGISTER_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::X,
        Self::Y,
        Self::Z,
        Self::I,
        Self::J,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|register| register.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::I => "I",
            Self::J => "J",
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
