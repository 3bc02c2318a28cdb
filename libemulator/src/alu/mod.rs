//! Word arithmetic. Operations take `(b, a)` in instruction order (`b op a`). Those that define
//! an overflow word return `(value, ex)` and leave committing EX to the caller, which writes it
//! after the destination.

use libdcpu::{sign_extend, split, split_signed, DoubleWord, Word};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ALU {
    pub ex: Word,
}

impl ALU {
    pub fn new() -> Self {
        Self { ex: 0 }
    }

    pub fn add(&self, b: Word, a: Word) -> (Word, Word) {
        let (ex, value) = split(b as DoubleWord + a as DoubleWord);
        (value, ex)
    }

    pub fn sub(&self, b: Word, a: Word) -> (Word, Word) {
        // Borrowing out of the low word leaves 0xffff in the high word.
        let (ex, value) = split((b as DoubleWord).wrapping_sub(a as DoubleWord));
        (value, ex)
    }

    pub fn mul(&self, b: Word, a: Word) -> (Word, Word) {
        let (ex, value) = split(b as DoubleWord * a as DoubleWord);
        (value, ex)
    }

    pub fn mli(&self, b: Word, a: Word) -> (Word, Word) {
        let (ex, value) = split_signed(sign_extend(b) * sign_extend(a));
        (value, ex)
    }

    pub fn div(&self, b: Word, a: Word) -> (Word, Word) {
        if a == 0 {
            return (0, 0);
        }

        let ex = ((b as DoubleWord) << Word::BITS) / a as DoubleWord;
        (b / a, ex as Word)
    }

    pub fn dvi(&self, b: Word, a: Word) -> (Word, Word) {
        if a == 0 {
            return (0, 0);
        }

        // Widened past 32 bits so -0x8000 / -1 can't overflow.
        let [b, a] = [sign_extend(b) as i64, sign_extend(a) as i64];
        let ex = (b << Word::BITS) / a;
        ((b / a) as Word, ex as Word)
    }

    /// Unsigned remainder, leaves EX alone.
    pub fn rem(&self, b: Word, a: Word) -> Word {
        if a == 0 {
            return 0;
        }

        b % a
    }

    /// Signed remainder with the sign of `b`, leaves EX alone.
    pub fn mdi(&self, b: Word, a: Word) -> Word {
        if a == 0 {
            return 0;
        }

        (sign_extend(b) % sign_extend(a)) as Word
    }

    pub fn and(&self, b: Word, a: Word) -> Word {
        b & a
    }

    pub fn bor(&self, b: Word, a: Word) -> Word {
        b | a
    }

    pub fn xor(&self, b: Word, a: Word) -> Word {
        b ^ a
    }

    pub fn shl(&self, b: Word, a: Word) -> (Word, Word) {
        let shifted = (b as DoubleWord).checked_shl(a as u32).unwrap_or(0);

        let (ex, value) = split(shifted);
        (value, ex)
    }

    pub fn shr(&self, b: Word, a: Word) -> (Word, Word) {
        let shifted = ((b as DoubleWord) << Word::BITS)
            .checked_shr(a as u32)
            .unwrap_or(0);

        split(shifted)
    }

    pub fn asr(&self, b: Word, a: Word) -> (Word, Word) {
        let widened = sign_extend(b) << Word::BITS;
        let shifted = widened
            .checked_shr(a as u32)
            .unwrap_or(if widened < 0 { -1 } else { 0 });

        split_signed(shifted)
    }

    /// `b + a + EX`, EX becomes 1 on overflow.
    pub fn adx(&self, b: Word, a: Word) -> (Word, Word) {
        let sum = b as DoubleWord + a as DoubleWord + self.ex as DoubleWord;
        let ex = if sum > Word::MAX as DoubleWord { 1 } else { 0 };

        (sum as Word, ex)
    }

    /// `b - a + EX` with EX taken as signed, EX becomes 0xffff on underflow and 1 on overflow.
    pub fn sbx(&self, b: Word, a: Word) -> (Word, Word) {
        let difference = b as i32 - a as i32 + sign_extend(self.ex);
        let ex = if difference < 0 {
            0xffff
        } else if difference > Word::MAX as i32 {
            0x0001
        } else {
            0
        };

        (difference as Word, ex)
    }
}
