use std::fmt::Display;

use crate::{
    instruction::{AssemblyError, DecodeError},
    source::WordSource,
    Register, Word, WordSigned,
};

pub const CODE_REGISTER: Word = 0x00;
pub const CODE_REGISTER_ADDRESS: Word = 0x08;
pub const CODE_REGISTER_REL_ADDRESS: Word = 0x10;
pub const CODE_PUSH_POP: Word = 0x18;
pub const CODE_PEEK: Word = 0x19;
pub const CODE_PICK: Word = 0x1a;
pub const CODE_SP: Word = 0x1b;
pub const CODE_PC: Word = 0x1c;
pub const CODE_EX: Word = 0x1d;
pub const CODE_ADDRESS: Word = 0x1e;
pub const CODE_NEXT_WORD: Word = 0x1f;
pub const CODE_LITERAL: Word = 0x20;
pub const CODE_MAX: Word = 0x3f;

/// Embedded literals cover -1..=30, code 0x20 being -1.
const LITERAL_BIAS: Word = 0x21;
const LITERAL_MIN: WordSigned = -1;
const LITERAL_MAX: WordSigned = 30;

/// Which operand field of the instruction word a value was resolved from.
///
/// Code 0x18 means POP in the A slot and PUSH in the B slot, and embedded literals are only
/// accepted in the A slot, so resolution always needs to know the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSlot {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// `A`
    Register(Register),
    /// `[A]`
    RegisterAddress(Register),
    /// `[A+next word]`
    RegisterRelAddress(Register, Word),
    /// `[--SP]`, B slot only.
    Push,
    /// `[SP++]`, A slot only.
    Pop,
    /// `[SP]`
    Peek,
    /// `[SP+next word]`
    Pick(Word),
    Sp,
    Pc,
    Ex,
    /// `[next word]`
    Address(Word),
    /// Next word taken as an immediate.
    NextWord(Word),
    /// Literal embedded in the operand code.
    Literal(Word),
}

impl Value {
    /// Resolves an operand code into a value. Values that take an extra word hold zero until
    /// [`Value::load_extra_word`] is called.
    pub fn resolve(code: Word, slot: ValueSlot) -> Result<Self, DecodeError> {
        let register = |base: Word| Register::from_index((code - base) as usize);

        let value = match code {
            0x00..=0x07 => register(CODE_REGISTER).map(Self::Register),
            0x08..=0x0f => register(CODE_REGISTER_ADDRESS).map(Self::RegisterAddress),
            0x10..=0x17 => register(CODE_REGISTER_REL_ADDRESS)
                .map(|register| Self::RegisterRelAddress(register, 0)),
            CODE_PUSH_POP => Some(match slot {
                ValueSlot::A => Self::Pop,
                ValueSlot::B => Self::Push,
            }),
            CODE_PEEK => Some(Self::Peek),
            CODE_PICK => Some(Self::Pick(0)),
            CODE_SP => Some(Self::Sp),
            CODE_PC => Some(Self::Pc),
            CODE_EX => Some(Self::Ex),
            CODE_ADDRESS => Some(Self::Address(0)),
            CODE_NEXT_WORD => Some(Self::NextWord(0)),
            CODE_LITERAL..=CODE_MAX => {
                if slot == ValueSlot::B {
                    return Err(DecodeError::InvalidValueContext(code));
                }

                Some(Self::Literal(code.wrapping_sub(LITERAL_BIAS)))
            }
            _ => None,
        };

        value.ok_or(DecodeError::InvalidValueCode(code))
    }

    /// Number of words following the instruction word that this value consumes (0 or 1).
    pub const fn extra_words(&self) -> Word {
        match self {
            Self::RegisterRelAddress(..) | Self::Pick(_) | Self::Address(_) | Self::NextWord(_) => 1,
            _ => 0,
        }
    }

    pub fn load_extra_word<S>(&mut self, source: &mut S) -> Result<(), DecodeError>
    where
        S: WordSource + ?Sized,
    {
        match self {
            Self::RegisterRelAddress(_, word)
            | Self::Pick(word)
            | Self::Address(word)
            | Self::NextWord(word) => *word = source.next_word()?,
            _ => {}
        }

        Ok(())
    }

    /// Encodes the value into its operand code and optional extra word.
    pub fn encode(&self, slot: ValueSlot) -> Result<(Word, Option<Word>), AssemblyError> {
        Ok(match *self {
            Self::Register(register) => (CODE_REGISTER + register.index() as Word, None),
            Self::RegisterAddress(register) => {
                (CODE_REGISTER_ADDRESS + register.index() as Word, None)
            }
            Self::RegisterRelAddress(register, offset) => (
                CODE_REGISTER_REL_ADDRESS + register.index() as Word,
                Some(offset),
            ),
            Self::Push if slot == ValueSlot::B => (CODE_PUSH_POP, None),
            Self::Pop if slot == ValueSlot::A => (CODE_PUSH_POP, None),
            Self::Push | Self::Pop => return Err(AssemblyError::StackValueSlot(*self, slot)),
            Self::Peek => (CODE_PEEK, None),
            Self::Pick(offset) => (CODE_PICK, Some(offset)),
            Self::Sp => (CODE_SP, None),
            Self::Pc => (CODE_PC, None),
            Self::Ex => (CODE_EX, None),
            Self::Address(address) => (CODE_ADDRESS, Some(address)),
            Self::NextWord(word) => (CODE_NEXT_WORD, Some(word)),
            Self::Literal(literal) => {
                if slot == ValueSlot::B {
                    return Err(AssemblyError::LiteralDestination);
                }

                if (LITERAL_MIN..=LITERAL_MAX).contains(&(literal as WordSigned)) {
                    (literal.wrapping_add(LITERAL_BIAS), None)
                } else {
                    (CODE_NEXT_WORD, Some(literal))
                }
            }
        })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(register) => write!(f, "{}", register),
            Self::RegisterAddress(register) => write!(f, "[{}]", register),
            Self::RegisterRelAddress(register, offset) => {
                write!(f, "[{}+0x{:04x}]", register, offset)
            }
            Self::Push => f.write_str("PUSH"),
            Self::Pop => f.write_str("POP"),
            Self::Peek => f.write_str("PEEK"),
            Self::Pick(offset) => write!(f, "PICK 0x{:04x}", offset),
            Self::Sp => f.write_str("SP"),
            Self::Pc => f.write_str("PC"),
            Self::Ex => f.write_str("EX"),
            Self::Address(address) => write!(f, "[0x{:04x}]", address),
            Self::NextWord(word) => write!(f, "0x{:04x}", word),
            Self::Literal(literal) => write!(f, "{}", *literal as WordSigned),
        }
    }
}

#[cfg(test)]
mod tests;
