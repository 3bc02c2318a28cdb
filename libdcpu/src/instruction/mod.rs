use std::fmt::Display;

use kind::InstructionKind;
use thiserror::Error;

use crate::{
    source::{SourceError, WordSource},
    value::{Value, ValueSlot},
    Word,
};

pub mod assembler;
pub mod kind;

#[cfg(test)]
mod tests;

pub const OPCODE_MASK: Word = 0x1f;
pub const B_SHIFT: u32 = 5;
pub const B_MASK: Word = 0x1f;
pub const A_SHIFT: u32 = 10;
pub const A_MASK: Word = 0x3f;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Literal can't be used as a destination")]
    LiteralDestination,

    #[error("{0} can't be used as the {1:?} value")]
    StackValueSlot(Value, ValueSlot),

    #[error("Missing destination value")]
    MissingValue,

    #[error("Special instruction takes a single value")]
    UnexpectedValue,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid special opcode 0x{0:02x}")]
    InvalidUnaryOpcode(Word),

    #[error("Invalid binary opcode 0x{0:02x}")]
    InvalidBinaryOpcode(Word),

    #[error("Invalid value code 0x{0:02x}")]
    InvalidValueCode(Word),

    #[error("Value code 0x{0:02x} can't be used as a destination")]
    InvalidValueContext(Word),

    #[error("Input ended inside an instruction")]
    IncompleteInstruction,

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl DecodeError {
    /// Clean end of input between instructions, callers treat this as "done".
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::Source(SourceError::EndOfInput))
    }

    // Running out of words after the instruction word means the stream got cut off.
    fn within_instruction(self) -> Self {
        match self {
            Self::Source(SourceError::EndOfInput) => Self::IncompleteInstruction,
            other => other,
        }
    }
}

/// Decoded instruction. Binary instructions carry `b` (destination) and `a` (source), special
/// instructions carry only `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub b: Option<Value>,
    pub a: Value,
}

impl Instruction {
    pub const fn unary(kind: InstructionKind, a: Value) -> Self {
        Self { kind, b: None, a }
    }

    pub const fn binary(kind: InstructionKind, b: Value, a: Value) -> Self {
        Self {
            kind,
            b: Some(b),
            a,
        }
    }

    /// Decodes an instruction word. Values that take extra words are left unloaded, see
    /// [`Instruction::load_extra_words`].
    pub fn deassemble_instruction_word(instruction: Word) -> Result<Self, DecodeError> {
        let [opcode, b_code, a_code] = split_instruction_word(instruction);

        if opcode == 0 {
            let kind = InstructionKind::from_special_opcode(b_code)
                .ok_or(DecodeError::InvalidUnaryOpcode(b_code))?;

            return Ok(Self::unary(kind, Value::resolve(a_code, ValueSlot::A)?));
        }

        let kind =
            InstructionKind::from_opcode(opcode).ok_or(DecodeError::InvalidBinaryOpcode(opcode))?;

        // Both values are resolved before either loads its extra word.
        let a = Value::resolve(a_code, ValueSlot::A)?;
        let b = Value::resolve(b_code, ValueSlot::B)?;

        Ok(Self::binary(kind, b, a))
    }

    /// Number of words following the instruction word, without loading any of them.
    pub fn count_extra_words(instruction: Word) -> Result<Word, DecodeError> {
        Ok(Self::deassemble_instruction_word(instruction)?.extra_words())
    }

    pub fn extra_words(&self) -> Word {
        self.a.extra_words() + self.b.map_or(0, |b| b.extra_words())
    }

    /// Total length in words, instruction word included.
    pub fn size(&self) -> Word {
        1 + self.extra_words()
    }

    pub fn load_extra_words<S>(&mut self, source: &mut S) -> Result<(), DecodeError>
    where
        S: WordSource + ?Sized,
    {
        self.a.load_extra_word(source)?;

        if let Some(b) = &mut self.b {
            b.load_extra_word(source)?;
        }

        Ok(())
    }

    /// Reads one full instruction from the source.
    pub fn load<S>(source: &mut S) -> Result<Self, DecodeError>
    where
        S: WordSource + ?Sized,
    {
        let instruction_word = source.next_word()?;

        let mut instruction = Self::deassemble_instruction_word(instruction_word)?;
        instruction
            .load_extra_words(source)
            .map_err(DecodeError::within_instruction)?;

        Ok(instruction)
    }

    /// Discards one full instruction from the source without loading its values.
    pub fn skip<S>(source: &mut S) -> Result<(), DecodeError>
    where
        S: WordSource + ?Sized,
    {
        let instruction_word = source.next_word()?;

        let extra_words = Self::count_extra_words(instruction_word)?;
        source
            .skip_words(extra_words)
            .map_err(|e| DecodeError::from(e).within_instruction())
    }

    pub fn assemble(&self) -> Result<Vec<Word>, AssemblyError> {
        let (a_code, a_extra) = self.a.encode(ValueSlot::A)?;

        let (opcode, b_code, b_extra) = if self.kind.is_special() {
            if self.b.is_some() {
                return Err(AssemblyError::UnexpectedValue);
            }

            (0, self.kind.opcode(), None)
        } else {
            let (b_code, b_extra) = self
                .b
                .ok_or(AssemblyError::MissingValue)?
                .encode(ValueSlot::B)?;

            (self.kind.opcode(), b_code, b_extra)
        };

        let mut output = Vec::with_capacity(3);
        output.push(a_code << A_SHIFT | b_code << B_SHIFT | opcode);
        output.extend(a_extra);
        output.extend(b_extra);

        Ok(output)
    }
}

/// Splits an instruction word into its `[opcode, b, a]` fields.
pub fn split_instruction_word(instruction: Word) -> [Word; 3] {
    [
        instruction & OPCODE_MASK,
        (instruction >> B_SHIFT) & B_MASK,
        (instruction >> A_SHIFT) & A_MASK,
    ]
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.b {
            Some(b) => write!(f, "{} {}, {}", self.kind, b, self.a),
            None => write!(f, "{} {}", self.kind, self.a),
        }
    }
}
