use std::iter::Peekable;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use libdcpu::{
    instruction::{DecodeError, Instruction},
    source::{SourceError, WordSource},
    Word,
};


/// Byte order of the words in a binary image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    pub fn word(self, bytes: [u8; libdcpu::BYTES_PER_WORD]) -> Word {
        match self {
            Self::Little => LittleEndian::read_u16(&bytes),
            Self::Big => BigEndian::read_u16(&bytes),
        }
    }
}

/// Decodes instructions from a byte stream. The stream can only be read front to back, so it
/// works as a word source that can't skip.
pub struct Deassembler<I>
where
    I: Iterator<Item = u8>,
{
    code_iter: Peekable<I>,
    endian: Endian,
}

impl<I> Deassembler<I>
where
    I: Iterator<Item = u8>,
{
    pub fn new(code_iter: I, endian: Endian) -> Self {
        Self {
            code_iter: code_iter.peekable(),
            endian,
        }
    }

    /// Decodes every instruction up to the end of input.
    pub fn deassemble(self) -> Result<Vec<Instruction>, DecodeError> {
        self.collect()
    }

    /// One instruction per line.
    pub fn deassemble_text(self) -> Result<String, DecodeError> {
        self.map(|instruction| instruction.map(|instruction| format!("{}\n", instruction)))
            .collect()
    }

    /// Decodes the next instruction. Running out of bytes before the first word is complete
    /// counts as an incomplete instruction, only an empty stream is a clean end of input.
    pub fn deassemble_instruction(&mut self) -> Result<Instruction, DecodeError> {
        if self.code_iter.peek().is_none() {
            return Err(SourceError::EndOfInput.into());
        }

        Instruction::load(self).map_err(|e| {
            if e.is_end_of_input() {
                DecodeError::IncompleteInstruction
            } else {
                e
            }
        })
    }

    pub fn deassemble_instruction_text(&mut self) -> String {
        match self.deassemble_instruction() {
            Ok(instruction) => instruction.to_string(),
            Err(e) => format!("<{}>", e),
        }
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.code_iter.peek().is_none()
    }
}

impl<I> WordSource for Deassembler<I>
where
    I: Iterator<Item = u8>,
{
    fn next_word(&mut self) -> Result<Word, SourceError> {
        let first_byte = self.code_iter.next().ok_or(SourceError::EndOfInput)?;
        let second_byte = self.code_iter.next().ok_or(SourceError::EndOfInput)?;

        Ok(self.endian.word([first_byte, second_byte]))
    }

    fn skip_words(&mut self, _count: Word) -> Result<(), SourceError> {
        Err(SourceError::SkipUnsupported)
    }
}

/// Yields instructions until the stream ends cleanly. Stops after the first error.
impl<I> Iterator for Deassembler<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.deassemble_instruction() {
            Err(e) if e.is_end_of_input() => None,
            Err(e) => {
                for _ in self.code_iter.by_ref() {}
                Some(Err(e))
            }
            ok => Some(ok),
        }
    }
}

/// Converts a whole image into words. Fails on a trailing half word.
pub fn words_from_bytes(bytes: &[u8], endian: Endian) -> Result<Vec<Word>, SourceError> {
    if bytes.len() % libdcpu::BYTES_PER_WORD != 0 {
        return Err(SourceError::EndOfInput);
    }

    let mut words = vec![0; bytes.len() / libdcpu::BYTES_PER_WORD];
    match endian {
        Endian::Little => LittleEndian::read_u16_into(bytes, &mut words),
        Endian::Big => BigEndian::read_u16_into(bytes, &mut words),
    }

    Ok(words)
}
