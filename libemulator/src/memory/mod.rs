use std::iter;

use libdcpu::{
    instruction::{DecodeError, Instruction},
    source::{SourceError, WordSource},
    Word,
};

#[cfg(test)]
mod tests;

/// Flat word-addressed memory covering the whole 16-bit address space, so every access is in
/// bounds and address arithmetic wraps.
pub struct Memory(Box<[Word]>);

impl Memory {
    /// Creates memory with `program` at address 0, truncated to the address space.
    pub fn new(program: &[Word]) -> Self {
        let data = program
            .iter()
            .copied()
            .chain(iter::repeat(0))
            .take(libdcpu::MEMORY_SIZE)
            .collect();

        Self(data)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.0.iter()
    }

    pub fn word(&self, addr: Word) -> Word {
        self.0[addr as usize]
    }

    pub fn word_mut(&mut self, addr: Word) -> &mut Word {
        &mut self.0[addr as usize]
    }

    /// Copies `data` into memory starting at `addr`, wrapping past the last address.
    pub fn load(&mut self, addr: Word, data: &[Word]) {
        for (offset, word) in data.iter().enumerate() {
            *self.word_mut(addr.wrapping_add(offset as Word)) = *word;
        }
    }

    /// Word source reading sequentially from `addr`, independent of the CPU's PC.
    pub fn source_at(&self, addr: Word) -> MemorySource<'_> {
        MemorySource { memory: self, addr }
    }

    /// Decodes `count` instructions starting at `addr`, paired with their addresses. Decoding
    /// resumes at the word after an undecodable one.
    pub fn disassemble(
        &self,
        addr: Word,
        count: usize,
    ) -> Vec<(Word, Result<Instruction, DecodeError>)> {
        let mut source = self.source_at(addr);

        (0..count)
            .map(|_| {
                let addr = source.addr();
                (addr, Instruction::load(&mut source))
            })
            .collect()
    }
}

pub struct MemorySource<'a> {
    memory: &'a Memory,
    addr: Word,
}

impl MemorySource<'_> {
    pub fn addr(&self) -> Word {
        self.addr
    }
}

impl WordSource for MemorySource<'_> {
    fn next_word(&mut self) -> Result<Word, SourceError> {
        let word = self.memory.word(self.addr);
        self.addr = self.addr.wrapping_add(1);
        Ok(word)
    }

    fn skip_words(&mut self, count: Word) -> Result<(), SourceError> {
        self.addr = self.addr.wrapping_add(count);
        Ok(())
    }
}
