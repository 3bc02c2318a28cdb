use libdcpu::{
    instruction::{DecodeError, Instruction},
    source::{SourceError, WordSource},
    Word,
};
use thiserror::Error;

use crate::Emulator;

mod parsed;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteErr {
    #[error("Illegal instruction ({0})")]
    IllegalInstruction(#[from] DecodeError),

    #[error("Malformed instruction ({0})")]
    MalformedInstruction(Instruction),

    #[error("Instruction limit of {0} reached")]
    InstructionLimit(usize),
}

/// Instructions are fetched through PC, so skipping is just moving PC forward.
impl WordSource for Emulator {
    fn next_word(&mut self) -> Result<Word, SourceError> {
        Ok(self.pc_next_word())
    }

    fn skip_words(&mut self, count: Word) -> Result<(), SourceError> {
        self.pc = self.pc.wrapping_add(count);
        Ok(())
    }
}

impl Emulator {
    /// Fetches the instruction at PC and executes it, returning what was executed.
    pub fn execute_instruction(&mut self) -> Result<Instruction, ExecuteErr> {
        let pc = self.pc;
        let instruction = self.parse_next_instruction()?;

        log::trace!("0x{:04x}: {}", pc, instruction);

        self.execute_parsed_instruction(&instruction)?;
        Ok(instruction)
    }

    pub fn execute_instructions(&mut self, count: usize) -> Result<(), ExecuteErr> {
        for _ in 0..count {
            self.execute_instruction()?;
        }

        Ok(())
    }

    /// Executes until `predicate` holds, returning the number of instructions executed.
    /// The predicate is checked before every instruction, so a state that already matches
    /// executes nothing.
    pub fn execute_until<P>(&mut self, limit: usize, mut predicate: P) -> Result<usize, ExecuteErr>
    where
        P: FnMut(&Self) -> bool,
    {
        for executed in 0..limit {
            if predicate(self) {
                return Ok(executed);
            }

            self.execute_instruction()?;
        }

        if predicate(self) {
            Ok(limit)
        } else {
            Err(ExecuteErr::InstructionLimit(limit))
        }
    }

    pub fn execute_until_pc(&mut self, pc: Word, limit: usize) -> Result<usize, ExecuteErr> {
        self.execute_until(limit, |emulator| emulator.pc == pc)
    }

    fn parse_next_instruction(&mut self) -> Result<Instruction, ExecuteErr> {
        Ok(Instruction::load(self)?)
    }

    fn skip_next_instruction(&mut self) -> Result<(), ExecuteErr> {
        let pc = self.pc;
        Instruction::skip(self)?;

        log::debug!("Skipped 0x{:04x}..0x{:04x}", pc, self.pc);
        Ok(())
    }
}
