use alu::ALU;
use anyhow::anyhow;
use libdcpu::{Register, Word};
use memory::Memory;
use regfile::RegFile;

pub mod alu;
pub mod execute;
pub mod memory;
pub mod regfile;

pub use execute::ExecuteErr;

pub const INITIAL_SP: Word = 0xffff;

pub struct Emulator {
    pub memory: Memory,
    pub reg_file: RegFile,
    /// Holds EX, the excess register written by arithmetic.
    pub alu: ALU,
    pub pc: Word,
    pub sp: Word,
}

impl Emulator {
    /// Creates an emulator with `program` loaded at address 0.
    pub fn new(program: &[Word]) -> anyhow::Result<Self> {
        if program.len() > libdcpu::MEMORY_SIZE {
            return Err(anyhow!(
                "Program ({} words) doesn't fit into memory ({} words)",
                program.len(),
                libdcpu::MEMORY_SIZE
            ));
        }

        Ok(Self {
            memory: Memory::new(program),
            reg_file: RegFile::new(),
            alu: ALU::new(),
            pc: 0,
            sp: INITIAL_SP,
        })
    }

    /// Puts the CPU back into its power-on state, memory is left as is.
    pub fn reset(&mut self) {
        self.reg_file = RegFile::new();
        self.alu = ALU::new();
        self.pc = 0;
        self.sp = INITIAL_SP;
    }

    pub fn register(&self, register: Register) -> Word {
        self.reg_file.register(register)
    }

    pub fn register_mut(&mut self, register: Register) -> &mut Word {
        self.reg_file.register_mut(register)
    }

    pub fn ex(&self) -> Word {
        self.alu.ex
    }

    pub fn ex_mut(&mut self) -> &mut Word {
        &mut self.alu.ex
    }

    /// Reads the word at PC and advances PC past it.
    pub fn pc_next_word(&mut self) -> Word {
        let data = self.memory.word(self.pc);
        self.pc = self.pc.wrapping_add(1);
        data
    }

    /// `[SP++]`: returns the current SP, then increments it.
    pub fn sp_pop_address(&mut self) -> Word {
        let addr = self.sp;
        self.sp = self.sp.wrapping_add(1);
        addr
    }

    /// `[--SP]`: decrements SP, then returns it.
    pub fn sp_push_address(&mut self) -> Word {
        self.sp = self.sp.wrapping_sub(1);
        self.sp
    }

    pub fn push(&mut self, value: Word) {
        let addr = self.sp_push_address();
        *self.memory.word_mut(addr) = value;
    }

    pub fn pop(&mut self) -> Word {
        let addr = self.sp_pop_address();
        self.memory.word(addr)
    }
}
