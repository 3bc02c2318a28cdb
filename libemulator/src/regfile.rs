use libdcpu::{Register, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegFile([Word; libdcpu::REGISTER_COUNT]);

impl RegFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Register, Word)> + '_ {
        Register::ALL.into_iter().zip(self.0.iter().copied())
    }

    pub fn as_array(&self) -> [Word; libdcpu::REGISTER_COUNT] {
        self.0
    }

    pub fn register(&self, register: Register) -> Word {
        self.0[register.index()]
    }

    pub fn register_mut(&mut self, register: Register) -> &mut Word {
        &mut self.0[register.index()]
    }
}
