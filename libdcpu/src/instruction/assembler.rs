use std::hash::Hash;

use bimap::BiMap;

use crate::Word;

use super::{AssemblyError, Instruction};

#[derive(Default)]
pub struct AssemblyOutput<T>
where
    T: Hash + Eq,
{
    pub machine_code: Vec<Word>,

    /// Instruction start address (left) to extra (right) or vice versa mapping.
    pub extra_map: BiMap<Word, T>,
}

impl<T> AssemblyOutput<T>
where
    T: Hash + Eq,
{
    pub fn address_of(&self, extra: &T) -> Option<Word> {
        self.extra_map.get_by_right(extra).copied()
    }
}

pub fn assemble<I>(instructions: I) -> Result<Vec<Word>, AssemblyError>
where
    I: IntoIterator<Item = Instruction>,
{
    instructions
        .into_iter()
        .try_fold(Vec::new(), |mut machine_code, instruction| {
            machine_code.extend(instruction.assemble()?);
            Ok(machine_code)
        })
}

/// Assembles instructions tagged with unique extras, recording where each instruction starts.
pub fn assemble_extra<I, T>(instructions: I) -> Result<AssemblyOutput<T>, AssemblyError>
where
    I: IntoIterator<Item = (Instruction, T)>,
    T: Hash + Eq,
{
    instructions.into_iter().try_fold(
        AssemblyOutput {
            machine_code: Vec::new(),
            extra_map: BiMap::new(),
        },
        |mut output, (instruction, extra)| {
            let instruction_machine_code = instruction.assemble()?;

            output
                .extra_map
                .insert(output.machine_code.len() as Word, extra);
            output.machine_code.extend(instruction_machine_code);

            Ok(output)
        },
    )
}
