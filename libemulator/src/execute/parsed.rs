use libdcpu::{
    instruction::{kind::InstructionKind, Instruction},
    sign_extend,
    value::Value,
    Register, Word,
};

use crate::Emulator;

use super::ExecuteErr;

/// Where a value reads from and writes to, fixed once its stack side effects have happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Register(Register),
    Memory(Word),
    Sp,
    Pc,
    Ex,
    /// Literals and immediates, writes are dropped.
    Immediate(Word),
}

impl Emulator {
    pub fn execute_parsed_instruction(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(), ExecuteErr> {
        let b_value = match (instruction.kind, instruction.b) {
            (InstructionKind::Jsr, None) => None,
            (InstructionKind::Jsr, Some(_)) | (_, None) => {
                return Err(ExecuteErr::MalformedInstruction(*instruction))
            }
            (_, b) => b,
        };

        // A is always evaluated before B.
        let a_location = self.locate(instruction.a);
        let a = self.load(a_location);

        let Some(b_value) = b_value else {
            let return_addr = self.pc;
            self.push(return_addr);
            self.pc = a;

            return Ok(());
        };

        let b_location = self.locate(b_value);
        let b = self.load(b_location);

        if instruction.kind.is_conditional() {
            if !condition(instruction.kind, b, a) {
                self.skip_next_instruction()?;
            }

            return Ok(());
        }

        let (result, ex) = match instruction.kind {
            InstructionKind::Set | InstructionKind::Sti | InstructionKind::Std => (a, None),

            InstructionKind::Add => with_ex(self.alu.add(b, a)),
            InstructionKind::Sub => with_ex(self.alu.sub(b, a)),
            InstructionKind::Mul => with_ex(self.alu.mul(b, a)),
            InstructionKind::Mli => with_ex(self.alu.mli(b, a)),
            InstructionKind::Div => with_ex(self.alu.div(b, a)),
            InstructionKind::Dvi => with_ex(self.alu.dvi(b, a)),
            InstructionKind::Mod => (self.alu.rem(b, a), None),
            InstructionKind::Mdi => (self.alu.mdi(b, a), None),

            InstructionKind::And => (self.alu.and(b, a), None),
            InstructionKind::Bor => (self.alu.bor(b, a), None),
            InstructionKind::Xor => (self.alu.xor(b, a), None),
            InstructionKind::Shr => with_ex(self.alu.shr(b, a)),
            InstructionKind::Asr => with_ex(self.alu.asr(b, a)),
            InstructionKind::Shl => with_ex(self.alu.shl(b, a)),

            InstructionKind::Adx => with_ex(self.alu.adx(b, a)),
            InstructionKind::Sbx => with_ex(self.alu.sbx(b, a)),

            _ => return Err(ExecuteErr::MalformedInstruction(*instruction)),
        };

        // EX is written after the destination.
        self.store(b_location, result);
        if let Some(ex) = ex {
            self.alu.ex = ex;
        }

        match instruction.kind {
            InstructionKind::Sti => self.step_indices(1),
            InstructionKind::Std => self.step_indices(Word::MAX),
            _ => {}
        }

        Ok(())
    }

    fn step_indices(&mut self, step: Word) {
        for register in [Register::I, Register::J] {
            let index = self.register_mut(register);
            *index = index.wrapping_add(step);
        }
    }

    /// Resolves a value to its location, applying PUSH/POP adjustments to SP exactly once.
    fn locate(&mut self, value: Value) -> Location {
        match value {
            Value::Register(register) => Location::Register(register),
            Value::RegisterAddress(register) => Location::Memory(self.register(register)),
            Value::RegisterRelAddress(register, offset) => {
                Location::Memory(self.register(register).wrapping_add(offset))
            }
            Value::Push => Location::Memory(self.sp_push_address()),
            Value::Pop => Location::Memory(self.sp_pop_address()),
            Value::Peek => Location::Memory(self.sp),
            Value::Pick(offset) => Location::Memory(self.sp.wrapping_add(offset)),
            Value::Sp => Location::Sp,
            Value::Pc => Location::Pc,
            Value::Ex => Location::Ex,
            Value::Address(addr) => Location::Memory(addr),
            Value::NextWord(word) | Value::Literal(word) => Location::Immediate(word),
        }
    }

    fn load(&self, location: Location) -> Word {
        match location {
            Location::Register(register) => self.register(register),
            Location::Memory(addr) => self.memory.word(addr),
            Location::Sp => self.sp,
            Location::Pc => self.pc,
            Location::Ex => self.ex(),
            Location::Immediate(word) => word,
        }
    }

    fn store(&mut self, location: Location, value: Word) {
        let dest = match location {
            Location::Register(register) => self.register_mut(register),
            Location::Memory(addr) => self.memory.word_mut(addr),
            Location::Sp => &mut self.sp,
            Location::Pc => &mut self.pc,
            Location::Ex => self.ex_mut(),
            Location::Immediate(_) => return,
        };

        *dest = value;
    }
}

fn with_ex((value, ex): (Word, Word)) -> (Word, Option<Word>) {
    (value, Some(ex))
}

/// Whether a conditional instruction lets the next instruction run.
fn condition(kind: InstructionKind, b: Word, a: Word) -> bool {
    match kind {
        InstructionKind::Ifb => b & a != 0,
        InstructionKind::Ifc => b & a == 0,
        InstructionKind::Ife => b == a,
        InstructionKind::Ifn => b != a,
        InstructionKind::Ifg => b > a,
        InstructionKind::Ifa => sign_extend(b) > sign_extend(a),
        InstructionKind::Ifl => b < a,
        InstructionKind::Ifu => sign_extend(b) < sign_extend(a),
        _ => true,
    }
}
