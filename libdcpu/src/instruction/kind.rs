use std::fmt::Display;

use bimap::BiMap;
use lazy_static::lazy_static;

use crate::Word;

lazy_static! {
    static ref KIND_OPCODE_BIMAP: BiMap<InstructionKind, Word> = BiMap::from_iter([
        (InstructionKind::Set, 0x01),
        (InstructionKind::Add, 0x02),
        (InstructionKind::Sub, 0x03),
        (InstructionKind::Mul, 0x04),
        (InstructionKind::Mli, 0x05),
        (InstructionKind::Div, 0x06),
        (InstructionKind::Dvi, 0x07),
        (InstructionKind::Mod, 0x08),
        (InstructionKind::Mdi, 0x09),
        (InstructionKind::And, 0x0a),
        (InstructionKind::Bor, 0x0b),
        (InstructionKind::Xor, 0x0c),
        (InstructionKind::Shr, 0x0d),
        (InstructionKind::Asr, 0x0e),
        (InstructionKind::Shl, 0x0f),
        (InstructionKind::Ifb, 0x10),
        (InstructionKind::Ifc, 0x11),
        (InstructionKind::Ife, 0x12),
        (InstructionKind::Ifn, 0x13),
        (InstructionKind::Ifg, 0x14),
        (InstructionKind::Ifa, 0x15),
        (InstructionKind::Ifl, 0x16),
        (InstructionKind::Ifu, 0x17),
        (InstructionKind::Adx, 0x1a),
        (InstructionKind::Sbx, 0x1b),
        (InstructionKind::Sti, 0x1e),
        (InstructionKind::Std, 0x1f),
    ]);

    // Interrupt and hardware opcodes share this table but aren't emulated.
    static ref KIND_SPECIAL_OPCODE_BIMAP: BiMap<InstructionKind, Word> =
        BiMap::from_iter([(InstructionKind::Jsr, 0x01)]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Jsr,

    Set,

    Add,
    Sub,
    Mul,
    Mli,
    Div,
    Dvi,
    Mod,
    Mdi,

    And,
    Bor,
    Xor,
    Shr,
    Asr,
    Shl,

    Ifb,
    Ifc,
    Ife,
    Ifn,
    Ifg,
    Ifa,
    Ifl,
    Ifu,

    Adx,
    Sbx,

    Sti,
    Std,
}

impl InstructionKind {
    pub fn from_opcode(opcode: Word) -> Option<Self> {
        KIND_OPCODE_BIMAP.get_by_right(&opcode).copied()
    }

    pub fn from_special_opcode(opcode: Word) -> Option<Self> {
        KIND_SPECIAL_OPCODE_BIMAP.get_by_right(&opcode).copied()
    }

    /// Opcode of the instruction, looked up in the special opcode table for unary instructions.
    pub fn opcode(&self) -> Word {
        let table: &BiMap<InstructionKind, Word> = if self.is_special() {
            &*KIND_SPECIAL_OPCODE_BIMAP
        } else {
            &*KIND_OPCODE_BIMAP
        };

        *table
            .get_by_left(self)
            .expect("No opcode mapping for instruction kind")
    }

    /// Special instructions take a single value and live in the zero opcode space.
    pub fn is_special(&self) -> bool {
        matches!(self, Self::Jsr)
    }

    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            Self::Ifb
                | Self::Ifc
                | Self::Ife
                | Self::Ifn
                | Self::Ifg
                | Self::Ifa
                | Self::Ifl
                | Self::Ifu
        )
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Jsr => "JSR",
            Self::Set => "SET",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Mli => "MLI",
            Self::Div => "DIV",
            Self::Dvi => "DVI",
            Self::Mod => "MOD",
            Self::Mdi => "MDI",
            Self::And => "AND",
            Self::Bor => "BOR",
            Self::Xor => "XOR",
            Self::Shr => "SHR",
            Self::Asr => "ASR",
            Self::Shl => "SHL",
            Self::Ifb => "IFB",
            Self::Ifc => "IFC",
            Self::Ife => "IFE",
            Self::Ifn => "IFN",
            Self::Ifg => "IFG",
            Self::Ifa => "IFA",
            Self::Ifl => "IFL",
            Self::Ifu => "IFU",
            Self::Adx => "ADX",
            Self::Sbx => "SBX",
            Self::Sti => "STI",
            Self::Std => "STD",
        }
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
