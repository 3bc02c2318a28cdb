use crate::{
    source::{SliceSource, SourceError},
    value::Value,
    Register, Word,
};

use super::{
    assembler::{assemble, assemble_extra},
    kind::InstructionKind,
    AssemblyError, DecodeError, Instruction,
};

/// The Notch example program, with labels replaced by addresses and literal lengths marking next
/// word (4 hex digits) versus embedded literal (decimal) values.
pub const NOTCH_EXAMPLE: [(&str, &[Word]); 17] = [
    // Try some basic stuff
    ("SET A, 0x0030", &[0x7c01, 0x0030]),
    ("SET [0x1000], 0x0020", &[0x7fc1, 0x0020, 0x1000]),
    ("SUB A, [0x1000]", &[0x7803, 0x1000]),
    ("IFN A, 16", &[0xc413]),
    ("SET PC, 0x001a", &[0x7f81, 0x001a]),
    // Do a loopy thing
    ("SET I, 10", &[0xacc1]),
    ("SET A, 0x2000", &[0x7c01, 0x2000]),
    ("SET [I+0x2000], [A]", &[0x22c1, 0x2000]),
    ("SUB I, 1", &[0x88c3]),
    ("IFN I, 0", &[0x84d3]),
    ("SET PC, 0x000d", &[0x7f81, 0x000d]),
    // Call a subroutine
    ("SET X, 4", &[0x9461]),
    ("JSR 0x0018", &[0x7c20, 0x0018]),
    ("SET PC, 0x001a", &[0x7f81, 0x001a]),
    ("SHL X, 4", &[0x946f]),
    ("SET PC, POP", &[0x6381]),
    // Hang forever. X should now be 0x40 if everything went right.
    ("SET PC, 0x001a", &[0x7f81, 0x001a]),
];

#[test]
fn load_notch_example() {
    for (expected, words) in NOTCH_EXAMPLE {
        let mut source = SliceSource::new(words);

        let instruction = Instruction::load(&mut source)
            .unwrap_or_else(|e| panic!("instruction {:x?} returned error {}", words, e));

        assert!(
            source.is_exhausted(),
            "instruction {} ({:x?}) did not exhaust words to load",
            instruction,
            words
        );
        assert_eq!(instruction.size() as usize, words.len());
        assert_eq!(instruction.to_string(), expected, "words {:x?}", words);
        assert_eq!(
            instruction.assemble().as_deref(),
            Ok(words),
            "reassembling {}",
            expected
        );
    }
}

#[test]
fn skip_consumes_whole_instructions() {
    let program: Vec<Word> = NOTCH_EXAMPLE
        .iter()
        .flat_map(|(_, words)| words.iter().copied())
        .collect();

    let mut source = SliceSource::new(&program);
    let mut skipped = 0;

    while !source.is_exhausted() {
        Instruction::skip(&mut source).unwrap();
        skipped += 1;
    }

    assert_eq!(skipped, NOTCH_EXAMPLE.len());
    assert_eq!(source.position(), program.len());
}

#[test]
fn extra_words_load_a_before_b() {
    let words = [0x4601, 0x0002, 0x0001];
    let mut source = SliceSource::new(&words);

    let instruction = Instruction::load(&mut source).unwrap();

    assert_eq!(instruction.a, Value::RegisterRelAddress(Register::B, 0x0002));
    assert_eq!(instruction.b, Some(Value::RegisterRelAddress(Register::A, 0x0001)));
    assert_eq!(instruction.to_string(), "SET [A+0x0001], [B+0x0002]");
}

#[test]
fn count_extra_words() {
    assert_eq!(Instruction::count_extra_words(0x7fc1), Ok(2));
    assert_eq!(Instruction::count_extra_words(0x6381), Ok(0));
    assert_eq!(Instruction::count_extra_words(0x7c20), Ok(1));
}

#[test]
fn invalid_opcodes() {
    assert_eq!(
        Instruction::deassemble_instruction_word(0x0018),
        Err(DecodeError::InvalidBinaryOpcode(0x18))
    );
    assert_eq!(
        Instruction::deassemble_instruction_word(0x001d),
        Err(DecodeError::InvalidBinaryOpcode(0x1d))
    );
    assert_eq!(
        Instruction::deassemble_instruction_word(0x0000),
        Err(DecodeError::InvalidUnaryOpcode(0x00))
    );
    assert_eq!(
        Instruction::deassemble_instruction_word(0x0040),
        Err(DecodeError::InvalidUnaryOpcode(0x02))
    );
}

#[test]
fn end_of_input() {
    let mut empty = SliceSource::new(&[]);
    let error = Instruction::load(&mut empty).unwrap_err();
    assert!(error.is_end_of_input());

    // SET A, next word, with the next word missing.
    let mut truncated = SliceSource::new(&[0x7c01]);
    let error = Instruction::load(&mut truncated).unwrap_err();
    assert_eq!(error, DecodeError::IncompleteInstruction);
    assert!(!error.is_end_of_input());

    let mut truncated = SliceSource::new(&[0x7c01]);
    assert_eq!(
        Instruction::skip(&mut truncated),
        Err(DecodeError::IncompleteInstruction)
    );
}

#[test]
fn skip_propagates_decode_errors() {
    let mut source = SliceSource::new(&[0x0018, 0x7c01]);
    assert_eq!(
        Instruction::skip(&mut source),
        Err(DecodeError::InvalidBinaryOpcode(0x18))
    );
    assert_eq!(source.position(), 1);
}

#[test]
fn source_error_display() {
    let error = DecodeError::from(SourceError::SkipUnsupported);
    assert_eq!(error.to_string(), "Word source cannot skip");
    assert_eq!(
        DecodeError::InvalidValueCode(0x40).to_string(),
        "Invalid value code 0x40"
    );
}

#[test]
fn signed_instructions_format() {
    let words = [0x7c05, 0xfffd];
    let instruction = Instruction::load(&mut SliceSource::new(&words)).unwrap();
    assert_eq!(instruction.to_string(), "MLI A, 0xfffd");

    let instruction = Instruction::binary(
        InstructionKind::Ifu,
        Value::Register(Register::C),
        Value::Literal(0xffff),
    );
    assert_eq!(instruction.to_string(), "IFU C, -1");
    assert_eq!(instruction.assemble(), Ok(vec![0x8057]));
}

#[test]
fn assembly_errors() {
    let literal_destination = Instruction::binary(
        InstructionKind::Set,
        Value::Literal(1),
        Value::Register(Register::A),
    );
    assert_eq!(
        literal_destination.assemble(),
        Err(AssemblyError::LiteralDestination)
    );

    let missing_b = Instruction {
        kind: InstructionKind::Add,
        b: None,
        a: Value::Register(Register::A),
    };
    assert_eq!(missing_b.assemble(), Err(AssemblyError::MissingValue));

    let extra_b = Instruction {
        kind: InstructionKind::Jsr,
        b: Some(Value::Register(Register::A)),
        a: Value::Register(Register::A),
    };
    assert_eq!(extra_b.assemble(), Err(AssemblyError::UnexpectedValue));
}

#[test]
fn assemble_program_with_labels() -> anyhow::Result<()> {
    let output = assemble_extra([
        (
            Instruction::binary(
                InstructionKind::Set,
                Value::Register(Register::A),
                Value::NextWord(0x0030),
            ),
            "start",
        ),
        (
            Instruction::binary(
                InstructionKind::Ifn,
                Value::Register(Register::A),
                Value::Literal(16),
            ),
            "check",
        ),
        (
            Instruction::unary(InstructionKind::Jsr, Value::NextWord(0x0000)),
            "call",
        ),
    ])?;

    assert_eq!(output.machine_code, [0x7c01, 0x0030, 0xc413, 0x7c20, 0x0000]);
    assert_eq!(output.address_of(&"check"), Some(2));
    assert_eq!(output.address_of(&"call"), Some(3));
    assert_eq!(output.extra_map.get_by_left(&0), Some(&"start"));

    let plain = assemble(NOTCH_EXAMPLE.iter().map(|(_, words)| {
        Instruction::load(&mut SliceSource::new(words)).expect("fixture decodes")
    }))?;
    assert_eq!(plain.len(), 28);

    Ok(())
}

#[test]
fn kind_tables() {
    assert_eq!(InstructionKind::from_opcode(0x1e), Some(InstructionKind::Sti));
    assert_eq!(InstructionKind::from_opcode(0x18), None);
    assert_eq!(InstructionKind::from_special_opcode(0x01), Some(InstructionKind::Jsr));
    assert_eq!(InstructionKind::Jsr.opcode(), 0x01);
    assert_eq!(InstructionKind::Ifu.opcode(), 0x17);
    assert!(InstructionKind::Ifc.is_conditional());
    assert!(!InstructionKind::Sti.is_conditional());
}
