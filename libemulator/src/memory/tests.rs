use libdcpu::{instruction::Instruction, source::WordSource};

use super::Memory;

#[test]
fn program_is_padded_to_address_space() {
    let memory = Memory::new(&[0xABCD, 0x1234]);

    assert_eq!(memory.iter().count(), libdcpu::MEMORY_SIZE);
    assert_eq!(memory.word(0), 0xABCD);
    assert_eq!(memory.word(1), 0x1234);
    assert_eq!(memory.word(0xffff), 0);
}

#[test]
fn word_mut_writes_through() {
    let magic = 0xABCD;

    let mut memory = Memory::new(&[]);
    *memory.word_mut(0xfffe) = magic;

    assert_eq!(memory.word(0xfffe), magic);
}

#[test]
fn load_wraps_around() {
    let mut memory = Memory::new(&[]);
    memory.load(0xffff, &[1, 2, 3]);

    assert_eq!(memory.word(0xffff), 1);
    assert_eq!(memory.word(0x0000), 2);
    assert_eq!(memory.word(0x0001), 3);
}

#[test]
fn source_reads_and_skips() -> anyhow::Result<()> {
    // SET A, 0x0030 / SET PC, POP
    let memory = Memory::new(&[0x7c01, 0x0030, 0x6381]);

    let mut source = memory.source_at(0);
    let instruction = Instruction::load(&mut source)?;
    assert_eq!(instruction.to_string(), "SET A, 0x0030");
    assert_eq!(source.addr(), 2);

    let mut source = memory.source_at(0xffff);
    assert_eq!(source.next_word()?, 0);
    source.skip_words(2)?;
    assert_eq!(source.addr(), 2);

    Ok(())
}

#[test]
fn disassemble_resumes_after_bad_word() {
    // SET A, 0x0030 / <invalid> / JSR 0x0018
    let memory = Memory::new(&[0x7c01, 0x0030, 0x0018, 0x7c20, 0x0018]);

    let listing = memory.disassemble(0, 3);

    assert_eq!(listing[0].0, 0);
    assert_eq!(listing[0].1.map(|i| i.to_string()), Ok("SET A, 0x0030".to_owned()));
    assert_eq!(listing[1].0, 2);
    assert!(listing[1].1.is_err());
    assert_eq!(listing[2].0, 3);
    assert_eq!(listing[2].1.map(|i| i.to_string()), Ok("JSR 0x0018".to_owned()));
}
