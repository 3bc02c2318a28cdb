use crate::{
    instruction::{AssemblyError, DecodeError},
    source::SliceSource,
    Word,
};

use super::{Value, ValueSlot};

#[test]
fn value_strings() {
    let tests: [(&str, Word, ValueSlot, Option<Word>); 17] = [
        ("A", 0x00, ValueSlot::A, None),
        ("J", 0x07, ValueSlot::B, None),
        ("[A]", 0x08, ValueSlot::A, None),
        ("[J]", 0x0f, ValueSlot::B, None),
        ("[A+0x4321]", 0x10, ValueSlot::A, Some(0x4321)),
        ("[J+0x1234]", 0x17, ValueSlot::B, Some(0x1234)),
        ("POP", 0x18, ValueSlot::A, None),
        ("PUSH", 0x18, ValueSlot::B, None),
        ("PEEK", 0x19, ValueSlot::A, None),
        ("PICK 0x0003", 0x1a, ValueSlot::A, Some(0x0003)),
        ("SP", 0x1b, ValueSlot::B, None),
        ("PC", 0x1c, ValueSlot::B, None),
        ("EX", 0x1d, ValueSlot::A, None),
        ("[0xdead]", 0x1e, ValueSlot::B, Some(0xdead)),
        ("0xbeef", 0x1f, ValueSlot::A, Some(0xbeef)),
        ("-1", 0x20, ValueSlot::A, None),
        ("30", 0x3f, ValueSlot::A, None),
    ];

    for (expected, code, slot, extra_word) in tests {
        let extra_words: Vec<Word> = extra_word.into_iter().collect();
        let mut source = SliceSource::new(&extra_words);

        let mut value = Value::resolve(code, slot)
            .unwrap_or_else(|e| panic!("value code 0x{:02x} failed to resolve: {}", code, e));

        assert_eq!(
            value.extra_words() as usize,
            extra_words.len(),
            "extra words of {}",
            expected
        );

        value.load_extra_word(&mut source).unwrap();

        assert!(
            source.is_exhausted(),
            "value {} (0x{:02x}) did not consume its extra word",
            value,
            code
        );
        assert_eq!(value.to_string(), expected);
    }
}

#[test]
fn push_pop_depend_on_slot() {
    assert_eq!(Value::resolve(0x18, ValueSlot::A), Ok(Value::Pop));
    assert_eq!(Value::resolve(0x18, ValueSlot::B), Ok(Value::Push));
    assert_eq!(Value::resolve(0x1a, ValueSlot::B), Ok(Value::Pick(0)));
}

#[test]
fn literal_range() {
    assert_eq!(Value::resolve(0x20, ValueSlot::A), Ok(Value::Literal(0xffff)));
    assert_eq!(Value::resolve(0x21, ValueSlot::A), Ok(Value::Literal(0)));
    assert_eq!(Value::resolve(0x3f, ValueSlot::A), Ok(Value::Literal(30)));
}

#[test]
fn literal_destination_is_rejected() {
    assert_eq!(
        Value::resolve(0x25, ValueSlot::B),
        Err(DecodeError::InvalidValueContext(0x25))
    );
}

#[test]
fn invalid_value_code() {
    assert_eq!(
        Value::resolve(0x40, ValueSlot::A),
        Err(DecodeError::InvalidValueCode(0x40))
    );
}

#[test]
fn encode_literals() {
    assert_eq!(Value::Literal(0xffff).encode(ValueSlot::A), Ok((0x20, None)));
    assert_eq!(Value::Literal(30).encode(ValueSlot::A), Ok((0x3f, None)));
    assert_eq!(
        Value::Literal(31).encode(ValueSlot::A),
        Ok((0x1f, Some(31)))
    );
    assert_eq!(
        Value::Literal(1).encode(ValueSlot::B),
        Err(AssemblyError::LiteralDestination)
    );
}

#[test]
fn encode_stack_values() {
    assert_eq!(Value::Pop.encode(ValueSlot::A), Ok((0x18, None)));
    assert_eq!(Value::Push.encode(ValueSlot::B), Ok((0x18, None)));
    assert_eq!(
        Value::Push.encode(ValueSlot::A),
        Err(AssemblyError::StackValueSlot(Value::Push, ValueSlot::A))
    );
    assert_eq!(
        Value::Pop.encode(ValueSlot::B),
        Err(AssemblyError::StackValueSlot(Value::Pop, ValueSlot::B))
    );
}
