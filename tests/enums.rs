use std::collections::HashMap;

use typeparse::{enumeration, DataType, Enumeration, ParseError, ParserRegistry};

enumeration! {
    #[derive(Default)]
    pub enum StringParsingTestEnum {
        #[default]
        NoValue = 0,
        ThisIsValue1 = 1,
        ThisIsValue2 = 2,
    }
}

enumeration! {
    pub enum Sparse {
        Low = -10,
        High = 100,
    }
}

#[test]
fn names_and_integers_parse() {
    let registry = ParserRegistry::new();
    assert_eq!(
        registry.parse::<StringParsingTestEnum>("ThisIsValue1").unwrap(),
        StringParsingTestEnum::ThisIsValue1
    );
    assert_eq!(
        registry.parse::<StringParsingTestEnum>("2").unwrap(),
        StringParsingTestEnum::ThisIsValue2
    );
    assert_eq!(registry.parse::<Sparse>("-10").unwrap(), Sparse::Low);
    assert_eq!(registry.parse::<Sparse>("High").unwrap(), Sparse::High);
}

#[test]
fn undeclared_values_are_out_of_range() {
    let registry = ParserRegistry::new();
    for text in ["3", "ThisValueDoesNotExist"] {
        match registry.parse::<StringParsingTestEnum>(text) {
            Err(ParseError::OutOfRange { value, type_name }) => {
                assert_eq!(value, text);
                assert_eq!(type_name, "StringParsingTestEnum");
            }
            other => panic!("{text} gave {other:?}"),
        }
    }
    assert!(matches!(registry.parse::<Sparse>("0"), Err(ParseError::OutOfRange { .. })));
}

#[test]
fn enum_lists_trim_their_tokens() {
    let registry = ParserRegistry::new();
    let by_name: Vec<StringParsingTestEnum> = registry.parse("ThisIsValue1, ThisIsValue2").unwrap();
    assert_eq!(
        by_name,
        vec![StringParsingTestEnum::ThisIsValue1, StringParsingTestEnum::ThisIsValue2]
    );
    let by_value: Vec<StringParsingTestEnum> = registry.parse("0, 2").unwrap();
    assert_eq!(by_value, vec![StringParsingTestEnum::NoValue, StringParsingTestEnum::ThisIsValue2]);
}

#[test]
fn enum_dictionary_values() {
    let registry = ParserRegistry::new();
    let parsed: HashMap<String, StringParsingTestEnum> =
        registry.parse("noVal=0;one=ThisIsValue1;tttwo=2").unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed["noVal"], StringParsingTestEnum::NoValue);
    assert_eq!(parsed["one"], StringParsingTestEnum::ThisIsValue1);
    assert_eq!(parsed["tttwo"], StringParsingTestEnum::ThisIsValue2);
}

#[test]
fn descriptors_list_declared_members() {
    let members = StringParsingTestEnum::DESCRIPTOR.members();
    assert_eq!(members, &[("NoValue", 0), ("ThisIsValue1", 1), ("ThisIsValue2", 2)]);
    assert_eq!(StringParsingTestEnum::descriptor().to_string(), "StringParsingTestEnum");
    assert_eq!(
        ParserRegistry::new().safe_parse::<StringParsingTestEnum>("nope"),
        StringParsingTestEnum::NoValue
    );
}
