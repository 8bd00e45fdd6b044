use std::fs;

use typeparse::{Delimiters, ParseError, ParserRegistry, Settings};

#[test]
fn settings_file_configures_the_registry() {
    let path = std::env::temp_dir().join(format!("typeparse-settings-{}.toml", std::process::id()));
    fs::write(
        &path,
        "collection_delimiter = \"/\"\nkey_value_delimiter = \":\"\ndictionary_delimiter = \"&\"\n",
    )
    .unwrap();
    let settings = Settings::load(Some(path.as_path()));
    fs::remove_file(&path).unwrap();
    let settings = settings.expect("settings load");

    let delimiters = settings.delimiters().unwrap();
    assert_eq!(delimiters, Delimiters { collection: '/', key_value: ':', dictionary: '&' });
    let registry = ParserRegistry::from_settings(&settings, &Default::default()).unwrap();
    assert_eq!(registry.delimiters(), &delimiters);
    let parsed: std::collections::BTreeMap<String, Vec<i32>> = registry.parse("a:1/2-3&b:4").unwrap();
    assert_eq!(parsed["a"], vec![1, 2, 3]);
    assert_eq!(parsed["b"], vec![4]);
}

#[test]
fn quote_delimiters_are_rejected() {
    let settings = Settings { collection_delimiter: "\"".into(), ..Settings::default() };
    let err = ParserRegistry::from_settings(&settings, &Default::default()).err();
    assert!(matches!(err, Some(ParseError::Configuration(_))));
}

#[test]
fn multi_character_delimiters_are_rejected() {
    let settings = Settings { key_value_delimiter: "=>".into(), ..Settings::default() };
    let err = ParserRegistry::from_settings(&settings, &Default::default()).err();
    assert!(matches!(err, Some(ParseError::Configuration(_))));
}
