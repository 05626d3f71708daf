//! Property tests: accessor resolution ignores key casing, and probes never repeat.

use gateway_conformance::contract::AccessorResolver;
use gateway_conformance::executor::ProbeGenerator;
use gateway_conformance::models::ParameterBag;
use proptest::prelude::*;
use std::collections::HashSet;

/// One to four lowercase words of two letters or more making up a parameter key.
fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{2,8}", 1..5)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn camel_case(words: &[String]) -> String {
    let mut key = words[0].clone();
    key.extend(words[1..].iter().map(|w| capitalize(w)));
    key
}

proptest! {
    #[test]
    fn stem_ignores_casing_and_separators(words in arb_words()) {
        let expected: String = words.iter().map(|w| capitalize(w)).collect();

        prop_assert_eq!(AccessorResolver::stem(&words.join("_")), expected.clone());
        prop_assert_eq!(AccessorResolver::stem(&words.join("-")), expected.clone());
        prop_assert_eq!(AccessorResolver::stem(&words.join(" ")), expected.clone());
        prop_assert_eq!(AccessorResolver::stem(&camel_case(&words)), expected.clone());
        prop_assert_eq!(AccessorResolver::stem(&expected), expected.clone());
        prop_assert_eq!(
            AccessorResolver::stem(&words.join("_").to_uppercase()),
            expected
        );
    }

    #[test]
    fn leading_acronym_is_one_word(words in arb_words()) {
        let expected: String = words.iter().map(|w| capitalize(w)).collect();
        let mut key = words[0].to_uppercase();
        key.extend(words[1..].iter().map(|w| capitalize(w)));

        prop_assert_eq!(AccessorResolver::stem(&key), expected);
    }

    #[test]
    fn resolve_is_deterministic(key in "\\PC{0,24}") {
        let first = AccessorResolver::resolve(&key);
        let second = AccessorResolver::resolve(&key);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.getter, format!("get{}", first.stem));
        prop_assert_eq!(first.setter, format!("set{}", first.stem));
    }

    #[test]
    fn request_lookup_accepts_any_casing(words in arb_words(), value in "[a-z0-9]{1,12}") {
        let bag = ParameterBag::new().with(words.join("_"), value.clone());

        let found = AccessorResolver::find_in_bag(&bag, &camel_case(&words));
        prop_assert_eq!(found.and_then(|v| v.as_str()), Some(value.as_str()));
    }

    #[test]
    fn probes_never_repeat(prefix in "[a-z]{1,6}-", count in 1usize..500) {
        let mut probes = ProbeGenerator::new(prefix.clone());
        let mut seen = HashSet::new();

        for _ in 0..count {
            let probe = probes.next_probe();
            let text = probe.as_str().unwrap_or_default().to_string();
            prop_assert!(text.starts_with(&prefix));
            prop_assert!(seen.insert(text));
        }
        prop_assert_eq!(probes.issued(), count as u64);
    }
}
