use std::sync::Arc;

use jarvis::kernel::intent::{
    strip_phrases, ArgumentBundle, Extraction, Extractor, IntentMatcher, RuleTable, SlotKind,
};

fn extract(utterance: &str) -> (String, Extraction) {
    let matcher = IntentMatcher::new(Arc::new(RuleTable::standard().unwrap()));
    let (_, rule) = matcher.find(utterance).expect("utterance should match a rule");
    (rule.action.to_string(), rule.extractor.extract(utterance))
}

fn complete(utterance: &str) -> (String, ArgumentBundle) {
    match extract(utterance) {
        (action, Extraction::Complete(args)) => (action, args),
        (action, other) => panic!("{} -> {:?}", action, other),
    }
}

#[test]
fn test_search_query_is_what_remains_after_stripping() {
    let (action, args) = complete("search for the best pizza recipe");
    assert_eq!(action, "web_search");
    assert_eq!(args.get("query"), Some("the best pizza recipe"));
    assert_eq!(args.len(), 1);
}

#[test]
fn test_timer_minutes_and_seconds() {
    let (action, args) = complete("set a timer for 2 minutes and 30 seconds");
    assert_eq!(action, "set_timer");
    assert_eq!(args.get_int("minutes"), Some(2));
    assert_eq!(args.get_int("seconds"), Some(30));
}

#[test]
fn test_timer_single_units_and_bare_numbers() {
    let (_, args) = complete("set a timer for 5 minutes");
    assert_eq!((args.get_int("minutes"), args.get_int("seconds")), (Some(5), Some(0)));

    let (_, args) = complete("timer 45 seconds");
    assert_eq!((args.get_int("minutes"), args.get_int("seconds")), (Some(0), Some(45)));

    // One bare number is seconds, two are minutes then seconds.
    let (_, args) = complete("timer 90");
    assert_eq!((args.get_int("minutes"), args.get_int("seconds")), (Some(0), Some(90)));
    let (_, args) = complete("timer 1 15");
    assert_eq!((args.get_int("minutes"), args.get_int("seconds")), (Some(1), Some(15)));
}

#[test]
fn test_timer_without_duration_needs_clarification() {
    let (action, extraction) = extract("set a timer");
    assert_eq!(action, "set_timer");
    assert_eq!(extraction, Extraction::NeedsClarification { slot: "duration".into() });
}

#[test]
fn test_factorial_and_binary_captures() {
    let (action, args) = complete("what is the factorial of 5");
    assert_eq!(action, "factorial");
    assert_eq!(args.get_int("n"), Some(5));

    let (action, args) = complete("binary of 10");
    assert_eq!(action, "binary_convert");
    assert_eq!(args.get_int("n"), Some(10));
}

#[test]
fn test_strip_is_longest_first() {
    // Caller order does not matter: "search for" goes before "search".
    assert_eq!(strip_phrases("search for cats", &["search", "search for"]), "cats");
    assert_eq!(strip_phrases("search for cats", &["search for", "search"]), "cats");
    assert_eq!(strip_phrases("  look   up   rust  ", &["look up"]), "rust");
}

#[test]
fn test_empty_strip_result_needs_clarification() {
    let (action, extraction) = extract("search");
    assert_eq!(action, "web_search");
    assert_eq!(extraction, Extraction::NeedsClarification { slot: "query".into() });
}

#[test]
fn test_failed_coercion_counts_as_missing() {
    // Does not fit in an i64.
    let (action, extraction) = extract("factorial 99999999999999999999999");
    assert_eq!(action, "factorial");
    assert_eq!(extraction, Extraction::NeedsClarification { slot: "n".into() });

    let extractor = Extractor::capture("n", &[r"number\s+(\S+)"], SlotKind::Float).unwrap();
    assert_eq!(
        extractor.extract("number abc"),
        Extraction::NeedsClarification { slot: "n".into() }
    );
}

#[test]
fn test_default_fills_absent_slot() {
    let extractor = Extractor::capture("positions", &[r"by\s+(\d+)"], SlotKind::Integer)
        .unwrap()
        .or_default("1");
    match extractor.extract("shift 8") {
        Extraction::Complete(args) => assert_eq!(args.get("positions"), Some("1")),
        other => panic!("{:?}", other),
    }
    match extractor.extract("shift 8 by 3") {
        Extraction::Complete(args) => assert_eq!(args.get("positions"), Some("3")),
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_optional_slots_may_be_absent() {
    let (action, args) = complete("weather");
    assert_eq!(action, "weather");
    assert!(args.is_empty());

    let (_, args) = complete("weather in london");
    assert_eq!(args.get("city"), Some("london"));
}

#[test]
fn test_directions_origin_and_destination() {
    let (action, args) = complete("directions from home to the office");
    assert_eq!(action, "directions");
    assert_eq!(args.get("origin"), Some("home"));
    assert_eq!(args.get("destination"), Some("the office"));

    let (_, args) = complete("directions to the station");
    assert!(!args.contains("origin"));
    assert_eq!(args.get("destination"), Some("the station"));
}

#[test]
fn test_keyword_slot() {
    let (action, args) = complete("create a new file in python");
    assert_eq!(action, "create_file");
    assert_eq!(args.get("file_type"), Some("python"));

    let (_, extraction) = extract("create a new file");
    assert_eq!(extraction, Extraction::NeedsClarification { slot: "file_type".into() });
}

#[test]
fn test_trigonometry_combines_parts() {
    let (action, args) = complete("what is sin 30 degrees");
    assert_eq!(action, "trigonometry");
    assert_eq!(args.get("function"), Some("sin"));
    assert_eq!(args.get_int("angle"), Some(30));
    assert_eq!(args.get("unit"), Some("degrees"));

    let (_, args) = complete("cos 0");
    assert_eq!(args.get("unit"), Some("radians"));
}

#[test]
fn test_constant_volume_direction() {
    let (action, args) = complete("volume up please");
    assert_eq!(action, "adjust_volume");
    assert_eq!(args.get("direction"), Some("up"));

    let (_, args) = complete("mute");
    assert_eq!(args.get("direction"), Some("mute"));
}

#[test]
fn test_todo_item_and_dice_sides() {
    let (action, args) = complete("add to my list buy milk");
    assert_eq!(action, "add_todo");
    assert_eq!(args.get("item"), Some("buy milk"));

    let (action, args) = complete("roll a 20-sided dice");
    assert_eq!(action, "roll_dice");
    assert_eq!(args.get_int("sides"), Some(20));

    let (_, args) = complete("roll a dice");
    assert!(!args.contains("sides"));
}

#[test]
fn test_bit_shift_rule_extraction() {
    // In the standard table "shift" also contains "hi", so greet claims these
    // utterances first; run the rule on its own.
    let standard = RuleTable::standard().unwrap();
    let rule = standard
        .rules()
        .iter()
        .find(|r| r.action.as_str() == "bit_shift")
        .unwrap()
        .clone();
    let matcher = IntentMatcher::new(Arc::new(RuleTable::new(vec![rule])));

    let (_, rule) = matcher.find("right shift 8 by 2").unwrap();
    match rule.extractor.extract("right shift 8 by 2") {
        Extraction::Complete(args) => {
            assert_eq!(args.get("direction"), Some("right"));
            assert_eq!(args.get_int("n"), Some(8));
            assert_eq!(args.get_int("positions"), Some(2));
        }
        other => panic!("{:?}", other),
    }

    match rule.extractor.extract("left shift 5") {
        Extraction::Complete(args) => {
            assert_eq!(args.get("direction"), Some("left"));
            assert_eq!(args.get_int("n"), Some(5));
            assert_eq!(args.get("positions"), Some("1"));
        }
        other => panic!("{:?}", other),
    }

    assert_eq!(
        rule.extractor.extract("left shift"),
        Extraction::NeedsClarification { slot: "n".into() }
    );
}
