use std::collections::HashSet;

use chrono::NaiveDate;
use jarvis::config::DEFAULT_CAPABILITY_HINT;
use jarvis::kernel::error::EngineError;
use jarvis::kernel::fallback::{
    ConversationalRule, CyclingSampler, FallbackResponder, RandomSampler, Reply, ResponsePool,
    ResponsePools, UNKNOWN_CATEGORY,
};
use jarvis::kernel::time::FixedClock;
use jarvis::{DispatchOutcome, Engine, EngineConfig, HandlerRegistry};

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 7, 0).unwrap())
}

fn responder() -> FallbackResponder {
    FallbackResponder::standard("Jarvis", DEFAULT_CAPABILITY_HINT).unwrap()
}

fn engine() -> Engine {
    let config = EngineConfig {
        seed: Some(11),
        ..EngineConfig::default()
    };
    Engine::new(&config, HandlerRegistry::new()).unwrap()
}

fn conversational(outcome: DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Conversational(text) => text,
        other => panic!("expected a conversational reply, got {:?}", other),
    }
}

#[test]
fn test_topic_question_gets_fixed_answer() {
    let mut engine = engine();
    let first = conversational(engine.interpret("tell me about your favorite color"));
    let second = conversational(engine.interpret("Tell me about your FAVORITE color"));
    assert!(first.starts_with("As an AI assistant, I don't have personal preferences"));
    assert_eq!(first, second);
}

#[test]
fn test_adversarial_inputs_always_get_a_reply() {
    let mut engine = engine();
    let unknown = ResponsePools::unknown().unwrap();
    let long = "a".repeat(10_000);
    let inputs = ["", "   ", "?!?!", "日本語", "\u{0}\u{7f}", long.as_str()];

    for input in inputs {
        let reply = conversational(engine.interpret(input));
        assert!(!reply.is_empty());
        let base = reply
            .strip_suffix(DEFAULT_CAPABILITY_HINT)
            .map(str::trim_end)
            .unwrap_or_else(|| panic!("missing capability hint in {:?}", reply));
        assert!(unknown.contains(base), "{:?} not in unknown pool", base);
    }
}

#[test]
fn test_category_replies_come_from_their_pool() {
    let mut engine = engine();
    let cases = [
        ("thank you so much", ResponsePools::gratitude().unwrap()),
        ("sorry about that", ResponsePools::apologies().unwrap()),
        ("who are you", ResponsePools::identity().unwrap()),
        ("you're amazing", ResponsePools::compliments().unwrap()),
    ];
    for (input, pool) in cases {
        for _ in 0..10 {
            let reply = conversational(engine.interpret(input));
            assert!(pool.contains(&reply), "{:?} -> {:?}", input, reply);
        }
    }
}

#[test]
fn test_every_pool_member_is_eventually_selected() {
    let responder = responder();
    let mut sampler = RandomSampler::seeded(42);
    let clock = clock();

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let reply = responder.respond("xyzzy", &mut sampler, &clock);
        assert_eq!(reply.category, UNKNOWN_CATEGORY);
        seen.insert(reply.text);
    }
    assert_eq!(seen.len(), responder.unknown_pool().replies().len());
}

#[test]
fn test_cycling_sampler_walks_pool_in_order() {
    let responder = responder();
    let mut sampler = CyclingSampler::new();
    let clock = clock();
    let pool = ResponsePools::greetings().unwrap();

    for round in 0..2 {
        for expected in pool.replies() {
            let reply = responder.respond("hey there", &mut sampler, &clock);
            assert_eq!(reply.category, "greeting");
            assert_eq!(&reply.text, expected, "round {}", round);
        }
    }
}

#[test]
fn test_time_and_date_use_the_clock() {
    let responder = responder();
    let mut sampler = CyclingSampler::new();
    let clock = clock();

    let time = responder.respond("what's the current time", &mut sampler, &clock);
    assert_eq!(time.category, "time");
    assert_eq!(time.text, "The current time is 02:07 PM");

    let date = responder.respond("what day is it", &mut sampler, &clock);
    assert_eq!(date.category, "date");
    assert_eq!(date.text, "Today is Tuesday, March 05, 2024");
}

#[test]
fn test_name_topic_is_shadowed_by_identity() {
    let responder = responder();
    let reply = responder.respond("what is your name", &mut CyclingSampler::new(), &clock());
    assert_eq!(reply.category, "identity");
}

#[test]
fn test_unknown_without_hint_has_no_trailing_space() {
    let hello = ConversationalRule::new("greeting", &["hello"], Reply::Fixed("Hi.".into()));
    let rules = vec![hello.unwrap()];
    let responder = FallbackResponder::new(rules, ResponsePools::unknown().unwrap(), "   ");

    let reply = responder.respond("xyzzy", &mut CyclingSampler::new(), &clock());
    assert_eq!(reply.text, "I'm not sure I understand. Could you rephrase that?");

    let reply = responder.respond("hello", &mut CyclingSampler::new(), &clock());
    assert_eq!(reply.text, "Hi.");
}

#[test]
fn test_empty_pools_are_rejected() {
    assert!(matches!(ResponsePool::new("empty", &[]), Err(EngineError::EmptyPool { .. })));
    assert!(matches!(ResponsePool::new("blank", &["  ", ""]), Err(EngineError::EmptyPool { .. })));
}
