use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use jarvis::handlers::timer::{self, Announcer, TimerHandler, TIMER_DONE};
use jarvis::handlers::todo::{AddTodo, ShowTodo, TodoError, TodoItem, TodoStore};
use jarvis::handlers::{self, external};
use jarvis::kernel::dispatcher::ActionHandler;
use jarvis::kernel::error::EngineError;
use jarvis::kernel::time::FixedClock;
use jarvis::{
    ArgumentBundle, DispatchOutcome, Engine, EngineConfig, HandlerError, HandlerRegistry,
    HandlerReport, Session,
};

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 7, 0).unwrap())
}

fn recording_announcer() -> (Announcer, Arc<Mutex<Vec<String>>>) {
    let heard = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&heard);
    let announcer: Announcer =
        Arc::new(move |text: &str| sink.lock().unwrap().push(text.to_string()));
    (announcer, heard)
}

fn builtin_session(dir: &tempfile::TempDir) -> Session {
    let config = EngineConfig {
        seed: Some(3),
        todo_path: dir.path().join("data").join("todo_list.json"),
        ..EngineConfig::default()
    };
    let (announcer, _) = recording_announcer();
    let mut registry = HandlerRegistry::new();
    handlers::register_builtin(&mut registry, &config, Arc::new(clock()), announcer).unwrap();
    external::register_console(&mut registry);
    Session::new(Engine::new(&config, registry).unwrap())
}

#[test]
fn test_clarification_answer_completes_the_command() {
    let mut registry = HandlerRegistry::new();
    registry.register("web_search", |args: &ArgumentBundle| -> Result<String, HandlerError> {
        Ok(format!("searching {}", args.get("query").unwrap_or_default()))
    });
    let mut session = Session::new(Engine::new(&EngineConfig::default(), registry).unwrap());

    let first = session.handle("search").unwrap();
    assert!(matches!(first, DispatchOutcome::Clarification { .. }));
    assert!(session.is_waiting_for_clarification());

    let second = session.handle("rust tutorials").unwrap();
    assert_eq!(second.reply(), "searching rust tutorials");
    assert!(!session.is_waiting_for_clarification());
    assert_eq!(session.history().entries(), ["search", "rust tutorials"]);
}

#[test]
fn test_blank_input_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = builtin_session(&dir);

    assert!(session.handle("").is_none());
    assert!(session.handle("   \t").is_none());
    assert!(session.history().is_empty());
}

#[test]
fn test_exit_ends_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = builtin_session(&dir);

    let outcome = session.handle("Goodbye").unwrap();
    assert_eq!(outcome.reply(), "Goodbye User. Have a nice day!");
    assert!(session.is_finished());

    // Nothing is interpreted after exit.
    assert!(session.handle("hello").is_none());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().last(), Some("Goodbye"));
}

#[test]
fn test_external_actions_report_their_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = builtin_session(&dir);

    let outcome = session.handle("search for cats").unwrap();
    assert_eq!(outcome.reply(), "Running web_search with {query=\"cats\"}.");

    let outcome = session.handle("take a screenshot").unwrap();
    assert_eq!(outcome.reply(), "Running screenshot.");
}

#[test]
fn test_todo_list_round_trip_through_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = builtin_session(&dir);

    assert_eq!(session.handle("show my list").unwrap().reply(), "Your todo list is empty.");
    assert_eq!(
        session.handle("add to my list buy milk").unwrap().reply(),
        "Added to your list: buy milk"
    );
    assert_eq!(
        session.handle("show my list").unwrap().reply(),
        "You have 1 items on your todo list: Item 1: buy milk."
    );

    let path = dir.path().join("data").join("todo_list.json");
    let saved: Vec<TodoItem> =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(
        saved,
        vec![TodoItem {
            item: "buy milk".into(),
            timestamp: "2024-03-05 14:07:00".into(),
            completed: false,
        }]
    );
}

#[test]
fn test_todo_all_completed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    std::fs::write(
        &path,
        r#"[{"item": "write report", "timestamp": "2024-03-01 09:00:00", "completed": true}]"#,
    )
    .unwrap();

    let store = TodoStore::open(path, Arc::new(clock())).unwrap();
    assert_eq!(store.items().len(), 1);
    let show = ShowTodo::new(Arc::new(Mutex::new(store)));
    assert_eq!(
        show.handle(&ArgumentBundle::new()).unwrap(),
        "You've completed all items on your todo list. Congratulations!"
    );
}

#[test]
fn test_todo_store_reopens_saved_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");

    let store = Arc::new(Mutex::new(TodoStore::open(path.clone(), Arc::new(clock())).unwrap()));
    let add = AddTodo::new(Arc::clone(&store));
    add.handle(&ArgumentBundle::new().with("item", "call mom")).unwrap();
    add.handle(&ArgumentBundle::new().with("item", "pay rent")).unwrap();

    let reopened = TodoStore::open(path, Arc::new(clock())).unwrap();
    let items: Vec<&str> = reopened.pending().map(|i| i.item.as_str()).collect();
    assert_eq!(items, ["call mom", "pay rent"]);

    let missing = add.handle(&ArgumentBundle::new()).unwrap_err();
    assert!(matches!(missing, HandlerError::MissingSlot { ref slot } if slot == "item"));
}

#[test]
fn test_corrupt_todo_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    std::fs::write(&path, "not json").unwrap();

    let err = TodoStore::open(path, Arc::new(clock())).err().unwrap();
    assert!(matches!(err, TodoError::Serialization(_)));
    assert!(matches!(EngineError::from(err), EngineError::Config(_)));
}

#[test]
fn test_timer_confirms_and_fires_on_a_thread() {
    let (announcer, heard) = recording_announcer();
    let handler = TimerHandler::new(announcer);

    let reply = handler
        .handle(&ArgumentBundle::new().with("minutes", "0").with("seconds", "1"))
        .unwrap();
    assert_eq!(reply, "Setting a timer for 1 second");
    assert!(heard.lock().unwrap().is_empty());

    std::thread::sleep(Duration::from_millis(1500));
    assert_eq!(heard.lock().unwrap().as_slice(), [TIMER_DONE]);
}

#[tokio::test]
async fn test_timer_fires_on_the_runtime() {
    let (announcer, heard) = recording_announcer();
    let handler = TimerHandler::new(announcer);

    handler
        .handle(&ArgumentBundle::new().with("minutes", "0").with("seconds", "1"))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(heard.lock().unwrap().as_slice(), [TIMER_DONE]);
}

#[test]
fn test_timer_rejects_zero_duration() {
    let (announcer, _) = recording_announcer();
    let handler = TimerHandler::new(announcer);
    let err = handler
        .handle(&ArgumentBundle::new().with("minutes", "0").with("seconds", "0"))
        .unwrap_err();
    assert!(matches!(err, HandlerError::Failed(_)));
}

#[test]
fn test_timer_phrasing() {
    assert_eq!(timer::describe(2, 30), "2 minutes and 30 seconds");
    assert_eq!(timer::describe(1, 0), "1 minute");
    assert_eq!(timer::describe(0, 45), "45 seconds");
    assert_eq!(timer::describe(1, 1), "1 minute and 1 second");
}

#[test]
fn test_timer_through_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = builtin_session(&dir);
    match session.handle("set a timer for 2 minutes and 30 seconds").unwrap() {
        DispatchOutcome::Dispatched { report, .. } => {
            let expected = "Setting a timer for 2 minutes and 30 seconds";
            assert_eq!(report, HandlerReport::Completed(expected.into()))
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_config_defaults_and_partial_json() {
    let config = EngineConfig::from_json_str(r#"{"user_name": "Tony", "seed": 9}"#).unwrap();
    assert_eq!(config.user_name, "Tony");
    assert_eq!(config.assistant_name, "Jarvis");
    assert_eq!(config.seed, Some(9));

    assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    assert!(matches!(EngineConfig::from_json_str("{"), Err(EngineError::Config(_))));
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jarvis.json");
    std::fs::write(&path, r#"{"assistant_name": "Friday"}"#).unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.assistant_name, "Friday");
    assert!(matches!(
        EngineConfig::load(&dir.path().join("missing.json")),
        Err(EngineError::Io(_))
    ));
}

#[test]
fn test_failed_save_keeps_the_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.json");
    let store = TodoStore::open(path.clone(), Arc::new(clock())).unwrap();
    // A directory where the file should go makes the write fail.
    std::fs::create_dir(&path).unwrap();

    let add = AddTodo::new(Arc::new(Mutex::new(store)));
    let err = add
        .handle(&ArgumentBundle::new().with("item", "buy milk"))
        .unwrap_err();
    assert!(matches!(err, HandlerError::Store(TodoError::Io(_))), "{:?}", err);
}

#[test]
fn test_only_one_follow_up_per_clarification() {
    let engine = Engine::new(&EngineConfig::default(), HandlerRegistry::new()).unwrap();
    let mut session = Session::new(engine);

    assert!(matches!(
        session.handle("factorial").unwrap(),
        DispatchOutcome::Clarification { .. }
    ));
    // "factorial five" still has no number: prompt again, but forget the command.
    assert!(matches!(
        session.handle("five").unwrap(),
        DispatchOutcome::Clarification { .. }
    ));
    assert!(!session.is_waiting_for_clarification());

    // The next input is interpreted on its own.
    assert!(matches!(
        session.handle("six").unwrap(),
        DispatchOutcome::Conversational(_)
    ));
    assert_eq!(session.history().entries(), ["factorial", "five", "six"]);
}
