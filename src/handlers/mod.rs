//! Built-in handlers for the actions that need nothing but computation or
//! local state. Everything that touches the outside world is bound by the
//! surrounding application.

pub mod calculator;
pub mod chance;
pub mod clock;
pub mod conversation;
pub mod external;
pub mod timer;
pub mod todo;

use std::sync::{Arc, Mutex};

use crate::config::EngineConfig;
use crate::kernel::dispatcher::{HandlerError, HandlerRegistry};
use crate::kernel::fallback::{RandomSampler, ReplySampler};
use crate::kernel::intent::ArgumentBundle;
use crate::kernel::time::Clock;

/// Shared by the handlers that pick at random.
pub type SharedSampler = Arc<Mutex<Box<dyn ReplySampler>>>;

pub fn shared_sampler(seed: Option<u64>) -> SharedSampler {
    let sampler: Box<dyn ReplySampler> = match seed {
        Some(seed) => Box::new(RandomSampler::seeded(seed)),
        None => Box::new(RandomSampler::from_entropy()),
    };
    Arc::new(Mutex::new(sampler))
}

/// Binds every built-in action into `registry`.
pub fn register_builtin(
    registry: &mut HandlerRegistry,
    config: &EngineConfig,
    clock: Arc<dyn Clock>,
    announcer: timer::Announcer,
) -> Result<(), crate::kernel::error::EngineError> {
    let sampler = shared_sampler(config.seed);

    registry.register("calculate", calculator::calculate);
    registry.register("factorial", calculator::factorial);
    registry.register("binary_convert", calculator::binary_convert);
    registry.register("trigonometry", calculator::trigonometry);
    registry.register("logarithm", calculator::logarithm);
    registry.register("square_root", calculator::square_root);
    registry.register("bit_shift", calculator::bit_shift);

    registry.register("tell_time", clock::tell_time(Arc::clone(&clock)));
    registry.register("tell_date", clock::tell_date(Arc::clone(&clock)));

    registry.register("greet", conversation::greet(&config.user_name));
    registry.register("exit", conversation::farewell(&config.user_name));
    registry.register("tell_joke", conversation::JokeTeller::new(Arc::clone(&sampler))?);

    registry.register("coin_toss", chance::coin_toss(Arc::clone(&sampler)));
    registry.register("roll_dice", chance::roll_dice(sampler));

    registry.register("set_timer", timer::TimerHandler::new(announcer));

    let store = todo::TodoStore::open(config.todo_path.clone(), clock)?;
    let store = Arc::new(Mutex::new(store));
    registry.register("add_todo", todo::AddTodo::new(Arc::clone(&store)));
    registry.register("show_todo", todo::ShowTodo::new(store));

    Ok(())
}

pub(crate) fn text_slot<'a>(args: &'a ArgumentBundle, slot: &str) -> Result<&'a str, HandlerError> {
    args.get(slot).ok_or_else(|| HandlerError::MissingSlot { slot: slot.to_string() })
}

pub(crate) fn int_slot(args: &ArgumentBundle, slot: &str) -> Result<i64, HandlerError> {
    let raw = text_slot(args, slot)?;
    raw.parse().map_err(|_| HandlerError::InvalidArgument {
        slot: slot.to_string(),
        value: raw.to_string(),
    })
}

pub(crate) fn float_slot(args: &ArgumentBundle, slot: &str) -> Result<f64, HandlerError> {
    let raw = text_slot(args, slot)?;
    raw.parse().map_err(|_| HandlerError::InvalidArgument {
        slot: slot.to_string(),
        value: raw.to_string(),
    })
}
