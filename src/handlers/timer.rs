use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::int_slot;
use crate::kernel::dispatcher::{ActionHandler, HandlerError};
use crate::kernel::intent::ArgumentBundle;

/// Where the timer speaks when it fires. Called from a background task.
pub type Announcer = Arc<dyn Fn(&str) + Send + Sync>;

pub const TIMER_DONE: &str = "Timer is up!";

/// Confirms immediately and counts down in the background. The countdown
/// is owned by the runtime (or a detached thread); nothing waits for it.
pub struct TimerHandler {
    announcer: Announcer,
}

impl TimerHandler {
    pub fn new(announcer: Announcer) -> Self {
        Self { announcer }
    }

    fn start(&self, total: Duration) {
        let announcer = Arc::clone(&self.announcer);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!(secs = total.as_secs(), "timer scheduled on runtime");
                handle.spawn(async move {
                    tokio::time::sleep(total).await;
                    info!("timer fired");
                    announcer(TIMER_DONE);
                });
            }
            Err(_) => {
                debug!(secs = total.as_secs(), "timer scheduled on thread");
                std::thread::spawn(move || {
                    std::thread::sleep(total);
                    info!("timer fired");
                    announcer(TIMER_DONE);
                });
            }
        }
    }
}

impl ActionHandler for TimerHandler {
    fn handle(&self, args: &ArgumentBundle) -> Result<String, HandlerError> {
        let minutes = u64::try_from(int_slot(args, "minutes")?).unwrap_or(0);
        let seconds = u64::try_from(int_slot(args, "seconds")?).unwrap_or(0);
        let total = minutes.saturating_mul(60).saturating_add(seconds);
        if total == 0 {
            return Err(HandlerError::Failed(
                "I couldn't understand the time. Please try again.".to_string(),
            ));
        }

        self.start(Duration::from_secs(total));
        Ok(format!("Setting a timer for {}", describe(minutes, seconds)))
    }
}

/// "2 minutes and 30 seconds", "1 minute", "45 seconds".
pub fn describe(minutes: u64, seconds: u64) -> String {
    let unit = |n: u64, word: &str| format!("{} {}{}", n, word, if n == 1 { "" } else { "s" });
    match (minutes, seconds) {
        (0, s) => unit(s, "second"),
        (m, 0) => unit(m, "minute"),
        (m, s) => format!("{} and {}", unit(m, "minute"), unit(s, "second")),
    }
}
