//! Actions with real-world side effects (browser, mail, camera...). The
//! console binary binds them to [`ConsoleAction`], which only reports what
//! would have happened.

use tracing::info;

use crate::kernel::dispatcher::{ActionHandler, HandlerError, HandlerRegistry};
use crate::kernel::intent::{ActionId, ArgumentBundle};

pub const EXTERNAL_ACTIONS: &[&str] = &[
    "web_search",
    "wikipedia",
    "play_youtube",
    "show_images",
    "directions",
    "open_maps",
    "send_email",
    "send_whatsapp",
    "create_file",
    "create_html_project",
    "system_info",
    "battery",
    "take_photo",
    "screenshot",
    "adjust_volume",
    "play_game",
    "weather",
    "news",
];

pub struct ConsoleAction {
    action: ActionId,
}

impl ConsoleAction {
    pub fn new(action: impl Into<ActionId>) -> Self {
        Self { action: action.into() }
    }
}

impl ActionHandler for ConsoleAction {
    fn handle(&self, args: &ArgumentBundle) -> Result<String, HandlerError> {
        info!(action = %self.action, slots = args.len(), "external action requested");
        if args.is_empty() {
            Ok(format!("Running {}.", self.action))
        } else {
            Ok(format!("Running {} with {}.", self.action, args))
        }
    }
}

/// Binds a [`ConsoleAction`] to every external action not already bound.
pub fn register_console(registry: &mut HandlerRegistry) {
    for action in EXTERNAL_ACTIONS {
        let id = ActionId::from(*action);
        if !registry.contains(&id) {
            registry.register(id.clone(), ConsoleAction::new(id));
        }
    }
}
