use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use jarvis::handlers::{self, external, timer::Announcer};
use jarvis::kernel::time::SystemClock;
use jarvis::{Engine, EngineConfig, HandlerRegistry, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var_os("JARVIS_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            EngineConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    tracing::info!(assistant = %config.assistant_name, "booting");

    let announcer: Announcer = Arc::new(|text: &str| println!("{}", text));
    let mut registry = HandlerRegistry::new();
    handlers::register_builtin(&mut registry, &config, Arc::new(SystemClock), announcer)
        .context("registering built-in handlers")?;
    external::register_console(&mut registry);

    let engine = Engine::new(&config, registry).context("building the engine")?;
    let mut session = Session::new(engine);

    println!("{}: Hello {}. How can I help you?", config.assistant_name, config.user_name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(outcome) = session.handle(&line) else {
            continue;
        };
        println!("{}: {}", config.assistant_name, outcome.reply());
        if session.is_finished() {
            break;
        }
    }

    let stats = session.engine().telemetry.snapshot();
    tracing::info!(
        matched = stats.dispatch_stats.matched,
        conversational = stats.dispatch_stats.conversational,
        "session closed"
    );
    Ok(())
}
