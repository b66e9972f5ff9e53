//! VoiceAttack Proxy - diagnostics harness
//!
//! Runs a small plugin against an in-memory host and prints what the
//! variable store recorded.
//!
//! Each command-line argument is one command context:
//! - `TAG:name=value` sets `name` from text as the kind `TAG` (e.g. `INT:score=42`)
//! - `clear:prefix` forgets tracked variables whose name starts with `prefix`

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voiceattack_proxy::error::PluginResult;
use voiceattack_proxy::{
    Config, InMemoryHost, LogColor, PluginError, PluginRunner, PluginSession, VariableKind,
    VoiceAttackPlugin,
};

/// Contexts used when none are given on the command line.
const DEFAULT_CONTEXTS: [&str; 5] = [
    "INT:score=42",
    "INT:score=9999999999",
    "TXT:pilot=\"Maverick\"",
    "DATE:launch=2026-10-16T08:30:00",
    "clear:pil",
];

/// Applies text commands to the session's variables.
#[derive(Debug, Default)]
struct CommandPlugin {
    handled: usize,
}

impl VoiceAttackPlugin<InMemoryHost> for CommandPlugin {
    fn on_initialise(&mut self, session: &mut PluginSession<InMemoryHost>) -> PluginResult<()> {
        let name = session.config().display_name.clone();
        session.log(LogColor::Blue, &format!("{} ready", name), None);
        session.variables_mut().set("proxy.started", chrono::Utc::now())?;
        Ok(())
    }

    fn on_invoke(
        &mut self,
        session: &mut PluginSession<InMemoryHost>,
        context: &str,
    ) -> PluginResult<()> {
        if let Some(prefix) = context.strip_prefix("clear:") {
            let removed = session.variables_mut().clear_starting_with(prefix);
            session.log(
                LogColor::Gray,
                &format!("Forgot {} variables starting with '{}'", removed, prefix),
                None,
            );
        } else {
            let (tag, assignment) = context
                .split_once(':')
                .ok_or_else(|| PluginError::Command(format!("Unrecognised context '{}'", context)))?;
            let kind = VariableKind::from_tag(tag)
                .ok_or_else(|| PluginError::Command(format!("Unknown variable kind '{}'", tag)))?;
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| PluginError::Command(format!("Missing '=' in '{}'", context)))?;
            session.variables_mut().set_text_as(name, kind, value)?;
        }

        self.handled += 1;
        Ok(())
    }

    fn on_exit(&mut self, session: &mut PluginSession<InMemoryHost>) -> PluginResult<()> {
        session.log(
            LogColor::Blue,
            &format!("Handled {} commands", self.handled),
            None,
        );
        Ok(())
    }
}

/// Invokes every context in order and returns how many failed.
///
/// Failures are already reported to the host log; keep going like the host would.
fn invoke_all(runner: &mut PluginRunner<CommandPlugin, InMemoryHost>, contexts: &[&str]) -> usize {
    contexts
        .iter()
        .filter(|context| runner.invoke(context).is_err())
        .count()
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Defaults to the configured filter, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {}", config.display_name);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let contexts: Vec<&str> = if args.is_empty() {
        DEFAULT_CONTEXTS.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let mut runner = PluginRunner::new(CommandPlugin::default(), InMemoryHost::new(), config);
    runner.initialise().context("plugin failed to initialise")?;

    let total = contexts.len();
    let failed = invoke_all(&mut runner, &contexts);
    runner.command_stopped()?;

    let snapshot = runner.session().variables().snapshot();
    let (host, result) = runner.exit();
    result.context("plugin failed to exit")?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    for (color, line) in host.log_lines() {
        println!("[{}] {}", color, line);
    }

    if failed > 0 {
        warn!(failed, total, "Some commands failed");
        anyhow::bail!("{} of {} commands failed", failed, total);
    }

    info!("Session complete");
    Ok(())
}
