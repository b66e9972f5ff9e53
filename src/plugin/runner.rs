//! Plugin Runner
//!
//! Drives a plugin through its lifecycle on behalf of the host.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PluginError, PluginResult};
use crate::host::{HostLog, HostVariables, LogColor};
use crate::plugin::{PluginSession, VoiceAttackPlugin};

/// Where a runner is in the plugin lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, `initialise` not yet called
    Loaded,
    /// `initialise` succeeded, commands may be invoked
    Ready,
}

/// Owns one plugin and its session, and calls the hooks in order.
///
/// A failing hook is reported to the host log in red and returned.
#[derive(Debug)]
pub struct PluginRunner<P, H> {
    plugin: P,
    session: PluginSession<H>,
    state: LifecycleState,
}

impl<P, H> PluginRunner<P, H>
where
    P: VoiceAttackPlugin<H>,
    H: HostVariables + HostLog,
{
    pub fn new(plugin: P, host: H, config: Config) -> Self {
        Self {
            plugin,
            session: PluginSession::new(host, config),
            state: LifecycleState::Loaded,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn session(&self) -> &PluginSession<H> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PluginSession<H> {
        &mut self.session
    }

    // == Initialise ==
    /// Runs `on_initialise`. Calling it again after success is a no-op.
    pub fn initialise(&mut self) -> PluginResult<()> {
        if self.state == LifecycleState::Ready {
            debug!("Plugin already initialised");
            return Ok(());
        }

        info!("Initialising plugin '{}'", self.session.config().display_name);
        self.run_hook("initialise", |plugin, session| plugin.on_initialise(session))?;
        self.state = LifecycleState::Ready;
        Ok(())
    }

    // == Invoke ==
    /// Runs `on_invoke` with `context`, exposing it through the session meanwhile.
    ///
    /// # Errors
    /// Fails without calling the plugin if `initialise` has not succeeded.
    pub fn invoke(&mut self, context: &str) -> PluginResult<()> {
        if self.state != LifecycleState::Ready {
            return Err(PluginError::Host(format!(
                "Command '{}' invoked before the plugin was initialised",
                context
            )));
        }

        debug!("Invoking plugin with context '{}'", context);
        self.session.set_context(Some(context.to_string()));
        let result = self.run_hook("invoke", |plugin, session| {
            plugin.on_invoke(session, context)
        });
        self.session.set_context(None);
        result
    }

    // == Command Stopped ==
    pub fn command_stopped(&mut self) -> PluginResult<()> {
        debug!("Commands stopped");
        self.run_hook("command stopped", |plugin, session| {
            plugin.on_command_stopped(session)
        })
    }

    // == Exit ==
    /// Runs `on_exit` and ends the session, handing the host back.
    pub fn exit(mut self) -> (H, PluginResult<()>) {
        info!("Plugin '{}' exiting", self.session.config().display_name);
        let result = self.run_hook("exit", |plugin, session| plugin.on_exit(session));
        (self.session.into_host(), result)
    }

    fn run_hook(
        &mut self,
        stage: &str,
        hook: impl FnOnce(&mut P, &mut PluginSession<H>) -> PluginResult<()>,
    ) -> PluginResult<()> {
        let result = hook(&mut self.plugin, &mut self.session);
        if let Err(err) = &result {
            warn!("Plugin {} hook failed: {}", stage, err);
            let message = format!("{} failed", stage);
            self.session.log(LogColor::Red, &message, Some(err));
        }
        result
    }
}
