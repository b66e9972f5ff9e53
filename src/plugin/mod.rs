//! Plugin Module
//!
//! Lifecycle glue between the host and a user plugin.
//!
//! The host drives four hooks: initialise, invoke (once per command, with a
//! context string), command stopped, and exit. Each hook receives the
//! [`PluginSession`] that owns the variable store for the session, so no
//! global plugin instance is needed.

mod runner;
mod session;

pub use runner::{LifecycleState, PluginRunner};
pub use session::PluginSession;

use crate::error::PluginResult;
use crate::host::{HostLog, HostVariables};

// == Plugin Trait ==
/// Behaviour supplied by a concrete plugin.
pub trait VoiceAttackPlugin<H: HostVariables + HostLog> {
    /// Called once when the host loads the plugin.
    fn on_initialise(&mut self, session: &mut PluginSession<H>) -> PluginResult<()>;

    /// Called for every command that targets the plugin.
    fn on_invoke(&mut self, session: &mut PluginSession<H>, context: &str) -> PluginResult<()>;

    /// Called when the user stops all running commands.
    fn on_command_stopped(&mut self, _session: &mut PluginSession<H>) -> PluginResult<()> {
        Ok(())
    }

    /// Called once before the host unloads the plugin.
    fn on_exit(&mut self, _session: &mut PluginSession<H>) -> PluginResult<()> {
        Ok(())
    }
}
