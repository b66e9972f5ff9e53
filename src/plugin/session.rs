//! Plugin Session
//!
//! Per-session state handed to every lifecycle hook.

use std::error::Error;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::host::{HostLog, HostVariables, LogColor};
use crate::variables::VariableStore;

/// Owns the variable store and host handle for one plugin session.
#[derive(Debug)]
pub struct PluginSession<H> {
    variables: VariableStore<H>,
    config: Config,
    /// Context string of the command being invoked, if any
    context: Option<String>,
}

impl<H: HostVariables + HostLog> PluginSession<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self {
            variables: VariableStore::new(host),
            config,
            context: None,
        }
    }

    pub fn variables(&self) -> &VariableStore<H> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableStore<H> {
        &mut self.variables
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Context of the command currently being invoked.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub(crate) fn set_context(&mut self, context: Option<String>) {
        self.context = context;
    }

    // == Log ==
    /// Writes `message` to the host log in `color`, followed by `err` if given.
    ///
    /// The message is always traced; the host log is skipped when
    /// `echo_to_host_log` is off.
    pub fn log(&mut self, color: LogColor, message: &str, err: Option<&dyn Error>) {
        match color {
            LogColor::Red => error!(color = %color, "{}", message),
            LogColor::Yellow | LogColor::Orange => warn!(color = %color, "{}", message),
            _ => info!(color = %color, "{}", message),
        }
        if let Some(err) = err {
            error!("{}", err);
        }

        if !self.config.echo_to_host_log {
            return;
        }
        let host = self.variables.host_mut();
        host.write(message, color);
        if let Some(err) = err {
            host.write(&err.to_string(), color);
        }
    }

    pub fn into_host(self) -> H {
        self.variables.into_host()
    }
}
