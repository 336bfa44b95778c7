//! The load session: selection, asynchronous read, injection, start.
//!
//! The host glue drives a [`Loader`] in three steps. `begin_load` runs
//! synchronously inside the selection event and mints a [`LoadTicket`];
//! after the read resolves, the glue presents the ticket back through
//! `finish_load` or `fail_load`. A ticket whose selection has been
//! superseded in the meantime is discarded without side effects, so at
//! most one in-flight load can win.

use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::sink::{AssetSink, EntryPoint, StatusSink};
use serde::Serialize;

/// Single-use token tying a read completion to the selection that
/// started it.
///
/// Tickets are deliberately not `Clone`: a completion consumes its
/// ticket, so the same read cannot be applied twice.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Outcome of presenting a completed read to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadOutcome {
    /// The buffer was injected and the entry point handled
    Completed {
        /// Whether the module's entry point was invoked
        entry_point: EntryPoint,
    },
    /// A newer selection superseded this read; nothing was written
    Stale,
}

/// Bridges a file-selection event to the external module's startup
/// sequence.
///
/// `M` is the external module seam, `S` the status display seam; both are
/// injected so tests can substitute fakes.
#[derive(Debug)]
pub struct Loader<M, S> {
    module: M,
    status: S,
    config: LoaderConfig,
    generation: u64,
}

impl<M: AssetSink, S: StatusSink> Loader<M, S> {
    /// Create a loader over the given sinks.
    ///
    /// # Errors
    /// Returns [`LoaderError::Configuration`] if the configuration fails
    /// validation.
    pub fn new(module: M, status: S, config: LoaderConfig) -> LoaderResult<Self> {
        config.validate()?;
        Ok(Self {
            module,
            status,
            config,
            generation: 0,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Observe a selection event.
    ///
    /// With zero files selected this is a no-op and returns `None`: no
    /// status update, no write, no entry-point invocation. Otherwise the
    /// status display is set to the loading message, any in-flight read is
    /// superseded, and the returned ticket authorizes the completion of
    /// this selection's read.
    pub fn begin_load(&mut self, selected: usize) -> Option<LoadTicket> {
        if selected == 0 {
            return None;
        }
        self.generation += 1;
        tracing::debug!(generation = self.generation, "asset selection observed");
        self.status.set_status(&self.config.loading_message);
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Present a completed read.
    ///
    /// A stale ticket is discarded with `Ok(LoadOutcome::Stale)`. For the
    /// current ticket the buffer is written under the configured path with
    /// create and overwrite both enabled, then the entry point is invoked
    /// if the module exposes one. An empty buffer is written like any
    /// other; an empty file is not an empty selection.
    ///
    /// # Errors
    /// Propagates [`LoaderError::Inject`] or [`LoaderError::EntryPoint`]
    /// from the module seam after routing the failure message to the
    /// status display.
    pub fn finish_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> LoaderResult<LoadOutcome> {
        if ticket.generation != self.generation {
            tracing::warn!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded read"
            );
            return Ok(LoadOutcome::Stale);
        }
        if let Err(err) = self.module.write_asset(
            &self.config.mount_dir,
            &self.config.asset_name,
            bytes,
            true,
            true,
        ) {
            self.surface_failure(&err);
            return Err(err);
        }
        tracing::info!(
            len = bytes.len(),
            dir = %self.config.mount_dir,
            name = %self.config.asset_name,
            "asset injected"
        );
        match self.module.invoke_entry_point() {
            Ok(entry_point) => Ok(LoadOutcome::Completed { entry_point }),
            Err(err) => {
                self.surface_failure(&err);
                Err(err)
            }
        }
    }

    /// Present a failed read.
    ///
    /// Routes the failure message to the status display and returns `true`
    /// if the ticket was current; a stale failure is discarded silently
    /// and returns `false`.
    pub fn fail_load(&mut self, ticket: LoadTicket, error: &LoaderError) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded read failure"
            );
            return false;
        }
        self.surface_failure(error);
        true
    }

    fn surface_failure(&mut self, error: &LoaderError) {
        tracing::error!(%error, "asset load failed");
        self.status.set_status(&self.config.failure_message);
    }
}
