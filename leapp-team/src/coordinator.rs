use crate::config::TeamConfig;
use crate::error::{TeamError, TeamResult};
use crate::services::TeamDependencies;
use crate::state::{SwitchGuard, TeamState};
use tokio::sync::{Mutex, MutexGuard};

/// Drives sign-in, workspace switching, and secret reconciliation for one
/// device.
///
/// Operations are split across the crate's modules as `impl` blocks; this
/// type only holds what they share.
pub struct TeamCoordinator {
    pub(crate) config: TeamConfig,
    pub(crate) deps: TeamDependencies,
    pub(crate) state: TeamState,
    /// Held for the duration of a workspace transition.
    pub(crate) transition: Mutex<()>,
}

impl TeamCoordinator {
    pub fn new(config: TeamConfig, deps: TeamDependencies) -> Self {
        Self {
            config,
            deps,
            state: TeamState::new(),
            transition: Mutex::new(()),
        }
    }

    pub fn state(&self) -> &TeamState {
        &self.state
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    /// Claims the transition lock and raises the switching flag. Must be
    /// taken before the store is re-pointed or the workspace pointer is
    /// written; a transition already running yields
    /// [`TeamError::TransitionInProgress`].
    pub(crate) fn begin_transition(&self) -> TeamResult<Transition<'_>> {
        let lock = self
            .transition
            .try_lock()
            .map_err(|_| TeamError::TransitionInProgress)?;
        Ok(Transition {
            _switching: self.state.begin_switch(),
            _lock: lock,
        })
    }
}

/// Proof that the caller owns the current workspace transition.
pub(crate) struct Transition<'a> {
    _switching: SwitchGuard<'a>,
    _lock: MutexGuard<'a, ()>,
}
