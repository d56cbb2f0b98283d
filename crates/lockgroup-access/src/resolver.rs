//! Lock-group resolver for status queries and close requests
//!
//! Looks up the lock group behind a GUI identifier without touching
//! credentials. Both operations are read-only and idempotent.

use crate::invocation::GroupRequest;
use crate::peripherals::{CloseDirective, LockActuator};
use lockgroup_core::{GroupId, GuiId};
use lockgroup_registry::RegistryLoader;
use serde::{Deserialize, Serialize};

/// Whether a GUI identifier belongs to a registered terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupStatus {
    /// Registered terminal
    Known,
    /// Unregistered, or the request was malformed
    Unknown,
}

impl GroupStatus {
    /// Process exit code: 1 when known, 0 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            GroupStatus::Known => 1,
            GroupStatus::Unknown => 0,
        }
    }
}

/// Resolves GUI identifiers to lock groups
#[derive(Debug, Clone)]
pub struct LockGroupResolver<L> {
    loader: L,
}

impl<L: RegistryLoader> LockGroupResolver<L> {
    /// Create a resolver over `loader`
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Lock group governing `gui_id`
    pub fn resolve_group(&self, gui_id: GuiId) -> Option<GroupId> {
        self.loader.terminal_registry().resolve_group(gui_id)
    }

    /// Known/unknown for `gui_id`
    pub fn status(&self, gui_id: GuiId) -> GroupStatus {
        let status = match self.resolve_group(gui_id) {
            Some(_) => GroupStatus::Known,
            None => GroupStatus::Unknown,
        };
        tracing::debug!(%gui_id, ?status, "Status query resolved");
        status
    }

    /// Status for positional `<guiId>` arguments
    pub fn status_args(&self, args: &[String]) -> GroupStatus {
        match GroupRequest::from_args(args) {
            Ok(request) => self.status(request.gui_id),
            Err(reason) => {
                tracing::warn!(%reason, "Incorrect status request format");
                GroupStatus::Unknown
            }
        }
    }

    /// Resolve the group behind `gui_id` and hand its close directive to `actuator`
    ///
    /// Returns the directive when the group was resolvable, whether or not the
    /// actuator accepted it; actuator failures are logged.
    pub fn close<A: LockActuator + ?Sized>(
        &self,
        gui_id: GuiId,
        actuator: &A,
    ) -> Option<CloseDirective> {
        let Some(group) = self.resolve_group(gui_id) else {
            tracing::debug!(%gui_id, "Close request for unknown GUI identifier ignored");
            return None;
        };

        let directive = CloseDirective { group };
        match actuator.close(&directive) {
            Ok(()) => tracing::info!(%gui_id, %group, "Close directive issued"),
            Err(error) => tracing::error!(%gui_id, %group, %error, "Lock actuator failed"),
        }
        Some(directive)
    }

    /// Close request for positional `<guiId>` arguments
    pub fn close_args<A: LockActuator + ?Sized>(
        &self,
        args: &[String],
        actuator: &A,
    ) -> Option<CloseDirective> {
        match GroupRequest::from_args(args) {
            Ok(request) => self.close(request.gui_id, actuator),
            Err(reason) => {
                tracing::warn!(%reason, "Incorrect close request format");
                None
            }
        }
    }
}
