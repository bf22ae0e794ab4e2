//! Error types for registry operations
//!
//! Misuse of the registry (touching a component that was never added, using
//! a freed entity id, registering the same system twice) is reported as a
//! distinct variant instead of handing back stale or default data.

use thiserror::Error;

use super::Entity;
use crate::render::RenderError;

/// ECS registry errors
#[derive(Error, Debug)]
pub enum EcsError {
    /// More distinct component types than a signature has bits
    #[error("cannot register component {type_name}: limit of {max} component types reached")]
    ComponentCapacityExceeded {
        /// Type that did not fit
        type_name: &'static str,
        /// Signature width
        max: usize,
    },

    /// Component requested from an entity that does not have it
    #[error("{entity} has no component {component}")]
    ComponentMissing {
        /// Entity that was queried
        entity: Entity,
        /// Requested component type
        component: &'static str,
    },

    /// Entity id was never handed out by this registry
    #[error("{0} was not created by this registry")]
    UnknownEntity(Entity),

    /// Entity id has been killed and reconciled
    #[error("{0} has been destroyed")]
    DeadEntity(Entity),

    /// A system of this type is already registered
    #[error("system {0} is already registered")]
    SystemAlreadyRegistered(&'static str),

    /// No system of this type is registered
    #[error("system {0} is not registered")]
    SystemNotRegistered(&'static str),

    /// Drawing failed inside a system
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
