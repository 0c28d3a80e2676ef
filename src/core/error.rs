use thiserror::Error;

use crate::core::types::{AgentId, GroupId, NodeId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Task is done and cannot be executed again")]
    TaskAlreadyDone,

    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    #[error("Node has been deleted: {0}")]
    NodeDeleted(NodeId),

    #[error("Group has been deleted: {0}")]
    GroupDeleted(GroupId),

    #[error("Agent {agent} is not registered with {group}")]
    NotRegistered { agent: AgentId, group: GroupId },

    #[error("Agent {agent} is already registered with {group}")]
    AlreadyRegistered { agent: AgentId, group: GroupId },

    #[error("Transport route is committed and cannot be altered")]
    RouteCommitted,

    #[error("No node was added to the route before the pick-up")]
    RouteHasNoNode,

    #[error("Transport route has no orders")]
    RouteEmpty,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
