//! Wire-level types for command processing

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Order affected by the command (set when an order was created or
    /// transitioned)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, order_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            order_id,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            order_id: None,
            error: Some(error),
        }
    }

    /// Redelivered command: acknowledged without re-executing.
    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            order_id: None,
            error: None,
        }
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

/// Command error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    OrderNotFound,
    TableNotFound,
    TableOccupied,
    WaitlistEntryNotFound,
    WaitlistEntryAttended,
    CustomerAlreadyAssigned,
    ItemNotFound,
    InvalidTransition,
    AlreadyInState,
    EmptyCart,
    ReasonRequired,
    InvalidAmount,
    RoleNotAllowed,
    InvalidOperation,
    StorageFailed,
    InternalError,
}

impl CommandErrorCode {
    /// Coarse classification per the error-handling design: conflicts are
    /// retriable after a refresh, validation errors are not, persistence
    /// errors left no partial write behind.
    pub fn kind(self) -> ErrorKind {
        match self {
            Self::TableOccupied
            | Self::WaitlistEntryAttended
            | Self::CustomerAlreadyAssigned
            | Self::AlreadyInState => ErrorKind::Conflict,
            Self::StorageFailed | Self::InternalError => ErrorKind::Persistence,
            _ => ErrorKind::Validation,
        }
    }
}
