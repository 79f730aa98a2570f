use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, InvalidStateKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Invalid state: {detail}")]
    InvalidState { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Bot error: {detail}")]
    Bot { code: ErrorCode, detail: String },
    #[error("Store error: {detail}")]
    Store { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::InvalidState { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Bot { code, .. } => *code,
            AppError::Store { .. } => ErrorCode::StoreError,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Helper method to extract error detail from any error variant
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::InvalidState { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Bot { detail, .. } => detail.clone(),
            AppError::Store { detail } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }

    pub fn store(detail: impl Into<String>) -> Self {
        Self::Store {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::IllegalMove => ErrorCode::IllegalMove,
                    ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                    ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                    ValidationKind::UnknownMoveType => ErrorCode::UnknownMoveType,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::InvalidState(kind, detail) => {
                let code = match kind {
                    InvalidStateKind::AlreadyStarted => ErrorCode::GameAlreadyStarted,
                    InvalidStateKind::PlayerLimitReached => ErrorCode::PlayerLimitReached,
                    InvalidStateKind::PlayerCountOutOfRange => ErrorCode::PlayerCountOutOfRange,
                    InvalidStateKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
                    InvalidStateKind::NotPlaying => ErrorCode::GameNotPlaying,
                    InvalidStateKind::CorruptSnapshot => ErrorCode::CorruptSnapshot,
                    InvalidStateKind::Other(_) => ErrorCode::InvalidState,
                };
                AppError::InvalidState { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::VersionMismatch => ErrorCode::VersionMismatch,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Serialization => AppError::Internal {
                    code: ErrorCode::SerializationError,
                    detail,
                },
                InfraErrorKind::Store => AppError::Store { detail },
                InfraErrorKind::Other(_) => AppError::internal(detail),
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal {
            code: ErrorCode::SerializationError,
            detail: format!("blob (de)serialization failed: {e}"),
        }
    }
}
