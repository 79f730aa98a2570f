// Unit tests for error mapping - pure domain logic without any driver attached
use crate::ai::AiError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, InvalidStateKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds() {
    let cases = [
        (ValidationKind::IllegalMove, ErrorCode::IllegalMove),
        (ValidationKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ValidationKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (ValidationKind::UnknownMoveType, ErrorCode::UnknownMoveType),
        (
            ValidationKind::Other("VALIDATION_ERROR".into()),
            ErrorCode::ValidationError,
        ),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad move").into();
        assert_eq!(app.code(), code);
        assert!(matches!(app, AppError::Validation { .. }));
    }
}

#[test]
fn maps_lifecycle_errors() {
    let app: AppError =
        DomainError::invalid_state(InvalidStateKind::AlreadyStarted, "already playing").into();
    assert_eq!(app.code().as_str(), "GAME_ALREADY_STARTED");

    let app: AppError =
        DomainError::invalid_state(InvalidStateKind::PlayerLimitReached, "table full").into();
    assert_eq!(app.code().as_str(), "PLAYER_LIMIT_REACHED");

    // Test generic fallback
    let app: AppError =
        DomainError::invalid_state(InvalidStateKind::Other("x".into()), "odd").into();
    assert_eq!(app.code(), ErrorCode::InvalidState);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "game missing").into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);

    let app: AppError = DomainError::not_found(NotFoundKind::Player, "no seat").into();
    assert_eq!(app.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn maps_conflicts() {
    let app: AppError =
        DomainError::conflict(ConflictKind::VersionMismatch, "expected 3, found 4").into();
    assert_eq!(app.code().as_str(), "VERSION_MISMATCH");
    assert!(matches!(app, AppError::Conflict { .. }));

    // Test generic conflict fallback
    let app: AppError = DomainError::conflict(ConflictKind::Other("x".into()), "busy").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn maps_infra_errors() {
    let app: AppError = DomainError::infra(InfraErrorKind::Serialization, "bad blob").into();
    assert_eq!(app.code(), ErrorCode::SerializationError);

    let app: AppError = DomainError::infra(InfraErrorKind::Store, "unreachable").into();
    assert!(matches!(app, AppError::Store { .. }));
    assert_eq!(app.code(), ErrorCode::StoreError);
}

#[test]
fn maps_bot_errors() {
    let app: AppError = AiError::MissingBotUserId.into();
    assert_eq!(app.code(), ErrorCode::BotMisconfigured);
    assert_eq!(app.detail(), "bot user id is missing");

    let app: AppError = AiError::NoLegalMove("seat 1".into()).into();
    assert_eq!(app.code(), ErrorCode::BotFailed);
}

#[test]
fn serde_failures_are_serialization_errors() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code(), ErrorCode::SerializationError);
}
