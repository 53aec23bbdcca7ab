//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a recipe, user, tag or ingredient is missing.
//! - [`ExistingKey`] thrown when a unique pair is inserted twice.
//! - [`NotInRelation`] thrown when removing a favorite, shopping-list entry
//!   or subscription that was never added.
//! - [`Export`] thrown when the shopping list document cannot be produced.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`NotInRelation`]: EngineError::NotInRelation
//!  [`Export`]: EngineError::Export
use std::path::PathBuf;

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error("{0}")]
    ExistingKey(String),
    #[error("{0}")]
    NotInRelation(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::NotInRelation(a), Self::NotInRelation(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

/// Failures while producing the shopping list document.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),
    #[error("failed to read font file {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render document: {0}")]
    Pdf(String),
}
