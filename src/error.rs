use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("no todo with id {0}")]
    NotFound(i32),

    #[error("todo ids exhausted")]
    IdsExhausted,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token creation failed: {0}")]
    TokenCreation(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    // Machine readable code exposed under `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::IdsExhausted => "IDS_EXHAUSTED",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::TokenCreation(_) => "TOKEN_CREATION",
            AppError::Config(_) => "CONFIG",
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}
