use async_graphql::{InputObject, SimpleObject};

use crate::error::AppError;

// Data model representing a Todo item
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Todo {
    pub id: i32,
    pub text: String,
}

// Input for replacing the text of an existing Todo
#[derive(Debug, Clone, InputObject)]
pub struct TodoInput {
    pub id: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

/// Identity resolved from the `Authorization` header of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    User(CurrentUser),
    /// A bearer token was sent but failed verification.
    Invalid(AppError),
}

impl Session {
    pub fn username(&self) -> Option<&str> {
        match self {
            Session::User(user) if !user.username.is_empty() => Some(&user.username),
            _ => None,
        }
    }
}

// Payload signed into session tokens
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub username: String,
}
