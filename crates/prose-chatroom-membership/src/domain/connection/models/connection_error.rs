// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("Connection timed out")]
    TimedOut,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{msg}")]
    Generic { msg: String },
}

impl From<anyhow::Error> for ConnectionError {
    fn from(value: anyhow::Error) -> Self {
        ConnectionError::Generic {
            msg: value.to_string(),
        }
    }
}
