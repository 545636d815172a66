// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connection_error::ConnectionError;
pub use connection_properties::ConnectionProperties;

mod connection_error;
mod connection_properties;
