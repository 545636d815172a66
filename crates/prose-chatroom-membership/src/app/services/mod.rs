// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use chat_rooms_service::ChatRoomsService;
pub use connection_service::ConnectionService;
pub use initial_reconciliation_handler::InitialReconciliationHandler;

mod chat_rooms_service;
mod connection_service;
mod initial_reconciliation_handler;
