//! Async HTTP clients for the ucode object service and its notification
//! channels.
//!
//! - **[`ObjectClient`]**: CRUD, listing, aggregation and bulk upsert over
//!   the schema-less object service, addressed by table slug. Requests go
//!   through the [`Transport`] primitive, which adds the identity headers and
//!   treats any status above 300 as a failure.
//! - **[`BotClient`]**: the Telegram Bot API calls used for chat
//!   notifications (`sendMessage`, `sendDocument`, `getMe`).
//! - **[`PushClient`]**: FCM HTTP v1 messages authenticated with a
//!   service-account key ([`ServiceAccount`]).
//!
//! Typed envelopes live in [`model`]; open JSON payload helpers and the
//! pagination rewrite live in [`payload`].

pub mod auth;
pub mod error;
pub mod model;
pub mod object;
pub mod payload;
pub mod push;
pub mod telegram;
pub mod transport;

pub use auth::{AccessToken, ServiceAccount};
pub use error::{Error, ErrorKind};
pub use model::{
    AggregationResponse, Argument, CreateObjectResponse, MultipleUpdateResponse,
    MultipleUpsertResponse, ObjectListResponse, Request, SingleObjectResponse,
    UpdateObjectResponse, UpsertData, UpsertRequest,
};
pub use object::ObjectClient;
pub use payload::{Object, ObjectExt, Pagination};
pub use push::{Notification, Platform, PushClient, PushMessage};
pub use telegram::{BotClient, BotUser, Message};
pub use transport::{Transport, TransportConfig};
