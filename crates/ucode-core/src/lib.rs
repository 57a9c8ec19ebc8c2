//! Application-facing layer over `ucode-api`.
//!
//! - **[`ObjectFunction`]**: binds a [`Config`] to the object service and
//!   returns every operation as `Result<Outcome<T>, Failure>`, where both
//!   sides carry the uniform [`Response`] status record.
//! - **[`Dispatcher`]**: Telegram fan-out (query-string, structured and
//!   document sends) and FCM push, failing fast on the first recipient
//!   error.
//! - **[`FunctionLogger`]**: tracing-backed logger whose lines the
//!   dispatcher forwards without re-tagging.
//! - **[`util`]**: stateless helpers (dedup, random strings, hashing,
//!   number formatting).

pub mod config;
pub mod error;
pub mod function;
pub mod logger;
pub mod notify;
pub mod response;
pub mod util;

pub use config::Config;
pub use error::CoreError;
pub use function::{ObjectFunction, Operation};
pub use logger::{FunctionLogger, LOG_MARKERS};
pub use notify::Dispatcher;
pub use response::{Failure, Outcome, Response, Status};

// Request-side types callers need to build arguments.
pub use ucode_api::{Argument, Notification, Object, ObjectExt, Platform};
