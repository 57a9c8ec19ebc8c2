//! Stateless helpers shared by functions built on the SDK.
//!
//! None of these touch the network or the [`Config`](crate::Config).

mod hash;
mod maps;
mod numbers;
mod random;
mod strings;
mod time;

pub use hash::{hash_sha256, verify_sha256};
pub use maps::{copy_map, project_query};
pub use numbers::{round, sort_descending, spacef, spacef_with_digits};
pub use random::{Charset, generate_random_string};
pub use strings::{contains, contains_like, remove_duplicate_strings};
pub use time::{time_after_or_equal, time_before_or_equal};
