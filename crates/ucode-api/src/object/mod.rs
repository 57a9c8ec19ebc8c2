pub mod client;
mod listing;
mod records;
mod relations;

pub use client::ObjectClient;
