mod client;
mod error;
mod payload;

pub use client::HttpDictionary;
pub use error::GatewayError;
pub use payload::{LookupPayload, SuggestPayload};
