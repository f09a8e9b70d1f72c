mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_URL, GrackdbClient, ProviderConfig};
pub use error::ApiError;
pub use types::{Connection, DiscordAccount, DiscordBot, Edge, User};

pub(crate) use types::decode_data;
