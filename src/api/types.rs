use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// A GrackDB user as returned by the remote schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A Discord account tracked by GrackDB. `owner` and `bot` are
/// back-references resolved server-side; either may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordAccount {
    pub id: String,
    pub discord_id: String,
    pub username: String,
    pub discriminator: String,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub bot: Option<DiscordBot>,
}

/// A Discord bot. Only ever referenced by this client, never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordBot {
    pub id: String,
    #[serde(default)]
    pub account: Option<Box<DiscordAccount>>,
}

/// Relay-style connection wrapper used by filtered read queries.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// The first node of the connection, consuming the rest.
    pub fn into_first(self) -> Option<T> {
        self.edges.into_iter().next().map(|edge| edge.node)
    }
}

/// Decodes the value under `key` of a response's `data` object. An absent
/// or null key means the operation produced nothing.
pub(crate) fn decode_data<T: DeserializeOwned>(data: &Value, key: &str) -> Result<T, ApiError> {
    let value = data
        .get(key)
        .filter(|value| !value.is_null())
        .ok_or_else(|| ApiError::MissingData {
            key: key.to_string(),
        })?;

    serde_json::from_value(value.clone()).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}
