use std::collections::BTreeMap;

use serde_json::Value;

use super::EntitySchema;
use crate::api::{ApiError, Connection, DiscordAccount, decode_data};
use crate::state::FieldSpec;

/// Schema for the `grackdb_discord_account` resource.
///
/// `discord_id` is a Discord snowflake, set once at create; changing it is a
/// destroy-then-recreate decided outside the reconciler. `bot` is resolved
/// server-side only.
pub struct DiscordAccountSchema;

impl EntitySchema for DiscordAccountSchema {
    type Entity = DiscordAccount;

    const TYPE_NAME: &'static str = "grackdb_discord_account";
    const ID_VARIABLE: &'static str = "accountId";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::computed("id", "id"),
        FieldSpec::required("discord_id", "discordId").force_new(),
        FieldSpec::required("username", "username"),
        FieldSpec::required("discriminator", "discriminator"),
        FieldSpec::optional("owner", "owner"),
        FieldSpec::computed("bot", "bot"),
    ];

    const CREATE_MUTATION: &'static str = r#"
        mutation($input: CreateDiscordAccountInput!) {
            createDiscordAccount(input: $input) {
                id
                discordId
                username
                discriminator
                owner {
                    id
                    username
                    avatarUrl
                }
                bot {
                    id
                }
            }
        }
    "#;

    const READ_QUERY: &'static str = r#"
        query($accountId: ID!) {
            discordAccounts(where: { id: $accountId }) {
                edges {
                    node {
                        id
                        discordId
                        username
                        discriminator
                        owner {
                            id
                            username
                            avatarUrl
                        }
                        bot {
                            id
                        }
                    }
                }
            }
        }
    "#;

    const UPDATE_MUTATION: &'static str = r#"
        mutation($accountId: ID!, $input: UpdateDiscordAccountInput!) {
            updateDiscordAccount(id: $accountId, input: $input) {
                id
                discordId
                username
                discriminator
                owner {
                    id
                    username
                    avatarUrl
                }
                bot {
                    id
                }
            }
        }
    "#;

    const DELETE_MUTATION: &'static str = r#"
        mutation($accountId: ID!) {
            deleteDiscordAccount(id: $accountId) {
                id
                discordId
                username
                discriminator
                owner {
                    id
                    username
                    avatarUrl
                }
                bot {
                    id
                }
            }
        }
    "#;

    fn decode_created(data: &Value) -> Result<String, ApiError> {
        let account: DiscordAccount = decode_data(data, "createDiscordAccount")?;
        Ok(account.id)
    }

    fn decode_read(data: &Value) -> Result<Option<DiscordAccount>, ApiError> {
        let connection: Connection<DiscordAccount> = decode_data(data, "discordAccounts")?;
        Ok(connection.into_first())
    }

    fn state_attrs(account: &DiscordAccount) -> BTreeMap<String, Value> {
        let mut attrs = BTreeMap::new();
        attrs.insert("id".to_string(), Value::String(account.id.clone()));
        attrs.insert(
            "discord_id".to_string(),
            Value::String(account.discord_id.clone()),
        );
        attrs.insert(
            "username".to_string(),
            Value::String(account.username.clone()),
        );
        attrs.insert(
            "discriminator".to_string(),
            Value::String(account.discriminator.clone()),
        );

        // Back-references are tracked by id and only when resolved.
        if let Some(owner) = &account.owner {
            attrs.insert("owner".to_string(), Value::String(owner.id.clone()));
        }
        if let Some(bot) = &account.bot {
            attrs.insert("bot".to_string(), Value::String(bot.id.clone()));
        }

        attrs
    }
}
