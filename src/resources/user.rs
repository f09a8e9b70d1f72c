use std::collections::BTreeMap;

use serde_json::Value;

use super::EntitySchema;
use crate::api::{ApiError, Connection, User, decode_data};
use crate::state::FieldSpec;

/// Schema for the `grackdb_user` resource.
pub struct UserSchema;

impl EntitySchema for UserSchema {
    type Entity = User;

    const TYPE_NAME: &'static str = "grackdb_user";
    const ID_VARIABLE: &'static str = "userId";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::computed("id", "id"),
        FieldSpec::required("username", "username"),
        FieldSpec::optional("avatar_url", "avatarUrl").nullable(),
    ];

    const CREATE_MUTATION: &'static str = r#"
        mutation($input: CreateUserInput!) {
            createUser(input: $input) {
                id
                username
                avatarUrl
            }
        }
    "#;

    const READ_QUERY: &'static str = r#"
        query($userId: ID!) {
            users(where: { id: $userId }) {
                edges {
                    node {
                        id
                        username
                        avatarUrl
                    }
                }
            }
        }
    "#;

    const UPDATE_MUTATION: &'static str = r#"
        mutation($userId: ID!, $input: UpdateUserInput!) {
            updateUser(id: $userId, input: $input) {
                id
                username
                avatarUrl
            }
        }
    "#;

    const DELETE_MUTATION: &'static str = r#"
        mutation($userId: ID!) {
            deleteUser(id: $userId) {
                id
                username
                avatarUrl
            }
        }
    "#;

    fn decode_created(data: &Value) -> Result<String, ApiError> {
        let user: User = decode_data(data, "createUser")?;
        Ok(user.id)
    }

    fn decode_read(data: &Value) -> Result<Option<User>, ApiError> {
        let connection: Connection<User> = decode_data(data, "users")?;
        Ok(connection.into_first())
    }

    fn state_attrs(user: &User) -> BTreeMap<String, Value> {
        let mut attrs = BTreeMap::new();
        attrs.insert("id".to_string(), Value::String(user.id.clone()));
        attrs.insert(
            "username".to_string(),
            Value::String(user.username.clone()),
        );
        // Explicit null keeps a cleared avatar distinct from an untracked one.
        attrs.insert(
            "avatar_url".to_string(),
            user.avatar_url
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        attrs
    }
}
