use serde_json::{Map, Value};

use super::{EntitySchema, UserSchema};
use crate::api::{ApiError, GrackdbClient, User};
use crate::error::GrackdbError;
use crate::state::ResourceState;

const CURRENT_USER_QUERY: &str = r#"
    {
        currentUser {
            id
            username
            avatarUrl
        }
    }
"#;

/// Reads the user authenticated by the configured bearer token. Read-only
/// and uncached; every call round-trips to the API.
pub async fn read_current_user(client: &GrackdbClient) -> Result<ResourceState, GrackdbError> {
    let data = client
        .execute(CURRENT_USER_QUERY, Value::Object(Map::new()))
        .await?;

    let user: Option<User> = match data.get("currentUser") {
        Some(value) if !value.is_null() => {
            Some(serde_json::from_value(value.clone()).map_err(|e| {
                GrackdbError::Api(ApiError::Decode {
                    message: e.to_string(),
                })
            })?)
        }
        _ => None,
    };

    let Some(user) = user else {
        return Err(GrackdbError::Auth(
            "failed to retrieve current user, ensure a valid api token is configured".to_string(),
        ));
    };

    tracing::debug!(id = %user.id, "current user resolved");

    Ok(ResourceState {
        id: user.id.clone(),
        attrs: UserSchema::state_attrs(&user),
    })
}
