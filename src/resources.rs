mod current_user;
mod discord_account;
mod user;

pub use current_user::read_current_user;
pub use discord_account::DiscordAccountSchema;
pub use user::UserSchema;

use std::collections::BTreeMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::{ApiError, GrackdbClient};
use crate::diagnostics::Diagnostic;
use crate::error::GrackdbError;
use crate::state::{ChangeSet, DeclaredConfig, FieldKind, FieldSpec, ResourceState};

/// Per-entity variation consumed by the generic [`Reconciler`]: the field
/// schema, the GraphQL operation strings, and how to decode responses.
pub trait EntitySchema: Send + Sync + 'static {
    type Entity: DeserializeOwned + Send;

    const TYPE_NAME: &'static str;
    const FIELDS: &'static [FieldSpec];
    /// Variable name carrying the entity id in read/update/delete operations.
    const ID_VARIABLE: &'static str;

    const CREATE_MUTATION: &'static str;
    const READ_QUERY: &'static str;
    const UPDATE_MUTATION: &'static str;
    const DELETE_MUTATION: &'static str;

    /// Extracts the new entity id from a create mutation's data.
    fn decode_created(data: &Value) -> Result<String, ApiError>;

    /// Decodes the filtered read query's data; `None` means zero results.
    fn decode_read(data: &Value) -> Result<Option<Self::Entity>, ApiError>;

    /// Flattens an entity into local attribute values. Back-references are
    /// stored by id.
    fn state_attrs(entity: &Self::Entity) -> BTreeMap<String, Value>;
}

/// Result of a read: not-found is a non-fatal outcome carrying a warning
/// diagnostic, so the caller can treat it as drift.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(ResourceState),
    NotFound(Diagnostic),
}

/// The CRUD verbs a host invokes against one resource type.
#[async_trait]
pub trait ResourceLifecycle: Send + Sync {
    fn type_name(&self) -> &'static str;

    /// Creates the entity from declared configuration, then reads it back to
    /// populate full state rather than trusting the mutation echo.
    async fn create(
        &self,
        client: &GrackdbClient,
        declared: &DeclaredConfig,
    ) -> Result<ResourceState, GrackdbError>;

    async fn read(&self, client: &GrackdbClient, id: &str) -> Result<ReadOutcome, GrackdbError>;

    /// Applies the host-detected changes, then reads back to resync.
    async fn update(
        &self,
        client: &GrackdbClient,
        id: &str,
        changes: &ChangeSet,
    ) -> Result<ResourceState, GrackdbError>;

    /// Deletes by id. Absence is not verified with a follow-up read; the
    /// caller clears its identity marker on success.
    async fn delete(&self, client: &GrackdbClient, id: &str) -> Result<(), GrackdbError>;
}

/// Generic reconciler instantiated per entity type.
pub struct Reconciler<S: EntitySchema> {
    _schema: PhantomData<S>,
}

impl<S: EntitySchema> Reconciler<S> {
    pub fn new() -> Self {
        Self {
            _schema: PhantomData,
        }
    }
}

impl<S: EntitySchema> Default for Reconciler<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: EntitySchema> ResourceLifecycle for Reconciler<S> {
    fn type_name(&self) -> &'static str {
        S::TYPE_NAME
    }

    async fn create(
        &self,
        client: &GrackdbClient,
        declared: &DeclaredConfig,
    ) -> Result<ResourceState, GrackdbError> {
        let input = build_create_input(S::TYPE_NAME, S::FIELDS, declared)?;

        let mut variables = Map::new();
        variables.insert("input".to_string(), Value::Object(input));

        let data = client
            .execute(S::CREATE_MUTATION, Value::Object(variables))
            .await?;
        let id = S::decode_created(&data)?;

        tracing::info!(resource = S::TYPE_NAME, id = %id, "created");

        match self.read(client, &id).await? {
            ReadOutcome::Found(state) => Ok(state),
            ReadOutcome::NotFound(_) => Err(GrackdbError::NotFound {
                resource_type: S::TYPE_NAME.to_string(),
                id,
            }),
        }
    }

    async fn read(&self, client: &GrackdbClient, id: &str) -> Result<ReadOutcome, GrackdbError> {
        let data = client
            .execute(S::READ_QUERY, id_variables(S::ID_VARIABLE, id))
            .await?;

        match S::decode_read(&data)? {
            Some(entity) => Ok(ReadOutcome::Found(ResourceState {
                id: id.to_string(),
                attrs: S::state_attrs(&entity),
            })),
            None => Ok(ReadOutcome::NotFound(Diagnostic::warning(format!(
                "unable to refresh {} state, no entity with id '{}'",
                S::TYPE_NAME,
                id
            )))),
        }
    }

    async fn update(
        &self,
        client: &GrackdbClient,
        id: &str,
        changes: &ChangeSet,
    ) -> Result<ResourceState, GrackdbError> {
        let input = build_update_input(S::FIELDS, changes);

        let mut variables = Map::new();
        variables.insert(S::ID_VARIABLE.to_string(), Value::String(id.to_string()));
        variables.insert("input".to_string(), Value::Object(input));

        client
            .execute(S::UPDATE_MUTATION, Value::Object(variables))
            .await?;

        tracing::info!(resource = S::TYPE_NAME, id = %id, "updated");

        match self.read(client, id).await? {
            ReadOutcome::Found(state) => Ok(state),
            ReadOutcome::NotFound(_) => Err(GrackdbError::NotFound {
                resource_type: S::TYPE_NAME.to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn delete(&self, client: &GrackdbClient, id: &str) -> Result<(), GrackdbError> {
        client
            .execute(S::DELETE_MUTATION, id_variables(S::ID_VARIABLE, id))
            .await?;

        tracing::info!(resource = S::TYPE_NAME, id = %id, "deleted");

        Ok(())
    }
}

pub fn get_resource(name: &str) -> Result<Box<dyn ResourceLifecycle>, GrackdbError> {
    match name {
        "grackdb_user" => Ok(Box::new(Reconciler::<UserSchema>::new())),
        "grackdb_discord_account" => Ok(Box::new(Reconciler::<DiscordAccountSchema>::new())),
        other => Err(GrackdbError::UnknownResource(other.to_string())),
    }
}

pub fn resource_types() -> Vec<&'static str> {
    vec![UserSchema::TYPE_NAME, DiscordAccountSchema::TYPE_NAME]
}

fn id_variables(name: &str, id: &str) -> Value {
    let mut variables = Map::new();
    variables.insert(name.to_string(), Value::String(id.to_string()));
    Value::Object(variables)
}

/// Create input: every declared required field, plus declared optional
/// fields that are non-empty. Computed fields are never sent.
fn build_create_input(
    type_name: &str,
    fields: &[FieldSpec],
    declared: &DeclaredConfig,
) -> Result<Map<String, Value>, GrackdbError> {
    let mut input = Map::new();

    for field in fields {
        match field.kind {
            FieldKind::Computed => {}
            FieldKind::Required => {
                let value =
                    declared
                        .get(field.name)
                        .ok_or_else(|| GrackdbError::MissingField {
                            resource_type: type_name.to_string(),
                            field: field.name.to_string(),
                        })?;
                input.insert(field.wire.to_string(), value.clone());
            }
            FieldKind::Optional => {
                if let Some(value) = declared.get(field.name) {
                    if !is_empty(value) {
                        input.insert(field.wire.to_string(), value.clone());
                    }
                }
            }
        }
    }

    Ok(input)
}

/// Update input: only host-detected changes. Force-new and computed fields
/// are dropped; a nullable field changed to empty becomes an explicit null.
fn build_update_input(fields: &[FieldSpec], changes: &ChangeSet) -> Map<String, Value> {
    let mut input = Map::new();

    for (name, value) in changes.iter() {
        let Some(field) = fields.iter().find(|field| field.name == name) else {
            tracing::warn!(field = %name, "ignoring unknown field in change set");
            continue;
        };

        if field.kind == FieldKind::Computed || field.force_new {
            tracing::warn!(field = %name, "field cannot be updated in place, ignoring");
            continue;
        }

        if field.nullable && is_empty(value) {
            input.insert(field.wire.to_string(), Value::Null);
        } else {
            input.insert(field.wire.to_string(), value.clone());
        }
    }

    input
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
