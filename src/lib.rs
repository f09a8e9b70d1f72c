//! GrackDB provider core.
//!
//! Reconciles locally declared GrackDB entities against the remote GraphQL
//! API via Create/Read/Update/Delete verbs, plus a read-only data source for
//! the authenticated user.

pub mod api;
pub mod diagnostics;
pub mod resources;
pub mod state;

mod error;
mod output;

pub use api::{ApiError, DEFAULT_API_URL, GrackdbClient, ProviderConfig};
pub use diagnostics::{Diagnostic, Severity};
pub use error::GrackdbError;
pub use output::render_state;
pub use resources::{
    DiscordAccountSchema, EntitySchema, ReadOutcome, Reconciler, ResourceLifecycle, UserSchema,
    get_resource, read_current_user, resource_types,
};
pub use state::{ChangeSet, DeclaredConfig, FieldKind, FieldSpec, ResourceState};
