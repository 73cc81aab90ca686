// Coordinators layer - Workflow orchestration
//
// Coordinators handle workflow orchestration by composing provider operations
// for specific API endpoints and CLI commands. Role checks happen here.

pub mod admin_coordinator;
pub mod auth_coordinator;
pub mod content_coordinator;

pub use admin_coordinator::{AdminCoordinator, CredentialChange};
pub use auth_coordinator::{AuthCoordinator, AuthenticatedSession, LoginResult, OpenSession};
pub use content_coordinator::ContentCoordinator;
