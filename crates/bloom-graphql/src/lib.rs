//! GraphQL access to the Bloom Growth API
//!
//! This crate holds everything needed to talk to a remote GraphQL endpoint on behalf of an
//! agent: a [`GraphQLTransport`] seam with an HTTP implementation, helpers that turn schema
//! introspection into readable operation details, and a passthrough executor for ad hoc
//! operations.

mod client;
mod error;
mod example;
mod execute;
pub mod introspection;
mod transport;
mod type_ref;
mod user;

pub use client::HttpClient;
pub use error::GraphQLError;
pub use example::{OperationKind, generate_example};
pub use execute::{execute_operation, parse_variables};
pub use transport::{GraphQLTransport, Response, ResponseError};
pub use type_ref::{TypeKind, TypeRef, format_type};
pub use user::authenticated_user_id;
