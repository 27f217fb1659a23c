//! A small GraphQL-like engine over the in-memory DevHub graph.
//!
//! Documents are classified, split into field expressions, resolved against a [`store::Store`]
//! on behalf of an optional [`Caller`], and projected down to the requested sub-fields.

#![warn(unreachable_pub)]

pub mod json_ext;

pub mod authorization;
pub mod configuration;
mod context;
pub mod error;
mod executable;
mod execution;
pub mod graphql;
mod introspection;
mod resolvers;
pub mod session;
mod spec;
pub mod store;

pub use configuration::Configuration;
pub use context::Caller;
pub use context::CallerLookup;
pub use executable::main;
pub use execution::Executor;
