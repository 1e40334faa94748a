// Composition root for the earnings tracker.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the file backed store and the tracker.
// - Expose the tracker over HTTP and GraphQL.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
