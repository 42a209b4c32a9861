//! Generic GraphQL plumbing.
//!
//! - [`shape`] - static result shapes and the `graphql_shape!` macro
//! - [`args`] - argument values and their literal syntax
//! - [`query`] - query document generation
//! - [`response`] - response tree extraction and typed decoding
//! - [`transport`] - request execution

pub mod args;
pub mod query;
pub mod response;
pub mod shape;
pub mod transport;

pub use args::{ArgValue, Arguments};
pub use query::{build_arguments, build_query, build_selection_set, selection_set, GraphRequest};
pub use response::{decode, decode_list, decode_object, extract, ResponseTree};
pub use shape::{Field, Shape};
pub use transport::{GraphQLTransport, HttpTransport};
