//! Query document generation.
//!
//! Everything here is pure string formatting; nothing touches the network.

use serde::Serialize;

use crate::{
    error::{Error, Result},
    graphql::{
        args::Arguments,
        shape::{is_graphql_name, Field, Shape},
    },
};

/// Selection set for shape `S`.
///
/// # Panics
///
/// Panics if the shape is malformed, see [`selection_set`].
pub fn build_selection_set<S: Shape>() -> String {
    selection_set(S::fields())
}

/// Renders one line per tagged field, in declaration order.
///
/// Fields without a wire name are skipped. Fields with a nested selection
/// render as `wire { ... }`.
///
/// # Panics
///
/// Panics when a wire name is not a valid GraphQL name or when a nested
/// selection has no tagged fields. Both are static schema mistakes.
pub fn selection_set(fields: &[Field]) -> String {
    fields
        .iter()
        .filter_map(|field| {
            let wire = field.selected_wire()?;
            assert!(
                is_graphql_name(wire),
                "field `{}` has invalid GraphQL wire name `{}`",
                field.name,
                wire
            );
            Some(match field.selection {
                None => wire.to_string(),
                Some(nested) => {
                    let inner = selection_set(nested());
                    assert!(
                        !inner.is_empty(),
                        "nested field `{}` selects no tagged fields",
                        field.name
                    );
                    format!("{wire} {{ {inner} }}")
                },
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `key: value` pairs joined with `, `.
pub fn build_arguments(args: &Arguments) -> String {
    args.to_string()
}

/// Builds a single-root query document for shape `S`.
///
/// - id only: `{ name(id: "<id>"){ <selection> } }`
/// - args only: `{ name(<args>){ <selection> } }`
/// - both: `{ name(id: "<id>", <args>){ <selection> } }`
/// - neither: `{ name{ <selection> } }`
///
/// An empty id or an empty argument mapping counts as absent.
pub fn build_query<S: Shape>(query_name: &str, id: Option<&str>, args: Option<&Arguments>) -> String {
    let selection = build_selection_set::<S>();
    let id = id.filter(|id| !id.is_empty());
    let args = args.filter(|args| !args.is_empty());

    match (id, args) {
        (Some(id), None) => format!(r#"{{ {query_name}(id: "{id}"){{ {selection} }} }}"#),
        (None, Some(args)) => {
            format!("{{ {query_name}({}){{ {selection} }} }}", build_arguments(args))
        },
        (Some(id), Some(args)) => format!(
            r#"{{ {query_name}(id: "{id}", {}){{ {selection} }} }}"#,
            build_arguments(args)
        ),
        (None, None) => format!("{{ {query_name}{{ {selection} }} }}"),
    }
}

/// A query document plus its named variables, as posted to a GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRequest {
    pub query: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub variables: serde_json::Map<String, serde_json::Value>,
}

impl GraphRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: serde_json::Map::new(),
        }
    }

    /// Adds the variable `name`, failing with [`Error::Encode`] if `value`
    /// has no JSON representation.
    pub fn var(mut self, name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(Error::Encode)?;
        self.variables.insert(name.into(), value);
        Ok(self)
    }
}

impl From<String> for GraphRequest {
    fn from(query: String) -> Self {
        GraphRequest::new(query)
    }
}
