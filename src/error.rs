use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Kind of value a response key is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Object,
    List,
}

impl std::fmt::Display for Expect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expect::Object => f.write_str("object"),
            Expect::List => f.write_str("list"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),
    #[error("bad response shape: expected {expected} at `{key}`")]
    Shape { key: String, expected: Expect },
    #[error("failed to re-encode response: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid point: {0}")]
    InvalidPoint(String),
    #[error("database error: {0}")]
    Database(#[from] clickhouse::error::Error),
}

impl Error {
    pub fn is_shape(&self) -> bool {
        matches!(self, Error::Shape { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Encode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Status { .. } | Error::GraphQL(_)
        )
    }
}
