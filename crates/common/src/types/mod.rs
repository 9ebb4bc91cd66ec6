use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub db: bool,
    pub time: String,
}

/// Uniform error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
