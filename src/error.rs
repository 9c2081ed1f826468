use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubticketsError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("unknown affordance mode '{0}' (expected 'link' or 'form')")]
    UnknownAffordanceMode(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("invalid URL '{0}': {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SubticketsError>;
