use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Received message is neither AF nor KL (airline code {0:?}). Cannot process the message further.")]
    UnknownCarrier(String),

    #[error("XSD validation error in the input message against {schema}. Message will not be processed further.")]
    InvalidInput { schema: String },

    #[error("No body found in the soap message")]
    MissingBody,

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: String, value: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is not a notification dialect")]
    NotNotificationDialect(&'static str),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl RelayError {
    /// Operator-facing error code, where the failure class has one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            RelayError::UnknownCarrier(_) => Some("E0001"),
            RelayError::InvalidInput { .. } => Some("E0002"),
            RelayError::MissingBody => Some("E0003"),
            _ => None,
        }
    }

    pub(crate) fn invalid_field(field: &str, value: impl Into<String>) -> Self {
        RelayError::InvalidField {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
