use thiserror::Error;

/// Failures talking to the remote spreadsheet mirror.
///
/// Every variant is treated as "remote unavailable" by the stores: loads fall
/// back to the local file and persists keep the local write.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    #[error("Remote store answered with status {0}")]
    Status(u16),

    #[error("Remote store returned malformed data: {0}")]
    Malformed(String),
}

/// Errors raised by the inventory, settings and credential stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A product with barcode {0} already exists")]
    DuplicateBarcode(String),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("No product with barcode {0}")]
    NotFound(String),

    #[error("Delete of {0} was not confirmed")]
    DeleteNotConfirmed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("XLSX export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Login gate failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    // Must not reveal whether an account exists.
    #[error("Recovery denied")]
    EmailMismatch,

    #[error("An admin account is already registered")]
    AlreadyRegistered,

    #[error("No admin account is registered")]
    NotRegistered,

    #[error("Username, password and email cannot be empty")]
    EmptyField,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid image encoding: {0}")]
    InvalidEncoding(String),
}

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Barcode value {0:?} cannot be encoded as Code 128")]
    EncodingUnsupported(String),

    #[error("Failed to load logo: {0}")]
    Logo(#[from] image::ImageError),

    #[error("Failed to encode label: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, StoreError>;
