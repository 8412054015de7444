use thiserror::Error;

/// App errors
#[derive(Error, Debug)]
pub enum AppError {

    /// Toml parsing error
    #[error("Failed to parse settings file: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Toml serialization error
    #[error("Failed to serialize settings: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    /// Settings file access
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Missing arguments
    #[error("Missing mandatory arguments: {0}\nTry `parley --help` for more information.")]
    MissingArgError(&'static str),

    /// Invalid argument value
    #[error("Incorrect argument value: {0}")]
    InvalidArgError(&'static str),

    /// Library error
    #[error("{0}")]
    LibError(#[from] parley_lib::Error),

    /// Other errors
    #[error("Reading user input: {0}")]
    Rustyline(#[from] rustyline::error::ReadlineError),

    /// Color parsing error
    #[error("The format of the color value is incorrect")]
    ColorParseError,

    /// General error.
    #[error("{0}")]
    Error(String),
}
