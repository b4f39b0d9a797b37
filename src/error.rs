//! Error types shared by the renderer, the animation player and the CLI.

use std::io;

/// Invalid render configuration. Raised by validation before any rendering work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("charmap cannot be empty")]
    EmptyCharMap,

    #[error("width must be greater than zero")]
    NonPositiveWidth,

    #[error("height must be greater than zero")]
    NonPositiveHeight,

    #[error("image dimensions must be greater than zero")]
    ImageDimensions,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Decode,
    Io,
}

/// Errors produced while acquiring, decoding or rendering a source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{name}: {source}")]
    InvalidSource {
        name: String,
        #[source]
        source: ConfigError,
    },

    #[error("unable to decode {name}: {message}")]
    Decode { name: String, message: String },

    #[error("unable to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unable to download {url}: server responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("playback of {name} failed: {source}")]
    Playback {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The error kind, independent of which source produced it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::InvalidSource { .. } => ErrorKind::Config,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Io { .. }
            | Error::Fetch { .. }
            | Error::Status { .. }
            | Error::Playback { .. } => ErrorKind::Io,
        }
    }

    /// Name of the file, URL or stream that caused the error, if known.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Error::Config(_) => None,
            Error::InvalidSource { name, .. }
            | Error::Decode { name, .. }
            | Error::Io { name, .. }
            | Error::Playback { name, .. } => Some(name),
            Error::Fetch { url, .. } | Error::Status { url, .. } => Some(url),
        }
    }

    /// Attach a source name to a bare configuration error.
    pub fn for_source(self, name: &str) -> Self {
        match self {
            Error::Config(source) => Error::InvalidSource {
                name: name.to_string(),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::EmptyCharMap.to_string(), "charmap cannot be empty");
        assert_eq!(
            ConfigError::NonPositiveWidth.to_string(),
            "width must be greater than zero"
        );
        assert_eq!(
            ConfigError::NonPositiveHeight.to_string(),
            "height must be greater than zero"
        );
    }

    #[test]
    fn test_for_source_attaches_name() {
        let err = Error::from(ConfigError::NonPositiveWidth).for_source("cat.png");
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.source_name(), Some("cat.png"));
        assert_eq!(err.to_string(), "cat.png: width must be greater than zero");
    }

    #[test]
    fn test_for_source_keeps_named_errors() {
        let err = Error::Decode {
            name: "a.gif".to_string(),
            message: "bad header".to_string(),
        }
        .for_source("b.gif");
        assert_eq!(err.source_name(), Some("a.gif"));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_io_error_kind() {
        let err = Error::Io {
            name: "missing.png".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "unable to read missing.png: not found");
    }
}
