use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidStyle(String),
    NoLabels,
    Busy,
    Render(String),
    WorkerPanicked,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::InvalidStyle(message) => write!(f, "invalid label style: {message}"),
            Error::NoLabels => write!(f, "no records left to print after filtering"),
            Error::Busy => write!(f, "a label sheet is already being generated"),
            Error::Render(message) => write!(f, "failed to render labels: {message}"),
            Error::WorkerPanicked => write!(f, "label generation worker panicked"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}
