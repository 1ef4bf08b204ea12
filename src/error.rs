use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// The input archive could not be opened.
    Io(std::io::Error),
    /// The input is not a readable ZIP archive.
    InvalidDocx(String),
    /// The archive has no `word/document.xml` entry.
    MissingContentPart,
    /// The content part is not well-formed XML.
    Xml(roxmltree::Error),
    /// The content part parsed but does not look like a WordprocessingML document.
    MalformedMarkup(String),
    /// A media entry could not be read from the archive or written to temp storage.
    AssetExtraction {
        name: String,
        source: std::io::Error,
    },
    /// The finished PDF could not be written to its destination.
    RenderWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidDocx(msg) => write!(f, "invalid DOCX: {msg}"),
            Error::MissingContentPart => {
                write!(f, "missing word/document.xml (is this a DOCX file?)")
            }
            Error::Xml(e) => write!(f, "malformed document markup: {e}"),
            Error::MalformedMarkup(msg) => write!(f, "malformed document markup: {msg}"),
            Error::AssetExtraction { name, source } => {
                write!(f, "failed to extract media entry {name}: {source}")
            }
            Error::RenderWrite { path, source } => {
                write!(f, "failed to write PDF to {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::AssetExtraction { source, .. } | Error::RenderWrite { source, .. } => {
                Some(source)
            }
            Error::InvalidDocx(_) | Error::MissingContentPart | Error::MalformedMarkup(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}
