use std::fmt;

/// Errors that can occur while talking to the media host.
#[derive(Debug)]
pub enum AssetError {
    /// The host was unreachable or the connection failed mid-request.
    Transport(reqwest::Error),
    /// The host answered with a non-success HTTP status.
    UnexpectedStatus { status: u16, body: String },
    /// The host's response body did not have the expected shape.
    MalformedResponse(String),
    /// A destroy request was acknowledged with something other than "ok".
    Rejected { result: String },
    /// The file's MIME type is neither image nor video.
    UnsupportedMediaType(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "asset host unreachable: {err}"),
            Self::UnexpectedStatus { status, body } => {
                write!(f, "asset host returned status {status}: {body}")
            }
            Self::MalformedResponse(msg) => write!(f, "malformed asset host response: {msg}"),
            Self::Rejected { result } => write!(f, "asset host rejected deletion: {result}"),
            Self::UnsupportedMediaType(mime) => write!(f, "unsupported media type: {mime}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AssetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}
