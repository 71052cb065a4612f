// Errors raised while fetching and rendering the chart
use std::fmt;

/// Upstream endpoint a request was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Temperature,
    Accumulation,
    Reset,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "temperature",
            Self::Accumulation => "accumulation",
            Self::Reset => "reset",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("{kind} request returned HTTP {status}")]
    Fetch { kind: Endpoint, status: u16 },

    #[error("{kind} request failed: {source}")]
    Request {
        kind: Endpoint,
        source: reqwest::Error,
    },

    #[error("{kind} response could not be parsed: {source}")]
    Parse {
        kind: Endpoint,
        source: serde_json::Error,
    },

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

impl ChartError {
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Fetch { kind, .. } | Self::Request { kind, .. } | Self::Parse { kind, .. } => {
                Some(*kind)
            }
            Self::Render(_) => None,
        }
    }
}
