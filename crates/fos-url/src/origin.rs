//! URL Origin
//!
//! Tuple origins for network schemes, opaque origins for everything else.

use std::fmt;

use crate::host::Host;
use crate::record::{Path, UrlRecord};

/// Web origin of a URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Unique origin with no serializable parts
    Opaque,
    /// Scheme, host and non-default port
    Tuple {
        scheme: String,
        host: Host,
        port: Option<u16>,
    },
}

impl Origin {
    /// Origin of a URL record
    pub fn of(url: &UrlRecord) -> Self {
        match url.scheme.as_str() {
            "ftp" | "gopher" | "http" | "https" | "ws" | "wss" => match &url.host {
                Some(host) => Origin::Tuple {
                    scheme: url.scheme.clone(),
                    host: host.clone(),
                    port: url.port,
                },
                None => Origin::Opaque,
            },
            "blob" => match &url.path {
                // The path of a blob URL is the URL of its creator.
                Path::Opaque(inner) => UrlRecord::parse(inner)
                    .map(|inner| Origin::of(&inner))
                    .unwrap_or(Origin::Opaque),
                Path::List(_) => Origin::Opaque,
            },
            _ => Origin::Opaque,
        }
    }

    /// Whether this is an opaque origin
    pub fn is_opaque(&self) -> bool {
        matches!(self, Origin::Opaque)
    }

    /// Same-origin check
    ///
    /// Opaque origins carry no identity here, so they never match.
    pub fn is_same_origin(&self, other: &Origin) -> bool {
        match (self, other) {
            (Origin::Tuple { .. }, Origin::Tuple { .. }) => self == other,
            _ => false,
        }
    }

    /// `scheme://host[:port]`, or `null` for opaque origins
    pub fn ascii_serialization(&self) -> String {
        match self {
            Origin::Opaque => "null".to_string(),
            Origin::Tuple { scheme, host, port } => match port {
                Some(port) => format!("{scheme}://{host}:{port}"),
                None => format!("{scheme}://{host}"),
            },
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ascii_serialization())
    }
}
