//! URL serializer

use crate::record::{Path, UrlRecord};

/// Serialize a record to its string form
///
/// With `exclude_fragment` the `#...` part is left off.
pub fn serialize(url: &UrlRecord, exclude_fragment: bool) -> String {
    let mut out = String::with_capacity(url.scheme.len() + 32);
    out.push_str(&url.scheme);
    out.push(':');

    if let Some(host) = &url.host {
        out.push_str("//");
        if url.includes_credentials() {
            out.push_str(&url.username);
            if let Some(password) = url.password.as_deref().filter(|p| !p.is_empty()) {
                out.push(':');
                out.push_str(password);
            }
            out.push('@');
        }
        out.push_str(&host.serialize());
        if let Some(port) = url.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
    } else if url.scheme == "file" {
        out.push_str("//");
    }

    match &url.path {
        Path::Opaque(path) => out.push_str(path),
        Path::List(segments) => {
            // `/.` keeps a host-less path starting with `//` from reading as an authority.
            if url.host.is_none()
                && url.scheme != "file"
                && segments.len() > 1
                && segments[0].is_empty()
            {
                out.push_str("/.");
            }
            for segment in segments {
                out.push('/');
                out.push_str(segment);
            }
            if segments.is_empty() {
                out.push('/');
            }
        }
    }

    if let Some(query) = &url.query {
        out.push('?');
        out.push_str(query);
    }

    if !exclude_fragment {
        if let Some(fragment) = &url.fragment {
            out.push('#');
            out.push_str(fragment);
        }
    }

    out
}
