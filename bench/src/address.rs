use crate::error::Error;
use std::fmt::{Display, Formatter};

const URL_PREFIXES: [&str; 2] = ["http://", "https://"];
const IP4_PREFIX: &str = "/ip4/";
const IP4_HOST_SEGMENT: usize = 2;
const IP4_PORT_SEGMENT: usize = 4;

/// Canonical `host:port` form of a peer or target endpoint.
///
/// Always holds exactly one `:` with a non-empty host on its left and a
/// non-empty port on its right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedEndpoint {
    address: String,
    separator: usize,
}

impl ResolvedEndpoint {
    pub fn new(address: &str) -> Result<Self, Error> {
        let mut separators = address.match_indices(':');
        let Some((separator, _)) = separators.next() else {
            return Err(Error::invalid_address(address, "missing port separator"));
        };

        if separators.next().is_some() {
            return Err(Error::invalid_address(address, "more than one port separator"));
        }

        if separator == 0 {
            return Err(Error::invalid_address(address, "empty host"));
        }

        if separator + 1 == address.len() {
            return Err(Error::invalid_address(address, "empty port"));
        }

        Ok(ResolvedEndpoint {
            address: address.to_owned(),
            separator,
        })
    }

    pub fn host(&self) -> &str {
        &self.address[..self.separator]
    }

    pub fn port(&self) -> &str {
        &self.address[self.separator + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }
}

impl Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}

impl AsRef<str> for ResolvedEndpoint {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

/// Normalizes `http://host:port`, `https://host:port`, `/ip4/<ip>/tcp/<port>/...`
/// or a bare `host:port` into a [`ResolvedEndpoint`].
pub fn resolve(input: &str) -> Result<ResolvedEndpoint, Error> {
    let address = URL_PREFIXES
        .iter()
        .find_map(|prefix| input.strip_prefix(prefix))
        .unwrap_or(input);

    if address.starts_with(IP4_PREFIX) {
        let segments = address.split('/').collect::<Vec<_>>();
        if segments.len() <= IP4_PORT_SEGMENT {
            return Err(Error::invalid_address(input, "not enough /ip4/ segments"));
        }

        let host = segments[IP4_HOST_SEGMENT];
        let port = segments[IP4_PORT_SEGMENT];
        if host.is_empty() || port.is_empty() {
            return Err(Error::invalid_address(input, "empty /ip4/ host or port"));
        }

        return ResolvedEndpoint::new(&format!("{host}:{port}"));
    }

    if address.contains(':') {
        return ResolvedEndpoint::new(address);
    }

    Err(Error::invalid_address(input, "unsupported address notation"))
}

/// Resolves every input in order, returning the resolved endpoints and the
/// inputs that were rejected together with their errors.
pub fn resolve_all<S: AsRef<str>>(inputs: &[S]) -> (Vec<ResolvedEndpoint>, Vec<(String, Error)>) {
    let mut resolved = Vec::with_capacity(inputs.len());
    let mut rejected = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        match resolve(input) {
            Ok(endpoint) => resolved.push(endpoint),
            Err(error) => rejected.push((input.to_owned(), error)),
        }
    }
    (resolved, rejected)
}
