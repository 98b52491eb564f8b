//! Resolution result sequences.

use std::{collections::VecDeque, net::SocketAddr};

/// One resolved transport endpoint, with the names it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverEntry {
    endpoint: SocketAddr,
    host_name: String,
    service_name: String,
}

impl ResolverEntry {
    pub fn new(
        endpoint: SocketAddr,
        host_name: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            host_name: host_name.into(),
            service_name: service_name.into(),
        }
    }

    pub fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// An ordered sequence of resolved endpoints.
///
/// Iterating consumes entries front to back. Resolvers never hand out an
/// empty sequence; a lookup that finds nothing is reported as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverResults {
    entries: VecDeque<ResolverEntry>,
}

impl ResolverResults {
    /// Creates a single-entry sequence for an already known endpoint.
    pub fn create(
        endpoint: SocketAddr,
        host_name: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        let mut entries = VecDeque::with_capacity(1);
        entries.push_back(ResolverEntry::new(endpoint, host_name, service_name));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&ResolverEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolverEntry> + '_ {
        self.entries.iter()
    }

    /// The transport endpoints, in order.
    pub fn endpoints(&self) -> impl Iterator<Item = SocketAddr> + '_ {
        self.entries.iter().map(ResolverEntry::endpoint)
    }
}

impl Iterator for ResolverResults {
    type Item = ResolverEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl ExactSizeIterator for ResolverResults {}

impl FromIterator<ResolverEntry> for ResolverResults {
    fn from_iter<T: IntoIterator<Item = ResolverEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_single() {
        let ep: SocketAddr = "192.0.2.1:1194".parse().unwrap();
        let results = ResolverResults::create(ep, "192.0.2.1", "1194");

        assert_eq!(results.len(), 1);
        let entry = results.first().unwrap();
        assert_eq!(entry.endpoint(), ep);
        assert_eq!(entry.host_name(), "192.0.2.1");
        assert_eq!(entry.service_name(), "1194");
    }

    #[test]
    fn test_iteration_is_ordered() {
        let entries = vec![
            ResolverEntry::new("192.0.2.1:1".parse().unwrap(), "a", "1"),
            ResolverEntry::new("192.0.2.2:1".parse().unwrap(), "a", "1"),
        ];
        let results: ResolverResults = entries.clone().into_iter().collect();
        assert_eq!(results.len(), 2);

        let collected: Vec<_> = results.collect();
        assert_eq!(collected, entries);
    }
}
