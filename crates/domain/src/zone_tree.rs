//! Zone tree registration.
//!
//! Turns the nested domain configuration into a flat, read-only table that
//! maps every fully-qualified name to the answer data of its node.

use crate::config::{ServerConfig, ZoneNode};
use crate::dns_name;
use std::collections::HashMap;
use std::net::IpAddr;

/// Answer data of one zone node, with its children stripped and its
/// fully-qualified name attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEntry {
    fqdn: String,
    node: ZoneNode,
    default_ttl: u32,
}

impl ZoneEntry {
    fn new(fqdn: String, node: &ZoneNode, default_ttl: u32) -> Self {
        let node = ZoneNode {
            children: Vec::new(),
            ..node.clone()
        };
        Self {
            fqdn,
            node,
            default_ttl,
        }
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    pub fn address(&self) -> Option<(IpAddr, u32)> {
        self.node
            .address
            .as_ref()
            .map(|a| (a.ip, self.ttl_or_default(a.ttl)))
    }

    pub fn mail_exchange(&self) -> Option<(&str, u16, u32)> {
        self.node
            .mail_exchange
            .as_ref()
            .map(|mx| (mx.content.as_str(), mx.priority, self.ttl_or_default(mx.ttl)))
    }

    pub fn text(&self) -> Option<(&str, u32)> {
        self.node
            .txt
            .as_ref()
            .map(|t| (t.content.as_str(), self.ttl_or_default(t.ttl)))
    }

    pub fn alias(&self) -> Option<(&str, u32)> {
        self.node
            .cname
            .as_ref()
            .map(|t| (t.content.as_str(), self.ttl_or_default(t.ttl)))
    }

    pub fn nameserver(&self) -> Option<(&str, u32)> {
        self.node
            .ns
            .as_ref()
            .map(|t| (t.content.as_str(), self.ttl_or_default(t.ttl)))
    }

    fn ttl_or_default(&self, ttl: Option<u32>) -> u32 {
        ttl.unwrap_or(self.default_ttl)
    }
}

/// Read-only mapping from fully-qualified name to [`ZoneEntry`].
///
/// Entries live in an arena; the index maps canonical (lower-case, rooted)
/// names to arena slots.
#[derive(Debug, Clone, Default)]
pub struct QueryBindings {
    entries: Vec<ZoneEntry>,
    index: HashMap<String, usize>,
}

impl QueryBindings {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Exact lookup of a fully-qualified name.
    pub fn get(&self, fqdn: &str) -> Option<&ZoneEntry> {
        let slot = *self.index.get(&dns_name::canonical(fqdn))?;
        self.entries.get(slot)
    }

    /// Finds the entry answering for `qname`: the exact name, else the
    /// closest registered parent, else a binding for the root.
    pub fn lookup(&self, qname: &str) -> Option<&ZoneEntry> {
        let qname = dns_name::canonical(qname);
        let slot = dns_name::suffixes(&qname)
            .find_map(|suffix| self.index.get(suffix))
            .or_else(|| self.index.get(dns_name::ROOT))
            .copied();
        slot.and_then(|slot| self.entries.get(slot))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Installs `entry`, returning true if it replaced an earlier binding.
    fn insert(&mut self, entry: ZoneEntry) -> bool {
        let key = dns_name::canonical(entry.fqdn());
        self.entries.push(entry);
        self.index.insert(key, self.entries.len() - 1).is_some()
    }
}

/// Result of [`ZoneTree::register`].
#[derive(Debug, Default)]
pub struct Registration {
    pub bindings: QueryBindings,
    /// Every computed name, in visiting order, whether installed or not.
    pub candidates: Vec<String>,
    /// Names that failed validation and got no binding.
    pub skipped: Vec<String>,
    /// Names registered more than once; the last node wins.
    pub overwritten: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ZoneTree {
    roots: Vec<ZoneNode>,
    default_ttl: u32,
}

impl ZoneTree {
    pub fn new(roots: Vec<ZoneNode>, default_ttl: u32) -> Self {
        Self { roots, default_ttl }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.domains.clone(), config.ttl)
    }

    pub fn roots(&self) -> &[ZoneNode] {
        &self.roots
    }

    /// Walks the tree depth first, in configuration order, and installs one
    /// binding per node whose name is legal and fully qualified.
    ///
    /// A node with an illegal name is skipped but its children are still
    /// visited, with the illegal name as their parent.
    pub fn register(&self) -> Registration {
        let mut registration = Registration::default();
        self.register_nodes(&self.roots, "", &mut registration);
        registration
    }

    fn register_nodes(&self, nodes: &[ZoneNode], parent: &str, registration: &mut Registration) {
        for node in nodes {
            let fqdn = dns_name::join(&node.name, parent);
            registration.candidates.push(fqdn.clone());

            if dns_name::is_domain_name(&fqdn).is_none() {
                registration.skipped.push(fqdn.clone());
            } else if dns_name::is_fqdn(&fqdn) {
                let entry = ZoneEntry::new(fqdn.clone(), node, self.default_ttl);
                if registration.bindings.insert(entry) {
                    registration.overwritten.push(fqdn.clone());
                }
            }

            self.register_nodes(&node.children, &fqdn, registration);
        }
    }
}
