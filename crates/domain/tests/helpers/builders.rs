#![allow(dead_code)]
use fdns_domain::config::{AddressData, MailExchangeData, TargetData, TextData};
use fdns_domain::ZoneNode;
use std::net::IpAddr;

pub struct ZoneNodeBuilder {
    node: ZoneNode,
}

impl ZoneNodeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            node: ZoneNode::new(name),
        }
    }

    pub fn a(mut self, ip: &str, ttl: u32) -> Self {
        self.node.address = Some(AddressData {
            ip: ip.parse::<IpAddr>().unwrap(),
            ttl: Some(ttl),
        });
        self
    }

    pub fn a_default_ttl(mut self, ip: &str) -> Self {
        self.node.address = Some(AddressData {
            ip: ip.parse::<IpAddr>().unwrap(),
            ttl: None,
        });
        self
    }

    pub fn mx(mut self, content: &str, priority: u16, ttl: u32) -> Self {
        self.node.mail_exchange = Some(MailExchangeData {
            content: content.to_string(),
            priority,
            ttl: Some(ttl),
        });
        self
    }

    pub fn txt(mut self, content: &str, ttl: u32) -> Self {
        self.node.txt = Some(TextData {
            content: content.to_string(),
            ttl: Some(ttl),
        });
        self
    }

    pub fn cname(mut self, content: &str, ttl: u32) -> Self {
        self.node.cname = Some(TargetData {
            content: content.to_string(),
            ttl: Some(ttl),
        });
        self
    }

    pub fn ns(mut self, content: &str, ttl: u32) -> Self {
        self.node.ns = Some(TargetData {
            content: content.to_string(),
            ttl: Some(ttl),
        });
        self
    }

    pub fn child(mut self, child: ZoneNodeBuilder) -> Self {
        self.node.children.push(child.build());
        self
    }

    pub fn build(self) -> ZoneNode {
        self.node
    }
}

/// Single-rooted tree where every node above `depth` has `branching`
/// children named `n0`, `n1`, ...
pub fn uniform_tree(depth: u32, branching: usize) -> ZoneNode {
    fn grow(node: &mut ZoneNode, depth: u32, branching: usize) {
        if depth == 0 {
            return;
        }
        for i in 0..branching {
            let mut child = ZoneNode::new(format!("n{}", i));
            grow(&mut child, depth - 1, branching);
            node.children.push(child);
        }
    }

    let mut root = ZoneNode::new("root");
    grow(&mut root, depth, branching);
    root
}
