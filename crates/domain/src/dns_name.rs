//! Domain name rules shared by the zone tree and the dispatcher.
//!
//! Names are handled in presentation format (`www.example.`). A name is
//! *fully qualified* when it ends with the root separator.

pub const ROOT: &str = ".";

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_WIRE_LEN: usize = 255;

/// Checks whether `name` is a syntactically legal domain name and returns
/// its label count.
///
/// Labels must be 1 to 63 bytes, no interior label may be empty and the
/// encoded wire length (length octets plus the root octet) must fit in 255
/// bytes. The root name `.` is legal and has zero labels.
pub fn is_domain_name(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    if name == ROOT {
        return Some(0);
    }

    let relative = name.strip_suffix('.').unwrap_or(name);
    let mut labels = 0;
    let mut wire_len = 1;

    for label in relative.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return None;
        }
        wire_len += label.len() + 1;
        labels += 1;
    }

    if wire_len > MAX_NAME_WIRE_LEN {
        return None;
    }
    Some(labels)
}

pub fn is_fqdn(name: &str) -> bool {
    name.ends_with('.')
}

/// Returns `name` terminated by the root separator.
pub fn fqdn(name: &str) -> String {
    if is_fqdn(name) {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Lower-cased, rooted form used as lookup key.
pub fn canonical(name: &str) -> String {
    fqdn(&name.to_ascii_lowercase())
}

/// Joins a label onto its parent. An empty or root parent means the label
/// sits at the top of the tree and is rooted directly.
pub fn join(label: &str, parent: &str) -> String {
    if parent.is_empty() || parent == ROOT {
        fqdn(label)
    } else {
        format!("{}.{}", label, parent)
    }
}

/// Iterates over `name` and each of its parent suffixes, ending with the
/// last label before the root (`a.b.` yields `a.b.`, `b.`).
pub fn suffixes(name: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(name);
    std::iter::from_fn(move || {
        let current = next?;
        next = match current.find('.') {
            Some(dot) if dot + 1 < current.len() => Some(&current[dot + 1..]),
            _ => None,
        };
        if current == ROOT {
            None
        } else {
            Some(current)
        }
    })
}
