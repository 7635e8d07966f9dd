use dotproxy_domain::DomainError;
use hickory_proto::rr::Name;

/// Converts a domain-layer name (no trailing dot, root as `""`) into a
/// fully qualified hickory name. Label case is kept as written.
pub fn to_hickory_name(name: &str) -> Result<Name, DomainError> {
    if name.is_empty() || name == "." {
        return Ok(Name::root());
    }

    let fqdn = if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    };

    Name::from_ascii(&fqdn)
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))
}

/// Renders a hickory name in presentation form without the root dot.
pub fn from_hickory_name(name: &Name) -> String {
    if name.is_root() {
        return String::new();
    }

    let ascii = name.to_ascii();
    match ascii.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => ascii,
    }
}
