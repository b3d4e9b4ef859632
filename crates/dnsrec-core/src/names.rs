//! Relative/absolute DNS name helpers
//!
//! Zone names are handled without a trailing dot. Record names given by
//! callers may be relative to the zone (`"www"`, `"@"`) or absolute
//! (`"www.example.com"`, `"www.example.com."`).

/// Normalize a zone name by stripping a single trailing dot
///
/// ```
/// use dnsrec_core::names::normalize_zone;
///
/// assert_eq!(normalize_zone("example.com."), "example.com");
/// assert_eq!(normalize_zone("example.com"), "example.com");
/// ```
pub fn normalize_zone(zone: &str) -> &str {
    zone.strip_suffix('.').unwrap_or(zone)
}

/// Compute the absolute (zone-qualified) form of a record name
///
/// - `""` and `"@"` name the zone apex
/// - a trailing dot marks a name as already absolute
/// - a name equal to the zone, or ending in `.<zone>`, is already absolute
/// - anything else is relative and gets the zone appended
///
/// The result never carries a trailing dot.
///
/// ```
/// use dnsrec_core::names::absolute_name;
///
/// assert_eq!(absolute_name("www", "example.com"), "www.example.com");
/// assert_eq!(absolute_name("@", "example.com."), "example.com");
/// assert_eq!(absolute_name("www.example.com.", "example.com"), "www.example.com");
/// ```
pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = normalize_zone(zone);

    if name.is_empty() || name == "@" {
        return zone.to_string();
    }
    if let Some(fqdn) = name.strip_suffix('.') {
        return fqdn.to_string();
    }
    if is_within_zone(name, zone) {
        return name.to_string();
    }
    if zone.is_empty() {
        return name.to_string();
    }

    format!("{name}.{zone}")
}

/// Compute the zone-relative form of an absolute record name
///
/// The apex becomes `"@"`. Names outside the zone are returned unchanged
/// (without a trailing dot).
///
/// ```
/// use dnsrec_core::names::relative_name;
///
/// assert_eq!(relative_name("_acme-challenge.home.example.com", "example.com"), "_acme-challenge.home");
/// assert_eq!(relative_name("example.com", "example.com."), "@");
/// ```
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    let zone = normalize_zone(zone);
    let fqdn = normalize_zone(fqdn);

    if fqdn == zone {
        return "@".to_string();
    }

    fqdn.strip_suffix(zone)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(fqdn)
        .to_string()
}

fn is_within_zone(name: &str, zone: &str) -> bool {
    if zone.is_empty() {
        return false;
    }
    name == zone
        || name
            .strip_suffix(zone)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
