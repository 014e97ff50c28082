//! Version string normalization

/// Reduce a raw package version to its "major.minor" form.
///
/// Anything up to and including the first `:` is a package-manager epoch
/// and is dropped. Versions with a single segment are returned unchanged.
///
/// Examples:
/// - "1:2.3.4" -> "2.3"
/// - "7.8" -> "7.8"
/// - "5" -> "5"
pub fn extract_major_minor(raw: &str) -> String {
    let version = raw.split_once(':').map_or(raw, |(_, rest)| rest);

    let mut segments = version.split('.');
    match (segments.next(), segments.next()) {
        (Some(major), Some(minor)) => format!("{}.{}", major, minor),
        (Some(major), None) => major.to_string(),
        (None, _) => String::new(),
    }
}
