//! Common types for EOL data

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel EOL marker for "no EOL recorded"
pub const EOL_NONE: &str = "false";

/// Sentinel version for an unresolved newest release
pub const UNKNOWN_VERSION: &str = "unknown";

/// End-of-life marker of a release cycle.
///
/// Upstream sends either a date string or a boolean. Both are folded into
/// one string: dates pass through, `false` becomes `"false"` and `true`
/// becomes `"true"`. A `null` marker is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EolMarker(String);

impl EolMarker {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EolMarker {
    fn default() -> Self {
        Self(EOL_NONE.to_string())
    }
}

impl fmt::Display for EolMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw upstream shape, tried in declaration order
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEol {
    Date(String),
    Flag(bool),
    Null,
}

impl<'de> Deserialize<'de> for EolMarker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let marker = match RawEol::deserialize(deserializer)
            .map_err(|_| serde::de::Error::custom("invalid EOL value"))?
        {
            RawEol::Date(date) => date,
            RawEol::Flag(flag) => flag.to_string(),
            RawEol::Null => String::new(),
        };
        Ok(Self(marker))
    }
}

/// Decode a string field where upstream may send `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One upstream release-cycle snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndOfLifeEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cycle: String,
    #[serde(default)]
    pub eol: EolMarker,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub latest: String,
    #[serde(
        default,
        rename = "latestReleaseDate",
        deserialize_with = "null_as_empty"
    )]
    pub latest_release_date: String,
}

/// Shared cache document: package name -> release cycles as returned upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EolCacheDocument {
    pub package: IndexMap<String, Vec<EndOfLifeEntry>>,
}

impl EolCacheDocument {
    pub fn cycles(&self, package_name: &str) -> Option<&[EndOfLifeEntry]> {
        self.package.get(package_name).map(Vec::as_slice)
    }
}

/// Latest upstream release and EOL marker resolved for a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    /// Raw latest release version, not normalized
    pub latest_version: String,
    pub eol: EolMarker,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#""2024-01-01""#, "2024-01-01")]
    #[case("false", "false")]
    #[case("true", "true")]
    #[case(r#""""#, "")]
    #[case("null", "")]
    fn eol_marker_decodes_string_or_bool(#[case] json: &str, #[case] expected: &str) {
        let marker: EolMarker = serde_json::from_str(json).unwrap();
        assert_eq!(marker.as_str(), expected);
    }

    #[rstest]
    #[case("12")]
    #[case("{}")]
    fn eol_marker_rejects_other_shapes(#[case] json: &str) {
        let err = serde_json::from_str::<EolMarker>(json).unwrap_err();
        assert!(err.to_string().contains("invalid EOL value"));
    }

    #[test]
    fn end_of_life_entry_decodes_upstream_payload() {
        let entries: Vec<EndOfLifeEntry> = serde_json::from_str(
            r#"[
                {"cycle": "7.2", "releaseDate": "2023-08-15", "eol": false, "latest": "7.2.4", "latestReleaseDate": "2024-01-09", "lts": false},
                {"cycle": "6.2", "eol": "2024-01-01", "latest": "6.2.14", "latestReleaseDate": "2023-10-18"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![
                EndOfLifeEntry {
                    cycle: "7.2".to_string(),
                    eol: EolMarker::new("false"),
                    latest: "7.2.4".to_string(),
                    latest_release_date: "2024-01-09".to_string(),
                },
                EndOfLifeEntry {
                    cycle: "6.2".to_string(),
                    eol: EolMarker::new("2024-01-01"),
                    latest: "6.2.14".to_string(),
                    latest_release_date: "2023-10-18".to_string(),
                },
            ]
        );
    }

    #[test]
    fn end_of_life_entry_treats_null_fields_as_empty() {
        let entries: Vec<EndOfLifeEntry> = serde_json::from_str(
            r#"[{"cycle": "7.2", "eol": null, "latest": null, "latestReleaseDate": null}]"#,
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![EndOfLifeEntry {
                cycle: "7.2".to_string(),
                eol: EolMarker::new(""),
                latest: String::new(),
                latest_release_date: String::new(),
            }]
        );
    }

    #[test]
    fn cache_document_serializes_markers_as_strings() {
        let mut document = EolCacheDocument::default();
        document.package.insert(
            "redis".to_string(),
            vec![EndOfLifeEntry {
                cycle: "7.2".to_string(),
                eol: EolMarker::default(),
                latest: "7.2.4".to_string(),
                latest_release_date: String::new(),
            }],
        );

        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["package"]["redis"][0]["eol"], "false");
        assert_eq!(json["package"]["redis"][0]["latestReleaseDate"], "");
    }

    #[test]
    fn cache_document_without_package_key_is_rejected() {
        assert!(serde_json::from_str::<EolCacheDocument>(r#"{"other": {}}"#).is_err());
    }
}
