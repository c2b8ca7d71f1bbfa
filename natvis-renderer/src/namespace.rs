//! Versioned C++ namespace derived from a fkYAML release number.

use std::fmt;

use serde::Serialize;

/// Scope every fkYAML declaration lives under.
pub const SCOPE_PREFIX: &str = "fkyaml::";

/// Tag prepended to the underscored version, e.g. `v0_3_1`.
pub const VERSION_TAG: &str = "v";

/// Fully-qualified inline namespace for one library version,
/// e.g. `fkyaml::v0_3_1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Build the namespace for `version`.
    ///
    /// Every `.` becomes `_`; nothing else is checked, so `abc` maps to
    /// `fkyaml::vabc`.
    pub fn from_version(version: &str) -> Self {
        if !looks_like_release(version) {
            tracing::warn!(version, "version is not of the form <major>.<minor>.<patch>");
        }
        Namespace(format!(
            "{SCOPE_PREFIX}{VERSION_TAG}{}",
            version.replace('.', "_")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `true` for `<digits>.<digits>.<digits>`.
pub fn looks_like_release(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.3.1", "fkyaml::v0_3_1")]
    #[case("1.0.0", "fkyaml::v1_0_0")]
    #[case("2.0.0", "fkyaml::v2_0_0")]
    #[case("10.20.30", "fkyaml::v10_20_30")]
    fn release_versions_map_to_underscored_namespace(#[case] version: &str, #[case] expected: &str) {
        assert_eq!(Namespace::from_version(version).as_str(), expected);
    }

    #[rstest]
    #[case("abc", "fkyaml::vabc")]
    #[case("", "fkyaml::v")]
    #[case("1.2", "fkyaml::v1_2")]
    #[case("1..2", "fkyaml::v1__2")]
    #[case("0.3.1-rc.1", "fkyaml::v0_3_1-rc_1")]
    fn arbitrary_strings_are_accepted(#[case] version: &str, #[case] expected: &str) {
        assert_eq!(Namespace::from_version(version).as_str(), expected);
    }

    #[test]
    fn display_matches_as_str() {
        let ns = Namespace::from_version("0.3.1");
        assert_eq!(ns.to_string(), ns.as_str());
    }

    #[rstest]
    #[case("0.3.1", true)]
    #[case("12.0.7", true)]
    #[case("1.2", false)]
    #[case("1.2.3.4", false)]
    #[case("1.x.3", false)]
    #[case("1..3", false)]
    #[case("", false)]
    fn release_shape_detection(#[case] version: &str, #[case] expected: bool) {
        assert_eq!(looks_like_release(version), expected);
    }
}
