//! Release-name formatting.
//!
//! A release name is a numeric core of two or three dot-separated
//! components, optionally followed by a pre-release tag such as `alpha25`
//! or `rc1`: `0.8`, `0.8.0`, `0.8alpha25`, `0.8.1rc1`.
//!
//! Only detection and removal of pre-release tags is supported; tags are
//! never compared.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{CoreError, CoreResult};

/// Kind of pre-release tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreReleaseTag {
    /// `rc<N>`
    Rc,
    /// `c<N>`
    C,
    /// `beta<N>`
    Beta,
    /// `b<N>`
    B,
    /// `alpha<N>`
    Alpha,
    /// `a<N>`
    A,
}

impl PreReleaseTag {
    /// Order in which tags are searched for.
    ///
    /// `b` and `a` come after `beta` and `alpha`: `beta1` must be reported
    /// at the `b` of `beta`, not at its `a1`.
    pub const SEARCH_ORDER: [Self; 6] = [
        Self::Rc,
        Self::C,
        Self::Beta,
        Self::B,
        Self::Alpha,
        Self::A,
    ];

    /// Returns the literal tag text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rc => "rc",
            Self::C => "c",
            Self::Beta => "beta",
            Self::B => "b",
            Self::Alpha => "alpha",
            Self::A => "a",
        }
    }
}

impl fmt::Display for PreReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static TAG_PATTERNS: LazyLock<Vec<(PreReleaseTag, Regex)>> = LazyLock::new(|| {
    PreReleaseTag::SEARCH_ORDER
        .iter()
        .map(|&tag| {
            let pattern = format!(r"{}\d+", tag.as_str());
            (tag, Regex::new(&pattern).expect("invalid regex"))
        })
        .collect()
});

/// Removes a trailing `.0`: `1.0` becomes `1`, `1.10` is untouched.
pub fn short(name: &str) -> &str {
    name.strip_suffix(".0").unwrap_or(name)
}

/// Finds the pre-release tag of `name` and the byte index where it starts.
///
/// Tags are tried in [`PreReleaseTag::SEARCH_ORDER`]; the first kind with a
/// `<tag><digits>` match anywhere in the name wins.
pub fn pretag(name: &str) -> Option<(PreReleaseTag, usize)> {
    TAG_PATTERNS
        .iter()
        .find_map(|(tag, re)| re.find(name).map(|m| (*tag, m.start())))
}

/// Returns the byte index where the pre-release tag of `name` starts.
pub fn pretag_pos(name: &str) -> Option<usize> {
    pretag(name).map(|(_, pos)| pos)
}

/// Removes any pre-release tag: `0.8.1rc1` becomes `0.8.1`.
pub fn strip_pretags(name: &str) -> &str {
    match pretag_pos(name) {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Tests whether `name` carries a pre-release tag.
pub fn is_prerelease(name: &str) -> bool {
    pretag_pos(name).is_some()
}

/// Normalizes a release name to three numeric components.
///
/// `0.8` becomes `0.8.0` and `0.8rc1` becomes `0.8.0rc1`. Names with two or
/// more dots are returned unchanged.
///
/// # Errors
///
/// Returns [`CoreError::InvalidVersionFormat`] if `name` contains no dot.
pub fn long_release_name(name: &str) -> CoreResult<String> {
    let dots = name.matches('.').count();
    if dots >= 2 {
        return Ok(name.to_string());
    }
    if dots == 0 {
        return Err(CoreError::InvalidVersionFormat {
            name: name.to_string(),
            dots,
        });
    }

    Ok(match pretag_pos(name) {
        Some(pos) => format!("{}.0{}", &name[..pos], &name[pos..]),
        None => format!("{name}.0"),
    })
}

/// Returns the change-notes file name for a release.
///
/// Pre-release iterations and the final release share one file:
/// `0.8`, `0.8.0` and `0.8.0rc1` all map to `version_0_8.rst.inc`.
pub fn notes_file_name(name: &str) -> String {
    let version = short(strip_pretags(name)).replace('.', "_");
    format!("version_{version}.rst.inc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short() {
        assert_eq!(short("0.8.0"), "0.8");
        assert_eq!(short("1.0"), "1");
        assert_eq!(short("1.10"), "1.10");
        assert_eq!(short("0.8.1"), "0.8.1");
        assert_eq!(short("0.8.0rc1"), "0.8.0rc1");
    }

    #[test]
    fn test_pretag_pos() {
        assert_eq!(pretag_pos("0.8"), None);
        assert_eq!(pretag_pos("0.8alpha25"), Some(3));
        assert_eq!(pretag_pos("0.8.1rc1"), Some(5));
        assert_eq!(pretag_pos("0.8c2"), Some(3));
        assert_eq!(pretag_pos("0.8a1"), Some(3));
        assert_eq!(pretag_pos("0.8b3"), Some(3));
    }

    #[test]
    fn test_pretag_requires_digits() {
        assert_eq!(pretag_pos("0.8beta"), None);
        assert_eq!(pretag_pos("0.8-dev"), None);
    }

    #[test]
    fn test_beta_wins_over_single_letters() {
        assert_eq!(pretag("0.8beta1"), Some((PreReleaseTag::Beta, 3)));
        assert_eq!(pretag("0.8alpha2"), Some((PreReleaseTag::Alpha, 3)));
        assert_eq!(pretag("1.2.3rc10"), Some((PreReleaseTag::Rc, 5)));
    }

    #[test]
    fn test_strip_pretags() {
        assert_eq!(strip_pretags("0.8"), "0.8");
        assert_eq!(strip_pretags("0.8alpha25"), "0.8");
        assert_eq!(strip_pretags("0.8.1rc1"), "0.8.1");
    }

    #[test]
    fn test_strip_pretags_is_identity_without_tag() {
        for name in ["0.8", "0.8.0", "1.10.2", "2.0-dev"] {
            assert!(pretag_pos(name).is_none());
            assert_eq!(strip_pretags(name), name);
        }
    }

    #[test]
    fn test_is_prerelease() {
        for name in ["0.8", "0.8alpha25", "0.8.1rc1", "0.8beta", "1.0b2"] {
            assert_eq!(is_prerelease(name), pretag_pos(name).is_some(), "{name}");
        }
        assert!(!is_prerelease("0.8"));
        assert!(is_prerelease("0.8alpha25"));
        assert!(is_prerelease("0.8.1rc1"));
    }

    #[test]
    fn test_long_release_name() {
        assert_eq!(long_release_name("0.8").unwrap(), "0.8.0");
        assert_eq!(long_release_name("0.8.0").unwrap(), "0.8.0");
        assert_eq!(long_release_name("0.8rc1").unwrap(), "0.8.0rc1");
        assert_eq!(long_release_name("0.8.0rc1").unwrap(), "0.8.0rc1");
        assert_eq!(long_release_name("0.8alpha25").unwrap(), "0.8.0alpha25");
    }

    #[test]
    fn test_long_release_name_keeps_extra_dots() {
        assert_eq!(long_release_name("1.2.3.4").unwrap(), "1.2.3.4");
    }

    #[test]
    fn test_long_release_name_requires_a_dot() {
        let err = long_release_name("8").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidVersionFormat { ref name, dots: 0 } if name == "8"
        ));
    }

    #[test]
    fn test_notes_file_name() {
        assert_eq!(notes_file_name("0.8.0"), "version_0_8.rst.inc");
        assert_eq!(notes_file_name("0.8"), "version_0_8.rst.inc");
        assert_eq!(notes_file_name("0.8.1rc1"), "version_0_8_1.rst.inc");
        assert_eq!(notes_file_name("0.8.0beta2"), "version_0_8.rst.inc");
        assert_eq!(notes_file_name("1.2"), "version_1_2.rst.inc");
    }

    #[test]
    fn test_tag_display() {
        let rendered: Vec<String> = PreReleaseTag::SEARCH_ORDER
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["rc", "c", "beta", "b", "alpha", "a"]);
    }
}
