//! Stored-file naming: generation, validation, and public URLs.

use gallery_types::{ImageExtension, ImageRole};

use crate::error::{StoreError, StoreResult};

/// Path prefix under which stored files are served.
pub const URL_PREFIX: &str = "/uploads/";

/// Fresh name for an uploaded file: `<uuid-v4>_<role>.<ext>`.
pub fn generate_filename(role: ImageRole, ext: ImageExtension) -> String {
    format!("{}_{}.{}", uuid::Uuid::new_v4(), role.as_str(), ext.as_str())
}

/// Public fetch path for a stored file. Pure, no I/O.
pub fn resolve_url(filename: &str) -> String {
    format!("{URL_PREFIX}{filename}")
}

/// Reject names that could resolve outside the content root.
///
/// A valid name is a single path component: non-empty, not `.` or `..`,
/// and free of `/`, `\`, `:` and NUL.
pub fn validate_filename(filename: &str) -> StoreResult<()> {
    let bad = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', ':', '\0']);
    if bad {
        return Err(StoreError::InvalidName(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_names_carry_role_and_extension() {
        let name = generate_filename(ImageRole::Scorecard, ImageExtension::Png);
        assert!(name.ends_with("_scorecard.png"));
        let (token, _) = name.split_once('_').unwrap();
        assert!(uuid::Uuid::parse_str(token).is_ok());

        let name = generate_filename(ImageRole::Comic, ImageExtension::Jpeg);
        assert!(name.ends_with("_comic.jpeg"));
    }

    #[test]
    fn generated_names_are_unique() {
        let a = generate_filename(ImageRole::Comic, ImageExtension::Gif);
        let b = generate_filename(ImageRole::Comic, ImageExtension::Gif);
        assert_ne!(a, b);
    }

    #[test]
    fn generated_names_validate() {
        let name = generate_filename(ImageRole::Comic, ImageExtension::Jpg);
        validate_filename(&name).unwrap();
    }

    #[test]
    fn url_resolution() {
        assert_eq!(resolve_url("x_comic.png"), "/uploads/x_comic.png");
    }

    #[test]
    fn traversal_names_rejected() {
        for name in [
            "", ".", "..", "../secret", "a/b", "/etc/passwd", "..\\win", "c:boot", "a\0b",
        ] {
            assert!(
                matches!(validate_filename(name), Err(StoreError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn dots_inside_a_name_are_fine() {
        validate_filename("a..b.png").unwrap();
        validate_filename(".hidden").unwrap();
    }

    proptest! {
        #[test]
        fn resolve_url_is_idempotent(name in "[a-zA-Z0-9_.-]{1,40}") {
            prop_assert_eq!(resolve_url(&name), resolve_url(&name));
            prop_assert!(resolve_url(&name).starts_with(URL_PREFIX));
        }

        #[test]
        fn names_with_separators_never_validate(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}", sep in prop::sample::select(vec!['/', '\\'])) {
            let name = format!("{prefix}{sep}{suffix}");
            prop_assert!(validate_filename(&name).is_err());
        }
    }
}
