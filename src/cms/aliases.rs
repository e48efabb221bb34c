//! Human-friendly aliases for CMS enum-like identifiers.
//!
//! The tables are fixed: canonical forms map to themselves, unknown values
//! pass through untouched and get validated upstream.

/// Resolve a marker kind ("pre", "mid", "post" or the canonical forms).
pub fn resolve_marker_kind(kind: &str) -> String {
    match kind {
        "pre" | "preroll" => "preroll".to_string(),
        "mid" | "midroll" => "midroll".to_string(),
        "post" | "postroll" => "postroll".to_string(),
        other => other.to_string(),
    }
}

/// Resolve an image purpose ("cover", "thumb", "banner" or the canonical
/// forms).
pub fn resolve_image_purpose(purpose: &str) -> String {
    match purpose {
        "cover" | "cover_art" => "cover_art".to_string(),
        "thumb" | "thumbnail" => "thumbnail".to_string(),
        "banner" | "banner_art" => "banner_art".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_and_canonical_marker_kinds_match() {
        assert_eq!(resolve_marker_kind("pre"), "preroll");
        assert_eq!(resolve_marker_kind("preroll"), "preroll");
        assert_eq!(resolve_marker_kind("mid"), "midroll");
        assert_eq!(resolve_marker_kind("midroll"), "midroll");
        assert_eq!(resolve_marker_kind("post"), "postroll");
        assert_eq!(resolve_marker_kind("postroll"), "postroll");
    }

    #[test]
    fn alias_and_canonical_image_purposes_match() {
        assert_eq!(resolve_image_purpose("cover"), "cover_art");
        assert_eq!(resolve_image_purpose("cover_art"), "cover_art");
        assert_eq!(resolve_image_purpose("thumb"), "thumbnail");
        assert_eq!(resolve_image_purpose("banner"), "banner_art");
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(resolve_marker_kind("chapter"), "chapter");
        assert_eq!(resolve_image_purpose("og_card"), "og_card");
    }
}
