//! Avatar URL derivation for the Discord CDN

/// Discord CDN base URL
const CDN_BASE: &str = "https://cdn.discordapp.com";

/// Hash prefix marking an animated avatar
const ANIMATED_PREFIX: &str = "a_";

/// Derive the CDN URL for a user avatar.
///
/// Returns `None` when the user has no avatar hash. Animated avatars
/// (hash prefixed with `a_`) get the `gif` extension, everything else `png`.
#[must_use]
pub fn avatar_url(user_id: &str, avatar_hash: Option<&str>, size: u16) -> Option<String> {
    let hash = avatar_hash.filter(|h| !h.is_empty())?;

    let ext = if hash.starts_with(ANIMATED_PREFIX) {
        "gif"
    } else {
        "png"
    };

    Some(format!("{CDN_BASE}/avatars/{user_id}/{hash}.{ext}?size={size}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hash_yields_none() {
        assert_eq!(avatar_url("123", None, 256), None);
        assert_eq!(avatar_url("123", Some(""), 256), None);
    }

    #[test]
    fn test_static_avatar_is_png() {
        assert_eq!(
            avatar_url("123", Some("abc123"), 256).as_deref(),
            Some("https://cdn.discordapp.com/avatars/123/abc123.png?size=256")
        );
    }

    #[test]
    fn test_animated_avatar_is_gif() {
        assert_eq!(
            avatar_url("123", Some("a_def456"), 128).as_deref(),
            Some("https://cdn.discordapp.com/avatars/123/a_def456.gif?size=128")
        );
    }
}
