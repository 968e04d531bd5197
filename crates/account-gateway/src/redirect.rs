//! Tokens handed back in the navigation fragment after email confirmation.

use secrecy::SecretString;
use url::form_urlencoded;

/// Marker that tells a token-bearing fragment apart from any other.
pub const ACCESS_TOKEN_MARKER: &str = "access_token";

/// Access and refresh tokens extracted from a redirect fragment.
#[derive(Debug)]
pub struct RedirectTokens {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

/// Result of looking at a navigation fragment.
#[derive(Debug)]
pub enum FragmentTokens {
    /// The fragment carries no token marker.
    Absent,
    /// The marker is there but a token is missing or empty.
    Incomplete(&'static str),
    Present(RedirectTokens),
}

/// True if the fragment mentions an access token at all.
pub fn has_token_marker(fragment: &str) -> bool {
    fragment.contains(ACCESS_TOKEN_MARKER)
}

/// Parse `#access_token=...&refresh_token=...` style fragments.
///
/// The fragment is decoded as `application/x-www-form-urlencoded`, with the
/// leading `#` optional.
pub fn parse_fragment(fragment: &str) -> FragmentTokens {
    if !has_token_marker(fragment) {
        return FragmentTokens::Absent;
    }

    let query = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut access = None;
    let mut refresh = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "access_token" if access.is_none() => access = Some(value.into_owned()),
            "refresh_token" if refresh.is_none() => refresh = Some(value.into_owned()),
            _ => {}
        }
    }

    match (
        access.filter(|t| !t.is_empty()),
        refresh.filter(|t| !t.is_empty()),
    ) {
        (Some(access), Some(refresh)) => FragmentTokens::Present(RedirectTokens {
            access_token: SecretString::new(access),
            refresh_token: SecretString::new(refresh),
        }),
        (None, _) => FragmentTokens::Incomplete("access token missing from redirect"),
        (Some(_), None) => FragmentTokens::Incomplete("refresh token missing from redirect"),
    }
}
