//! Client key derivation for rate limiting.
//!
//! The key is the client's IP as seen through proxy headers. The lookup is a
//! closure over header name so the library works with any HTTP framework's
//! header map (or a plain `HashMap` in tests).

/// Key used when no forwarding header identifies the client.
pub const FALLBACK_CLIENT_KEY: &str = "127.0.0.1";

/// Derive the rate-limit key from request headers.
///
/// Takes the first comma-separated entry of `x-forwarded-for` (trimmed) if
/// present and non-empty, else `x-real-ip`, else the loopback fallback.
pub fn client_key<'a, F>(mut header: F) -> String
where
    F: FnMut(&str) -> Option<&'a str>,
{
    if let Some(forwarded) = header("x-forwarded-for") {
        let ip = forwarded.split(',').next().unwrap_or("").trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = header("x-real-ip") {
        let ip = real_ip.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    FALLBACK_CLIENT_KEY.to_string()
}
