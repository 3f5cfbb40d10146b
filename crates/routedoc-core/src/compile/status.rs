use http::StatusCode;

/// Description used for a response that does not declare one.
pub fn default_description(code: &str) -> String {
    if code == "default" {
        return "Default response".to_string();
    }
    code.parse::<u16>()
        .ok()
        .and_then(|n| StatusCode::from_u16(n).ok())
        .and_then(|status| status.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}
