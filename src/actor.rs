//! Actor identity for lock ownership.

/// Default actor string for this process: `user@HOST:pid`.
///
/// The pid keeps two processes of the same user on the same host from
/// sharing, and therefore re-entering, each other's locks.
pub fn default_actor() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}:{}", user, host, std::process::id())
}
