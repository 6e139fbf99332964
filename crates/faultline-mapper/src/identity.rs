use std::sync::OnceLock;

/// Used when no host name can be determined
pub const UNKNOWN_SERVER_ID: &str = "unknown";

/// Stable identifier of this server
///
/// Resolved from the host name on first use and reused for the lifetime of
/// the process.
pub fn server_id() -> &'static str {
    static SERVER_ID: OnceLock<String> = OnceLock::new();
    SERVER_ID.get_or_init(resolve_server_id)
}

fn resolve_server_id() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .into_iter()
        .find_map(|var| std::env::var(var).ok())
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_SERVER_ID.to_owned())
}
