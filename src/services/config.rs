//! Build-time service configuration

/// Version of this build, compared against the published release
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "ThinkMine";

/// Static JSON describing the latest release
pub const VERSION_URL: &str =
    "https://raw.githubusercontent.com/raiyaancreates/ThinkMine/main/version.json";

/// Fallback download page when the release JSON carries no URL
pub const DOWNLOAD_URL: &str = "https://github.com/raiyaancreates/ThinkMine/releases/latest";

// Analytics stays disabled while these are placeholders.
pub const GA_MEASUREMENT_ID: &str = "G-XXXXXXXXXX";
pub const GA_API_SECRET: &str = "XXXXXXXXXXXXXXXXXXXXXX";

/// GA4 measurement protocol collection endpoint
pub fn ga_endpoint() -> String {
    format!(
        "https://www.google-analytics.com/mp/collect?measurement_id={}&api_secret={}",
        GA_MEASUREMENT_ID, GA_API_SECRET
    )
}

/// Timeout applied to every outgoing request
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Platform name reported with the launch beacon
pub fn platform() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "macos" => "macOS",
        "linux" => "Linux",
        other => other,
    }
}
