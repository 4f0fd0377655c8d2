//! Release check against the published version file

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::config::{DOWNLOAD_URL, VERSION_URL};

/// Contents of the published version file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateInfo {
    #[serde(alias = "Version")]
    pub version: String,
    #[serde(default, alias = "Notes")]
    pub notes: String,
    #[serde(default, alias = "Url")]
    pub url: String,
}

impl UpdateInfo {
    /// Page to open for this release
    pub fn download_url(&self) -> &str {
        if self.url.is_empty() {
            DOWNLOAD_URL
        } else {
            &self.url
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("version needs 2 to 4 components: {0:?}")]
    ComponentCount(String),
    #[error("invalid version component in {0:?}")]
    BadComponent(String),
}

/// Dotted numeric version, `major.minor[.build[.revision]]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version([u32; 4]);

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);
        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(VersionParseError::ComponentCount(s.to_string()));
        }

        let mut components = [0u32; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionParseError::BadComponent(s.to_string()))?;
        }
        Ok(Self(components))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}")?;
        if d != 0 {
            write!(f, ".{d}")?;
        }
        Ok(())
    }
}

/// `info` if it describes a release newer than `current`
pub fn newer_release(info: UpdateInfo, current: &str) -> Option<UpdateInfo> {
    let remote: Version = info.version.parse().ok()?;
    let local: Version = current.parse().ok()?;
    (remote > local).then_some(info)
}

async fn fetch_update_info(client: &reqwest::Client) -> Result<UpdateInfo> {
    let info = client
        .get(VERSION_URL)
        .send()
        .await
        .context("Failed to reach version server")?
        .error_for_status()?
        .json::<UpdateInfo>()
        .await
        .context("Failed to parse version file")?;
    Ok(info)
}

/// Check for a newer release; any failure is logged and reads as "none"
pub async fn check_for_update(client: &reqwest::Client, current: &str) -> Option<UpdateInfo> {
    match fetch_update_info(client).await {
        Ok(info) => {
            let newer = newer_release(info, current);
            if let Some(ref info) = newer {
                tracing::info!("Update available: {}", info.version);
            }
            newer
        }
        Err(e) => {
            tracing::debug!("Update check failed: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(version: &str) -> UpdateInfo {
        UpdateInfo {
            version: version.to_string(),
            notes: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn test_version_ordering() {
        let v = |s: &str| s.parse::<Version>().unwrap();
        assert!(v("1.2") > v("1.1.9"));
        assert!(v("1.10.0") > v("1.9.0"));
        assert_eq!(v("1.1"), v("1.1.0.0"));
        assert_eq!(v("v2.0.1").to_string(), "2.0.1");
    }

    #[test]
    fn test_version_parse_errors() {
        assert!(matches!("1".parse::<Version>(), Err(VersionParseError::ComponentCount(_))));
        assert!(matches!("1.2.3.4.5".parse::<Version>(), Err(VersionParseError::ComponentCount(_))));
        assert!(matches!("1.x".parse::<Version>(), Err(VersionParseError::BadComponent(_))));
    }

    #[test]
    fn test_newer_release() {
        assert!(newer_release(info("1.2.0"), "1.1.1").is_some());
        assert!(newer_release(info("1.1.1"), "1.1.1").is_none());
        assert!(newer_release(info("1.0.0"), "1.1.1").is_none());
        assert!(newer_release(info("garbage"), "1.1.1").is_none());
    }

    #[test]
    fn test_update_info_keys_any_case() {
        let lower: UpdateInfo =
            serde_json::from_str(r#"{"version":"2.0.0","notes":"n","url":"https://x"}"#).unwrap();
        let pascal: UpdateInfo =
            serde_json::from_str(r#"{"Version":"2.0.0","Notes":"n","Url":"https://x"}"#).unwrap();
        assert_eq!(lower, pascal);
        assert_eq!(info("2.0.0").download_url(), DOWNLOAD_URL);
    }
}
