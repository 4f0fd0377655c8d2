//! Most-recently-used list of document paths

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maximum number of paths kept in the list
pub const MAX_RECENT: usize = 10;

/// Bounded list of recently opened or saved documents, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFiles(Vec<PathBuf>);

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `path` to the front, dropping the oldest entry past the limit
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.0.retain(|p| p != &path);
        self.0.insert(0, path);
        self.0.truncate(MAX_RECENT);
    }

    /// All entries, most recent first
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter()
    }

    /// Entries whose file still exists on disk
    pub fn existing(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter().filter(|p| p.is_file())
    }

    #[cfg(test)]
    pub fn first(&self) -> Option<&PathBuf> {
        self.0.first()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop entries beyond the limit (hand-edited settings files)
    pub fn enforce_limit(&mut self) {
        let mut seen = Vec::with_capacity(self.0.len());
        self.0.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(p.clone());
                true
            }
        });
        self.0.truncate(MAX_RECENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_moves_to_front() {
        let mut recent = RecentFiles::new();
        recent.push("a.txt");
        recent.push("b.txt");
        recent.push("a.txt");

        let paths: Vec<_> = recent.iter().cloned().collect();
        assert_eq!(paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let mut recent = RecentFiles::new();
        for i in 0..25 {
            recent.push(format!("note-{i}.tm"));
            assert!(recent.len() <= MAX_RECENT);
        }
        assert_eq!(recent.len(), MAX_RECENT);
        assert_eq!(recent.first(), Some(&PathBuf::from("note-24.tm")));
        // Oldest survivors are the last ten pushed
        assert_eq!(recent.iter().last(), Some(&PathBuf::from("note-15.tm")));
    }

    #[test]
    fn test_existing_filters_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, "hi").unwrap();

        let mut recent = RecentFiles::new();
        recent.push(dir.path().join("gone.txt"));
        recent.push(&present);

        let existing: Vec<_> = recent.existing().collect();
        assert_eq!(existing, vec![&present]);
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_enforce_limit_dedups_and_truncates() {
        let mut paths: Vec<PathBuf> = (0..12).map(|i| PathBuf::from(format!("{i}"))).collect();
        paths.insert(1, PathBuf::from("0"));
        let json = serde_json::to_string(&paths).unwrap();
        let mut recent: RecentFiles = serde_json::from_str(&json).unwrap();

        recent.enforce_limit();
        assert_eq!(recent.len(), MAX_RECENT);
        assert_eq!(recent.iter().filter(|p| *p == &PathBuf::from("0")).count(), 1);
    }
}
