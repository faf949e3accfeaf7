//! Directory snapshots.
//!
//! A snapshot is the name-sorted list of plain files directly inside a directory, taken
//! once at the start of a pass. It is not refreshed while the pass runs.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::XorSweepError;

/// Matcher for the filename mask, interpreted as the glob `*<mask>`.
#[derive(Debug, Clone)]
pub struct SuffixMask {
    matcher: GlobMatcher,
}

impl SuffixMask {
    pub fn new(mask: &str) -> Result<Self, XorSweepError> {
        let pattern = format!("*{mask}");
        let glob = GlobBuilder::new(&pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| XorSweepError::invalid("filename_mask", format!("'{mask}': {e}")))?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// File names present in one directory, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    names: Vec<String>,
}

impl DirectorySnapshot {
    /// List every file directly inside `dir` (hidden ones included).
    pub fn files_in(dir: &Path) -> Result<Self, XorSweepError> {
        Self::collect(dir, |_| true)
    }

    /// List visible files directly inside `dir` whose names match `mask`.
    pub fn matching(dir: &Path, mask: &SuffixMask) -> Result<Self, XorSweepError> {
        Self::collect(dir, |name| !name.starts_with('.') && mask.matches(name))
    }

    fn collect(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Self, XorSweepError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => {
                    return Err(XorSweepError::configuration(
                        dir,
                        format!("cannot list directory: {e}"),
                    ));
                }
                Err(e) => {
                    // Dangling symlinks and entries removed mid-listing land here.
                    debug!(dir = %dir.display(), error = %e, "snapshot: skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "snapshot: skipping non-UTF-8 file name");
                continue;
            };
            if keep(name) {
                names.push(name.to_string());
            }
        }
        names.sort();
        trace!(dir = %dir.display(), count = names.len(), "snapshot taken");
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn mask_is_a_case_insensitive_suffix() {
        let mask = SuffixMask::new(".txt").unwrap();
        assert!(mask.matches("a.txt"));
        assert!(mask.matches("A.TXT"));
        assert!(mask.matches(".txt"));
        assert!(!mask.matches("a.txt.bak"));
    }

    #[test]
    fn mask_keeps_glob_meaning() {
        let mask = SuffixMask::new("_?.bin").unwrap();
        assert!(mask.matches("part_1.bin"));
        assert!(!mask.matches("part_12.bin"));
    }

    #[test]
    fn invalid_glob_is_a_setting_error() {
        let err = SuffixMask::new("[").unwrap_err();
        assert!(matches!(err, XorSweepError::InvalidSetting { field: "filename_mask", .. }));
    }

    #[test]
    fn snapshot_lists_only_matching_visible_files_sorted() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("b.dat").write_str("b").unwrap();
        dir.child("a.dat").write_str("a").unwrap();
        dir.child("c.txt").write_str("c").unwrap();
        dir.child(".hidden.dat").write_str("h").unwrap();
        dir.child("sub.dat").create_dir_all().unwrap();
        dir.child("sub.dat/inner.dat").write_str("i").unwrap();

        let mask = SuffixMask::new(".dat").unwrap();
        let snap = DirectorySnapshot::matching(dir.path(), &mask).unwrap();
        assert_eq!(snap.names(), ["a.dat", "b.dat"]);

        let all = DirectorySnapshot::files_in(dir.path()).unwrap();
        assert_eq!(all.names(), [".hidden.dat", "a.dat", "b.dat", "c.txt"]);
    }

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = DirectorySnapshot::files_in(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, XorSweepError::Configuration { .. }));
    }
}
