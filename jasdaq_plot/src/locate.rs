use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// A file name pattern where `*` matches any run of characters (possibly
/// empty) and `?` matches exactly one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pattern: Vec<char>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.chars().collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<_> = name.chars().collect();
        let (mut p, mut n) = (0, 0);
        // position of the last `*` seen and the name index it was tried at
        let mut backtrack: Option<(usize, usize)> = None;

        while n < name.len() {
            match self.pattern.get(p) {
                Some('*') => {
                    backtrack = Some((p, n));
                    p += 1;
                }
                Some(&c) if c == '?' || c == name[n] => {
                    p += 1;
                    n += 1;
                }
                _ => match backtrack {
                    // let the last `*` swallow one more character
                    Some((star, at)) => {
                        p = star + 1;
                        n = at + 1;
                        backtrack = Some((star, at + 1));
                    }
                    None => return false,
                },
            }
        }

        // only trailing `*` may remain
        self.pattern[p..].iter().all(|&c| c == '*')
    }
}

/// Finds files in a single directory.
pub struct Locator {
    dir: PathBuf,
}

impl Locator {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns all regular files in the directory whose name matches
    /// `pattern`, along with their modification time.
    pub fn matching(
        &self,
        pattern: &Pattern,
    ) -> Result<Vec<(PathBuf, SystemTime)>, Report> {
        let read_dir = std::fs::read_dir(&self.dir).wrap_err_with(|| {
            format!("read reports directory {}", self.dir.display())
        })?;

        let mut matches = Vec::new();
        for entry in read_dir {
            let entry = entry.wrap_err("incorrect directory entry")?;
            let name = entry.file_name();
            // skip names that aren't valid utf8; no pattern could match them
            let name = match name.to_str() {
                Some(name) => name,
                None => continue,
            };
            if !pattern.matches(name) {
                continue;
            }

            let metadata = entry.metadata().wrap_err_with(|| {
                format!("read metadata of {}", entry.path().display())
            })?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().wrap_err_with(|| {
                format!("read modification time of {}", entry.path().display())
            })?;
            matches.push((entry.path(), modified));
        }
        Ok(matches)
    }

    /// Returns the most recently modified file matching `pattern`, or `None`
    /// if there's no such file.
    ///
    /// Files with the same modification time are ordered by name: the
    /// smallest name wins, so the result never depends on the order in which
    /// the directory is listed.
    pub fn latest(&self, pattern: &Pattern) -> Result<Option<PathBuf>, Report> {
        let matches = self.matching(pattern)?;
        debug!(
            "[locate] {} file(s) matching {:?} in {}",
            matches.len(),
            pattern,
            self.dir.display()
        );
        let latest = matches
            .into_iter()
            .max_by(|(a, a_modified), (b, b_modified)| {
                a_modified
                    .cmp(b_modified)
                    .then_with(|| file_name(b).cmp(&file_name(a)))
            })
            .map(|(path, _)| path);
        Ok(latest)
    }
}

fn file_name(path: &Path) -> OsString {
    path.file_name().map(OsString::from).unwrap_or_default()
}
