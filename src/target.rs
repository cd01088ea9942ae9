use std::path::{Component, Path, PathBuf};

use crate::utils;

/// Directory used when the user submits an empty project name.
pub const DEFAULT_TARGET_DIR: &str = "webcomp-project";

fn is_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}

/// Trims surrounding whitespace and strips any trailing path separators.
/// Input made only of separators is the filesystem root and keeps one.
///
/// Returns `None` for missing or blank input.
pub fn normalize_target_dir(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    let normalized =
        trimmed.trim_end_matches(|c: char| c.is_whitespace() || is_separator(c));
    if !normalized.is_empty() {
        return Some(normalized.to_string());
    }
    trimmed
        .chars()
        .next()
        .filter(|&c| is_separator(c))
        .map(String::from)
}

/// Project name for a normalized target path, resolving `.` against the
/// process working directory.
pub fn derive_project_name(path: &str) -> String {
    match std::env::current_dir() {
        Ok(cwd) => derive_project_name_in(path, &cwd),
        Err(_) => path.to_string(),
    }
}

/// Same as [`derive_project_name`] with an explicit working directory.
/// Any path other than `.` is returned as-is and may still contain separators.
pub fn derive_project_name_in(path: &str, cwd: &Path) -> String {
    if path != "." {
        return path.to_string();
    }
    cwd.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub raw: String,
    pub path: String,
    pub project_name: String,
}

impl TargetSpec {
    pub fn new(raw: impl Into<String>, cwd: &Path) -> Self {
        let raw = raw.into();
        let path = normalize_target_dir(Some(&raw)).unwrap_or_else(|| DEFAULT_TARGET_DIR.into());
        let project_name = derive_project_name_in(&path, cwd);
        Self {
            raw,
            path,
            project_name,
        }
    }

    pub fn root(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.path)
    }

    pub fn is_cwd(&self, cwd: &Path) -> bool {
        let root = self.root(cwd);
        lexical(&root) == lexical(cwd)
    }

    /// Path to `cd` into from `cwd`, or `None` when the project is `cwd` itself.
    pub fn cd_path(&self, cwd: &Path) -> Option<String> {
        if self.is_cwd(cwd) {
            return None;
        }
        let relative = relative_to(&lexical(&self.root(cwd)), &lexical(cwd));
        Some(utils::path_to_string(relative))
    }
}

/// `path` as seen from `base`: up to their common ancestor, then down.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path = path.components().collect::<Vec<_>>();
    let base = base.components().collect::<Vec<_>>();
    let common = path
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();
    let mut out = PathBuf::new();
    for _ in common..base.len() {
        out.push("..");
    }
    for component in &path[common..] {
        out.push(component);
    }
    out
}

fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_whitespace_and_trailing_separators() {
        assert_eq!(normalize_target_dir(Some("  my-app//  ")), Some("my-app".into()));
        assert_eq!(normalize_target_dir(Some("a/b/")), Some("a/b".into()));
        assert_eq!(normalize_target_dir(Some("a / /")), Some("a".into()));
        assert_eq!(normalize_target_dir(Some(".")), Some(".".into()));
        assert_eq!(normalize_target_dir(Some("/")), Some("/".into()));
        assert_eq!(normalize_target_dir(Some(" /// ")), Some("/".into()));
        assert_eq!(normalize_target_dir(Some("   ")), None);
        assert_eq!(normalize_target_dir(Some("")), None);
        assert_eq!(normalize_target_dir(None), None);
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["x", " x/ ", "a / /", "///", "/ /", " ./ ", "a b/c//", "\t@s/p/\n"] {
            let once = normalize_target_dir(Some(raw));
            let twice = normalize_target_dir(once.as_deref());
            assert_eq!(once, twice, "input: {raw:?}");
        }
    }

    #[test]
    fn derive_uses_cwd_basename_for_dot_only() {
        let cwd = Path::new("/home/me/cool-app");
        assert_eq!(derive_project_name_in(".", cwd), "cool-app");
        assert_eq!(derive_project_name_in("nested/app", cwd), "nested/app");
        assert_eq!(derive_project_name_in("./app", cwd), "./app");
    }

    #[test]
    fn derive_against_process_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(derive_project_name("."), expected);
        assert_eq!(derive_project_name("other"), "other");
    }

    #[test]
    fn target_spec_falls_back_to_default_dir() {
        let cwd = Path::new("/work");
        let spec = TargetSpec::new("  ", cwd);
        assert_eq!(spec.path, DEFAULT_TARGET_DIR);
        assert_eq!(spec.project_name, DEFAULT_TARGET_DIR);
        assert_eq!(spec.raw, "  ");
    }

    #[test]
    fn root_argument_is_kept_not_defaulted() {
        let cwd = Path::new("/work");
        let spec = TargetSpec::new("/", cwd);
        assert_eq!(spec.path, "/");
        assert_eq!(spec.root(cwd), PathBuf::from("/"));
    }

    #[test]
    fn cd_path_is_relative_and_absent_for_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(TargetSpec::new(".", cwd).cd_path(cwd), None);
        assert_eq!(
            TargetSpec::new("my app/", cwd).cd_path(cwd),
            Some("my app".into())
        );
        assert_eq!(
            TargetSpec::new("/work/inner", cwd).cd_path(cwd),
            Some("inner".into())
        );
    }

    #[test]
    fn cd_path_walks_up_to_siblings() {
        let cwd = Path::new("/work/here");
        assert_eq!(
            TargetSpec::new("../sib", cwd).cd_path(cwd),
            Some("../sib".into())
        );
        assert_eq!(
            TargetSpec::new("/other/app", cwd).cd_path(cwd),
            Some("../../other/app".into())
        );
        assert_eq!(TargetSpec::new("../here", cwd).cd_path(cwd), None);
    }
}
