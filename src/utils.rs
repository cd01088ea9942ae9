use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to {action}: '{}'", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error("unknown template: '{id}'")]
    UnknownTemplate { id: String },
    #[error("template not found: '{id}' (looked in '{}')", path.display())]
    TemplateNotFound { id: String, path: PathBuf },
    #[error("package descriptor is not a json object: '{}'", path.display())]
    InvalidDescriptor { path: PathBuf },
    #[error("invalid package name: '{name}'")]
    InvalidPackageName { name: String },
    #[error("failed to read prompt answer")]
    Prompt(#[source] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Attaches the failing action and path to a raw I/O error.
pub(crate) trait IoContext<T> {
    fn on(self, action: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn on(self, action: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Filesystem {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

pub(crate) fn path_to_string<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_names_action_and_path() {
        let err = std::fs::read("/definitely/not/here")
            .on("read file", "/definitely/not/here")
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to read file: '/definitely/not/here'"));
    }
}
