use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, trace};

use crate::copy;
use crate::metadata::{GlobPatterns, Variant};
use crate::package::PackageDescriptor;
use crate::utils::{Error, IoContext as _, Result};

/// Placeholder shipped in place of `.gitignore`, which package registries strip.
pub const IGNORE_PLACEHOLDER: &str = "_template_gitignore";
pub const IGNORE_FILE: &str = ".gitignore";

/// Top-level names kept out of the bulk copy, as glob patterns.
const EXCLUDED: &[&str] = &[
    "*-lock.json",
    "*-lock.yaml",
    "*.lock",
    "*.lockb",
    "dist",
    "node_modules",
    IGNORE_PLACEHOLDER,
];

/// Maps template ids to directories below the installation root.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    root: PathBuf,
    variant: Variant,
}

impl TemplateResolver {
    pub fn new(root: impl Into<PathBuf>, variant: Variant) -> Self {
        Self {
            root: root.into(),
            variant,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        let path = self.root.join(self.variant.dir_name(id));
        if !path.is_dir() {
            return Err(Error::TemplateNotFound {
                id: id.to_string(),
                path,
            });
        }
        Ok(path)
    }

    pub fn plan(&self, id: &str) -> Result<CopyPlan> {
        let template_root = self.resolve(id)?;
        CopyPlan::build(template_root, &self.root, self.variant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    CopyFile(PathBuf),
    CopySubtree(PathBuf),
    WriteContent(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    /// Destination, relative to the project root.
    pub dest: PathBuf,
    pub op: WriteOp,
}

impl PlannedWrite {
    /// Performs the write below `dst_root`, returning the number of files written.
    pub fn apply(&self, dst_root: impl AsRef<Path>) -> Result<u32> {
        let to = dst_root.as_ref().join(&self.dest);
        trace!(dest = %self.dest.display(), "applying write");
        match &self.op {
            WriteOp::CopyFile(src) | WriteOp::CopySubtree(src) => copy::copy_entry(src, &to),
            WriteOp::WriteContent(bytes) => {
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent).on("create directory", parent)?;
                }
                fs::write(&to, bytes).on("write file", &to)?;
                Ok(1)
            }
        }
    }
}

/// What one scaffolding run writes: the filtered template entries, then the
/// ignore file, then the patched descriptor.
#[derive(Debug, Clone)]
pub struct CopyPlan {
    pub template_root: PathBuf,
    pub bulk: Vec<PlannedWrite>,
    pub ignore_file: PlannedWrite,
    pub descriptor: PathBuf,
}

impl CopyPlan {
    /// Lists the top level of `template_root` and filters it. The ignore
    /// placeholder is taken from the template itself when present, otherwise
    /// from `shared_root`.
    pub fn build(
        template_root: impl Into<PathBuf>,
        shared_root: impl AsRef<Path>,
        variant: Variant,
    ) -> Result<Self> {
        let template_root = template_root.into();
        let descriptor_name = variant.descriptor_file();

        let mut excluded = GlobPatterns::default();
        for pattern in EXCLUDED {
            excluded.push(Pattern::new(pattern)?);
        }
        excluded.push(Pattern::new(&Pattern::escape(descriptor_name))?);

        let mut entries = fs::read_dir(&template_root)
            .on("read template directory", &template_root)?
            .collect::<std::io::Result<Vec<_>>>()
            .on("read template directory", &template_root)?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut bulk = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = PathBuf::from(entry.file_name());
            if excluded.matches_path_any(&name) {
                trace!(name = %name.display(), "excluded from bulk copy");
                continue;
            }
            let src = entry.path();
            let op = if fs::metadata(&src).on("stat", &src)?.is_dir() {
                WriteOp::CopySubtree(src)
            } else {
                WriteOp::CopyFile(src)
            };
            bulk.push(PlannedWrite { dest: name, op });
        }

        let local = template_root.join(IGNORE_PLACEHOLDER);
        let placeholder = if local.is_file() {
            local
        } else {
            shared_root.as_ref().join(IGNORE_PLACEHOLDER)
        };
        if !placeholder.is_file() {
            return Err(Error::Filesystem {
                action: "locate ignore placeholder",
                path: placeholder,
                source: std::io::ErrorKind::NotFound.into(),
            });
        }

        let descriptor = template_root.join(descriptor_name);
        debug!(
            template = %template_root.display(),
            entries = bulk.len(),
            "built copy plan"
        );
        Ok(Self {
            template_root,
            bulk,
            ignore_file: PlannedWrite {
                dest: PathBuf::from(IGNORE_FILE),
                op: WriteOp::CopyFile(placeholder),
            },
            descriptor,
        })
    }

    pub fn bulk_copy(&self, dst_root: impl AsRef<Path>) -> Result<u32> {
        let mut files = 0;
        for write in &self.bulk {
            files += write.apply(dst_root.as_ref())?;
        }
        Ok(files)
    }

    pub fn write_ignore_file(&self, dst_root: impl AsRef<Path>) -> Result<u32> {
        self.ignore_file.apply(dst_root)
    }

    /// Loads the template's descriptor, renames it and writes it out.
    pub fn write_descriptor(
        &self,
        dst_root: impl AsRef<Path>,
        name: &str,
    ) -> Result<PackageDescriptor> {
        let mut descriptor = PackageDescriptor::load(&self.descriptor)?;
        descriptor.set_name(name);
        let dest = self
            .descriptor
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default();
        PlannedWrite {
            dest,
            op: WriteOp::WriteContent(descriptor.to_pretty_string()?.into_bytes()),
        }
        .apply(dst_root)?;
        Ok(descriptor)
    }

    /// Runs the whole pipeline in order, returning the number of files written.
    pub fn apply(&self, dst_root: impl AsRef<Path>, name: &str) -> Result<u32> {
        let dst_root = dst_root.as_ref();
        let mut files = self.bulk_copy(dst_root)?;
        files += self.write_ignore_file(dst_root)?;
        self.write_descriptor(dst_root, name)?;
        Ok(files + 1)
    }
}
