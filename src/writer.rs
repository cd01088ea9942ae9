use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::agent::{PackageManager, FALLBACK_PACKAGE_MANAGER};
use crate::copy;
use crate::flow::Answers;
use crate::metadata::Variant;
use crate::template::TemplateResolver;
use crate::utils::{IoContext as _, Result};

/// Turns completed answers into a project directory.
pub struct ProjectWriter {
    cwd: PathBuf,
    resolver: TemplateResolver,
    agent: Option<String>,
    fallback_manager: String,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub root: PathBuf,
    pub package_name: String,
    pub files: u32,
    /// Where to `cd` to, if the project is not the working directory.
    pub cd_path: Option<String>,
    pub package_manager: PackageManager,
}

impl ProjectWriter {
    pub fn new(cwd: impl Into<PathBuf>, resolver: TemplateResolver) -> Self {
        Self {
            cwd: cwd.into(),
            resolver,
            agent: None,
            fallback_manager: FALLBACK_PACKAGE_MANAGER.to_string(),
        }
    }

    /// Sets the invocation metadata used to pick the package manager.
    pub fn with_agent(mut self, agent: Option<String>, fallback: impl Into<String>) -> Self {
        self.agent = agent;
        self.fallback_manager = fallback.into();
        self
    }

    fn package_manager(&self) -> PackageManager {
        match self.resolver.variant() {
            Variant::Deno => PackageManager::deno(),
            Variant::Node => PackageManager::detect(self.agent.as_deref(), &self.fallback_manager),
        }
    }

    pub fn write(&self, answers: &Answers) -> Result<Report> {
        // Resolve first so an unusable template fails before the target is touched.
        let plan = self.resolver.plan(answers.template.id)?;

        let root = answers.target.root(&self.cwd);
        if answers.overwrite {
            copy::empty_directory(&root)?;
        }
        fs::create_dir_all(&root).on("create project directory", &root)?;

        let files = plan.apply(&root, &answers.package_name)?;
        info!(
            root = %root.display(),
            template = answers.template.id,
            files,
            "scaffolded project"
        );

        Ok(Report {
            cd_path: answers.target.cd_path(&self.cwd),
            package_manager: self.package_manager(),
            package_name: answers.package_name.clone(),
            root,
            files,
        })
    }
}
