use std::ops::ControlFlow;
use std::path::PathBuf;

use tracing::debug;

use crate::copy;
use crate::metadata::{self, Template, TEMPLATES};
use crate::package;
use crate::target::{TargetSpec, DEFAULT_TARGET_DIR};
use crate::utils::{Error, Result};

/// Answer source for the flow. Every method returns `Ok(None)` when the
/// user cancels.
pub trait Prompter {
    /// Asks for free text. `on_update` receives each intermediate value the
    /// backend can observe, and the final one.
    fn text(
        &mut self,
        message: &str,
        default: &str,
        on_update: &mut dyn FnMut(&str),
    ) -> Result<Option<String>>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    /// Returns the index of the chosen item.
    fn select(&mut self, message: &str, items: &[String], default: usize)
        -> Result<Option<usize>>;

    /// Reports a rejected answer before the question is asked again.
    fn warn(&mut self, message: &str);
}

/// Answers accumulated so far; later steps read what earlier ones wrote.
#[derive(Debug, Clone)]
pub struct AnswerState {
    pub target: TargetSpec,
    pub overwrite: Option<bool>,
    pub package_name: Option<String>,
    pub template: Option<&'static Template>,
}

/// Everything the writer needs once the flow has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub target: TargetSpec,
    /// Whether the existing target must be emptied first.
    pub overwrite: bool,
    pub package_name: String,
    pub template: &'static Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Completed(Answers),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ProjectName,
    Overwrite,
    PackageName,
    TemplateSelection,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::ProjectName,
        Step::Overwrite,
        Step::PackageName,
        Step::TemplateSelection,
    ];
}

pub struct PromptFlow {
    cwd: PathBuf,
    target: Option<String>,
    template: Option<&'static Template>,
}

impl PromptFlow {
    /// `target` and `template` are values given on the command line; each one
    /// present skips its question. An unknown template id fails here, before
    /// anything is asked.
    pub fn new(
        cwd: impl Into<PathBuf>,
        target: Option<String>,
        template: Option<&str>,
    ) -> Result<Self> {
        let template = template
            .map(|id| {
                metadata::find_template(id).ok_or_else(|| Error::UnknownTemplate {
                    id: id.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            cwd: cwd.into(),
            target,
            template,
        })
    }

    fn initial_state(&self) -> AnswerState {
        let raw = self.target.as_deref().unwrap_or(DEFAULT_TARGET_DIR);
        AnswerState {
            target: TargetSpec::new(raw, &self.cwd),
            overwrite: None,
            package_name: None,
            template: self.template,
        }
    }

    /// Evaluated when `step` is reached, never ahead of time.
    pub fn is_applicable(&self, step: Step, state: &AnswerState) -> Result<bool> {
        Ok(match step {
            Step::ProjectName => self.target.is_none(),
            Step::Overwrite => {
                let root = state.target.root(&self.cwd);
                root.exists() && !copy::is_directory_empty(&root)?
            }
            Step::PackageName => !package::is_valid_package_name(&state.target.project_name),
            Step::TemplateSelection => state.template.is_none(),
        })
    }

    pub fn resolve<P: Prompter + ?Sized>(
        &self,
        step: Step,
        state: &mut AnswerState,
        prompter: &mut P,
    ) -> Result<ControlFlow<()>> {
        match step {
            Step::ProjectName => {
                let cwd = &self.cwd;
                let answer = prompter.text(
                    "Where should we create your project?",
                    DEFAULT_TARGET_DIR,
                    &mut |value: &str| state.target = TargetSpec::new(value, cwd),
                )?;
                let Some(answer) = answer else {
                    return Ok(ControlFlow::Break(()));
                };
                state.target = TargetSpec::new(answer, cwd);
            }
            Step::Overwrite => {
                let subject = if state.target.path == "." {
                    String::from("Current directory")
                } else {
                    format!("Target directory \"{}\"", state.target.path)
                };
                let message =
                    format!("{subject} is not empty. Remove existing files and continue?");
                match prompter.confirm(&message, false)? {
                    Some(true) => state.overwrite = Some(true),
                    _ => return Ok(ControlFlow::Break(())),
                }
            }
            Step::PackageName => {
                let default = package::sanitize_package_name(&state.target.project_name);
                loop {
                    let answer = prompter.text("Package name:", &default, &mut |_: &str| {})?;
                    let Some(answer) = answer else {
                        return Ok(ControlFlow::Break(()));
                    };
                    match package::validate_package_name(&answer) {
                        Ok(()) => {
                            state.package_name = Some(answer);
                            break;
                        }
                        Err(err) => prompter.warn(&err.to_string()),
                    }
                }
            }
            Step::TemplateSelection => {
                let items = TEMPLATES.iter().map(ToString::to_string).collect::<Vec<_>>();
                let Some(index) = prompter.select("Which web components template?", &items, 0)?
                else {
                    return Ok(ControlFlow::Break(()));
                };
                let template = TEMPLATES.get(index).ok_or_else(|| Error::UnknownTemplate {
                    id: format!("#{index}"),
                })?;
                state.template = Some(template);
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Walks every step in order. Nothing on disk is touched here.
    pub fn run<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<Flow> {
        let mut state = self.initial_state();
        for step in Step::ALL {
            if !self.is_applicable(step, &state)? {
                debug!(?step, "skipped");
                continue;
            }
            debug!(?step, "asking");
            if self.resolve(step, &mut state, prompter)?.is_break() {
                debug!(?step, "cancelled");
                return Ok(Flow::Cancelled);
            }
        }

        let AnswerState {
            target,
            overwrite,
            package_name,
            template,
        } = state;
        let package_name = package_name.unwrap_or_else(|| target.project_name.clone());
        Ok(Flow::Completed(Answers {
            target,
            overwrite: overwrite.unwrap_or(false),
            package_name,
            template: template.expect("template should be chosen by the last step"),
        }))
    }
}
