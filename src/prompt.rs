use std::io::ErrorKind;
use std::sync::OnceLock;

use dialoguer::theme::SimpleTheme;
use dialoguer::{Confirm, Input, Select};

use create_webcomp::flow::Prompter;
use create_webcomp::{Error, Result};

static THEME: OnceLock<SimpleTheme> = OnceLock::new();

/// Interactive prompts on the controlling terminal.
pub(crate) struct Terminal;

/// Ctrl+C surfaces from the terminal as an interrupted read.
fn answered<T>(result: Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(dialoguer::Error::IO(err)) => Err(Error::Prompt(err)),
    }
}

impl Prompter for Terminal {
    fn text(
        &mut self,
        message: &str,
        default: &str,
        on_update: &mut dyn FnMut(&str),
    ) -> Result<Option<String>> {
        let theme = THEME.get_or_init(|| SimpleTheme);
        let p = Input::<String>::with_theme(theme)
            .with_prompt(message)
            .default(default.to_string());
        let value = answered(p.interact_text())?;
        if let Some(value) = &value {
            on_update(value);
        }
        Ok(value)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        let theme = THEME.get_or_init(|| SimpleTheme);
        let p = Confirm::with_theme(theme)
            .with_prompt(message)
            .default(default);
        answered(p.interact_opt()).map(Option::flatten)
    }

    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        let theme = THEME.get_or_init(|| SimpleTheme);
        let p = Select::with_theme(theme)
            .with_prompt(message)
            .items(items)
            .default(default);
        answered(p.interact_opt()).map(Option::flatten)
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
