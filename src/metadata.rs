use std::path::Path;
use std::str::FromStr;

use glob::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.hint)
    }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "js-only",
        label: "Standalone JavaScript",
        hint: "e.g., ./components/MyCounter.js",
    },
    Template {
        id: "css-js",
        label: "CSS + JavaScript",
        hint: "e.g., ./components/my-counter/style.css+index.js",
    },
    Template {
        id: "html-css-js",
        label: "HTML + CSS + JavaScript",
        hint: "e.g., ./components/my-counter/index.html+style.css+index.js",
    },
];

pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| template.id == id)
}

/// Structural flavour of the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Node,
    Deno,
}

impl Variant {
    pub fn dir_name(self, id: &str) -> String {
        match self {
            Self::Node => format!("template-{id}"),
            Self::Deno => format!("deno-template-{id}"),
        }
    }

    pub fn descriptor_file(self) -> &'static str {
        match self {
            Self::Node => "package.json",
            Self::Deno => "deno.json",
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(Self::Node),
            "deno" => Ok(Self::Deno),
            _ => Err(format!("unknown variant: '{s}' (expected 'node' or 'deno')")),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Deno => write!(f, "deno"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct GlobPatterns(Vec<Pattern>);

impl GlobPatterns {
    pub fn matches_path_any<P: AsRef<Path>>(&self, path: P) -> bool {
        self.0.iter().any(|p| p.matches_path(path.as_ref()))
    }

    pub(crate) fn push(&mut self, value: Pattern) {
        self.0.push(value)
    }
}
