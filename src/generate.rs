use anyhow::{Context as _, Result};
use clap::Args;

use create_webcomp::agent::USER_AGENT_ENV;
use create_webcomp::flow::{Flow, PromptFlow};
use create_webcomp::metadata::Variant;
use create_webcomp::template::TemplateResolver;
use create_webcomp::writer::{ProjectWriter, Report};

use crate::prompt::Terminal;
use crate::App;

#[derive(Clone, Args)]
pub(crate) struct Generate {
    #[arg(help = "Directory to create the project in.")]
    dir: Option<String>,
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        help = "Template to use: js-only, css-js or html-css-js."
    )]
    template: Option<String>,
    #[arg(
        long = "variant",
        value_name = "VARIANT",
        default_value_t = Variant::Node,
        help = "Project flavour: node or deno."
    )]
    variant: Variant,
}

impl App {
    pub(crate) fn generate(&self) -> Result<()> {
        let args = &self.cli.generate;
        let cwd = std::env::current_dir().context("failed to locate current directory")?;

        println!("create-webcomp version {}", env!("CARGO_PKG_VERSION"));
        println!("Okies, let's get you started with a shiny web components project.");
        println!();

        let flow = PromptFlow::new(&cwd, args.dir.clone(), args.template.as_deref())
            .context("invalid arguments")?;
        let answers = match flow.run(&mut Terminal).context("failed to collect answers")? {
            Flow::Completed(answers) => answers,
            Flow::Cancelled => {
                println!("Operation cancelled.");
                return Ok(());
            }
        };

        let resolver = TemplateResolver::new(self.config.template_root(), args.variant);
        let writer = ProjectWriter::new(&cwd, resolver).with_agent(
            std::env::var(USER_AGENT_ENV).ok(),
            &self.config.package_manager,
        );

        println!("Scaffolding your web components project...");
        let report = writer.write(&answers).context(format!(
            "failed to scaffold project into '{}'",
            answers.target.path
        ))?;
        println!("Your project is ready!");

        println!();
        println!("Next steps:");
        for (i, step) in next_steps(&report).iter().enumerate() {
            println!("  {}: {step}", i + 1);
        }

        Ok(())
    }
}

fn next_steps(report: &Report) -> Vec<String> {
    let mut steps = Vec::with_capacity(3);
    if let Some(cd) = &report.cd_path {
        if cd.contains(' ') {
            steps.push(format!("cd \"{cd}\""));
        } else {
            steps.push(format!("cd {cd}"));
        }
    }
    steps.extend(report.package_manager.next_commands());
    steps
}
