use anyhow::{Context, Result};
use atp_cli::args::{CliArgs, OutputFormat};
use atp_cli::driver::run_fixture;
use atp_cli::fixture::Fixture;
use atp_cli::reporter::Reporter;
use atp_cli::tracing_config::init_tracing;
use atp_plugin::{Plugin, PluginConfig};
use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::process::ExitCode;

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {err:#}", "error".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run(args: &CliArgs) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => PluginConfig::from_path(path)
            .with_context(|| format!("failed to load plugin config {}", path.display()))?,
        None => PluginConfig::default(),
    };
    let plugin = Plugin::new(config);

    if args.list_rules {
        for name in plugin.function_names() {
            println!("function {name}");
        }
        for name in plugin.method_names() {
            println!("method   {name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(path) = &args.fixture else {
        anyhow::bail!("no fixture given");
    };
    let fixture = Fixture::from_path(path)?;
    let report = run_fixture(&plugin, &fixture)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            println!("{} -> {} ({:?})", report.callee, report.result_type, report.outcome);
            if !report.diagnostics.is_empty() {
                let reporter = Reporter::new(color, fixture.source.as_deref());
                println!("{}", reporter.render(&report.diagnostics));
            }
        }
    }

    Ok(if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
