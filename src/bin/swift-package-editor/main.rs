//! swift-package-editor CLI - edits Package.swift manifests in place

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use package_editor::util::diagnostic::{find_parse_error, render_snippet};
use package_editor::util::shell::{ColorChoice, Shell};
use package_editor::EditorContext;

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: EditorContext,
}

fn main() {
    let cli = Cli::parse();
    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Shell::from_flags(cli.quiet, cli.verbose, color);

    init_logging(cli.verbose);

    if let Err(e) = run(cli, shell) {
        eprintln!("error: {:#}", e);
        if let Some(snippet) = find_parse_error(&e).and_then(|p| render_snippet(p, false)) {
            eprintln!("{}", snippet);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "package_editor=debug"
    } else {
        "package_editor=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, shell: Shell) -> Result<()> {
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let ctx = EditorContext::new(&cli.package_path)?;
    let global_opts = GlobalOptions { shell, ctx };

    match cli.command {
        Commands::AddDependency(args) => commands::add_dependency::execute(args, &global_opts),
        Commands::AddTarget(args) => commands::add_target::execute(args, &global_opts),
        Commands::AddProduct(args) => commands::add_product::execute(args, &global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
