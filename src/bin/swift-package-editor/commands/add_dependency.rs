//! `swift-package-editor add-dependency` command

use anyhow::Result;

use crate::cli::AddDependencyArgs;
use crate::commands::print_dry_run;
use crate::GlobalOptions;
use package_editor::core::DependencyLocation;
use package_editor::ops::add_dependency::{self, AddDependencyOptions};
use package_editor::ops::RequirementOptions;
use package_editor::util::shell::Status;

pub fn execute(args: AddDependencyArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = &global_opts.ctx;

    let opts = AddDependencyOptions {
        locator: args.locator,
        requirement: RequirementOptions {
            exact: args.exact,
            revision: args.revision,
            branch: args.branch,
            from: args.from,
            up_to_next_minor_from: args.up_to_next_minor_from,
            to: args.to,
            through: args.through,
        },
        dry_run: args.dry_run,
    };

    let outcome = add_dependency::run(ctx, &opts, &ctx.registry())?;

    if args.dry_run {
        print_dry_run(&outcome, global_opts);
        return Ok(());
    }

    let shell = &global_opts.shell;
    shell.status(Status::Added, format!("dependency on {}", opts.locator));
    if DependencyLocation::parse(&opts.locator).is_remote() {
        shell.warn(format!(
            "products of {} are not fetched, so add-target cannot resolve them by name",
            opts.locator
        ));
    }

    Ok(())
}
