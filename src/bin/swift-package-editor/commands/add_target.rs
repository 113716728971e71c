//! `swift-package-editor add-target` command

use anyhow::Result;

use crate::cli::AddTargetArgs;
use crate::commands::print_dry_run;
use crate::GlobalOptions;
use package_editor::ops::add_target::{self, AddTargetOptions};
use package_editor::util::shell::Status;

pub fn execute(args: AddTargetArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = &global_opts.ctx;
    let shell = &global_opts.shell;

    let opts = AddTargetOptions {
        name: args.name,
        kind: args.kind,
        dependencies: args.dependencies,
        path: args.path,
        url: args.url,
        checksum: args.checksum,
        no_test_target: args.no_test_target,
        dry_run: args.dry_run,
    };

    let outcome = add_target::run(ctx, &opts, &ctx.registry())?;

    if args.dry_run {
        print_dry_run(&outcome, global_opts);
        return Ok(());
    }

    shell.status(Status::Added, format!("{} target {}", opts.kind, opts.name));
    for path in &outcome.created {
        shell.status(Status::Created, ctx.relative(path).display());
    }

    Ok(())
}
