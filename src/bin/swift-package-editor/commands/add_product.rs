//! `swift-package-editor add-product` command

use anyhow::Result;

use crate::cli::AddProductArgs;
use crate::commands::print_dry_run;
use crate::GlobalOptions;
use package_editor::ops::add_product::{self, AddProductOptions};
use package_editor::util::shell::Status;

pub fn execute(args: AddProductArgs, global_opts: &GlobalOptions) -> Result<()> {
    let opts = AddProductOptions {
        name: args.name,
        kind: args.kind,
        targets: args.targets,
        dry_run: args.dry_run,
    };

    let outcome = add_product::run(&global_opts.ctx, &opts)?;

    if args.dry_run {
        print_dry_run(&outcome, global_opts);
    } else {
        global_opts.shell.status(
            Status::Added,
            format!("{} product {} ({})", opts.kind, opts.name, opts.targets.join(", ")),
        );
    }

    Ok(())
}
