//! Command implementations

pub mod add_dependency;
pub mod add_product;
pub mod add_target;
pub mod completions;

use package_editor::ops::EditOutcome;

use crate::GlobalOptions;

/// Print the manifest of a dry run to stdout.
pub(crate) fn print_dry_run(outcome: &EditOutcome, global_opts: &GlobalOptions) {
    print!("{}", outcome.rendered);
    if !outcome.rendered.ends_with('\n') {
        println!();
    }
    global_opts.shell.note(format!(
        "dry run, {} was not changed",
        global_opts.ctx.relative(&outcome.manifest_path).display()
    ));
}
