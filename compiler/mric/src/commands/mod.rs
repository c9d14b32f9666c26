//! Command handlers for the `mric` CLI.
//!
//! Each handler reports its own failures on stderr and exits with status 1.

mod check;
mod dump;
mod gen;

pub use check::check_file;
pub use dump::dump_file;
pub use gen::gen_file;

use mric::BindgenError;

/// Report a failed run and exit.
pub(super) fn fail(err: &BindgenError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
