// duallog binary: runs the built-in self-check suite.
// Usage: cargo run --bin duallog -- selfcheck [--seed N] [--out-dir DIR]

use std::process::ExitCode;

fn main() -> ExitCode {
    duallog::cli::run()
}
