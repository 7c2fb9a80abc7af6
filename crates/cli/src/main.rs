//! Command-line interface for the `pathwise` application.
//!
//! This binary is a thin entry point; argument parsing, dispatch, and
//! rendering live in the library half of this crate.

fn main() -> anyhow::Result<()> {
    pathwise::run()
}
