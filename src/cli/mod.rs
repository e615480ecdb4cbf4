//! CLI subcommand implementations for the sandcastle binary.

pub mod compile_cmd;
pub mod inspect_cmd;

mod project_dir;
