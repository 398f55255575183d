/// main menu and the non-interactive task file entry point
pub mod cli_main;
pub mod cli_examples;
/// interactive input of a polymerization problem
pub mod cli_polymerization;
