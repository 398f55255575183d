use RadPoly::cli::cli_main::run_interactive_menu;
use RadPoly::cli::cli_polymerization::run_task_file;
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};

pub fn main() {
    init_logger();
    // radpoly [task.json]
    match std::env::args().nth(1) {
        Some(task_file) => {
            if let Err(e) = run_task_file(&task_file) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => run_interactive_menu(),
    }
}

fn init_logger() {
    if TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        if let Err(e) = SimpleLogger::init(LevelFilter::Info, Config::default()) {
            eprintln!("Error: logger could not be started: {}", e);
        }
    }
}
