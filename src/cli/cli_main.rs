use super::cli_examples::examples_menu;
use super::cli_polymerization::{
    read_line, run_manual_input, run_reference, run_step_size_study, run_task_file_prompt,
};
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = match read_line() {
            Ok(choice) => choice,
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        };
        // EOF
        if choice.is_empty() {
            break;
        }

        let outcome = match choice.trim() {
            "1" => run_reference().map_err(|e| e.to_string()),
            "2" => run_manual_input(),
            "3" => run_task_file_prompt(),
            "4" => run_step_size_study(),
            "5" => {
                examples_menu();
                Ok(())
            }
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("Error: {}", e);
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - "Enter your choice:" prompt

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to RadPoly: free-radical bulk polymerization kinetics\n
    under the pseudo-steady-state assumption \n \x1b[0m"
    );
    println!("\x1b[33m1. Reference run (bulk MMA)\x1b[0m");
    println!("\x1b[33m2. Enter parameters\x1b[0m");
    println!("\x1b[33m3. Load task file\x1b[0m");
    println!("\x1b[33m4. Step size sensitivity\x1b[0m");
    println!("\x1b[33m5. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}
