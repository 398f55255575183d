use super::cli_polymerization::read_line;
use crate::Examples::polymerization_examples::poly_examples;
use std::io::{self, Write};

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Reference MMA run");
        println!("2. Step size sensitivity");
        println!("3. Initiator concentration sweep");
        println!("4. No initiation: strict vs permissive");
        println!("5. Stop at 50% conversion");
        println!("0. Back to main menu");
        print!("Enter choice: ");
        let _ = io::stdout().flush();

        let choice = match read_line() {
            Ok(choice) if !choice.is_empty() => choice,
            _ => break,
        };
        match choice.trim() {
            "1" => poly_examples(0),
            "2" => poly_examples(1),
            "3" => poly_examples(2),
            "4" => poly_examples(3),
            "5" => poly_examples(4),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
