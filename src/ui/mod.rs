// Wed Jan 15 2026 - Alex

pub mod cli;
pub mod display;

pub use cli::{Args, Command, CommandHandler};
pub use display::DisplayRenderer;

pub fn print_error(message: &str) {
    use colored::Colorize;
    eprintln!("{} {}", "[ERROR]".red(), message);
}
