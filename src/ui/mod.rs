// Fri Oct 16 2026 - Alex

pub mod banner;
pub mod cli;
pub mod display;
pub mod errors;
pub mod progress;

pub use banner::Banner;
pub use cli::{Args, Command, CommandHandler};
pub use display::ConsoleRenderer;
pub use errors::ErrorDisplay;
pub use progress::ProgressSink;

use colored::Colorize;

pub fn print_info(message: &str) {
    eprintln!("{} {}", "[INFO]".cyan(), message);
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "[OK]".green(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "[WARN]".yellow(), message);
}
