// Fri Oct 16 2026 - Alex

use recon_orchestrator::ui::{cli, ErrorDisplay};

fn main() {
    if let Err(error) = cli::run() {
        ErrorDisplay::new().print(&error);
        std::process::exit(1);
    }
}
