// Tue Jan 13 2026 - Alex

use rawstruct::ui::{self, cli};

fn main() {
    if let Err(e) = cli::run() {
        ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
