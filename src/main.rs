//! ptoccupancy main entrypoint.

use ptoccupancy::run;
use ptoccupancy::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
