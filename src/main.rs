//! keymark main entrypoint.

use keymark::run;
use keymark::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
