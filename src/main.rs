//! floormap main entrypoint.

use floormap::run;
use std::process::exit;

fn main() {
    match run() {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
