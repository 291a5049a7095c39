pub mod inventory;
pub mod repl;
pub mod vehicle;

use crate::repl::{run, Cli};
use clap::Parser;

fn main() {
    inventory::init().ok();
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
