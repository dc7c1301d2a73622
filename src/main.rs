use std::{env, process};

use closehook::{Closehook, Host};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 1 {
        eprintln!("Usage: closehook");
        process::exit(2);
    }

    match Closehook::run_case(Host::from_env()) {
        Ok(outcome) if outcome.passed() => {}
        Ok(_) => process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
