//! stacksim: four-layer protocol stack simulation.
//!
//! Two modes:
//! - `--demo`: generate a seeded payload, push it through a sender and
//!   receiver pair in-process, write the delivered bytes to a file, and
//!   print pipeline stats.
//! - default: an interactive console where senders and receivers are
//!   created by command and files are transmitted between them.

mod config;
mod console;
mod input_gen;
mod sink;

use config::Config;
use stacksim_core::address::Endpoint;
use stacksim_core::stack::{Delivery, Receiver, Sender};
use std::io::{BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("try --help for usage");
            std::process::exit(2);
        }
    };

    let result = if config.demo {
        run_demo(&config)
    } else {
        run_console()
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

/// Self-contained transfer of a generated payload between two fixed
/// endpoints, written to `config.out`.
fn run_demo(config: &Config) -> Result<(), String> {
    println!(
        "demo: {} bytes, seed {}",
        config.demo_bytes, config.seed
    );

    let payload = input_gen::generate_sample_data(config.seed, config.demo_bytes);

    let source = Endpoint::from_bytes(b"aabbcc", b"10.0", b"40").map_err(|e| e.to_string())?;
    let dest = Endpoint::from_bytes(b"ddeeff", b"10.1", b"80").map_err(|e| e.to_string())?;

    let mut sender = Sender::new(source);
    let mut receiver = Receiver::new(dest);

    let codes = sender.send(&payload, &dest).map_err(|e| e.to_string())?;
    println!("demo: {} line code(s) on the wire", codes.len());

    for code in &codes {
        match receiver.receive(code).map_err(|e| e.to_string())? {
            Delivery::Complete | Delivery::MoreExpected => {}
            Delivery::NotForMe => return Err("demo receiver declined its own frame".to_string()),
        }
    }

    let delivered = receiver.take_completed().map_err(|e| e.to_string())?;
    if delivered != payload {
        return Err("delivered bytes differ from the generated payload".to_string());
    }

    std::fs::write(&config.out, &delivered)
        .map_err(|e| format!("{}: {e}", config.out.display()))?;
    println!("demo: wrote {} bytes to {}", delivered.len(), config.out.display());

    if config.print_stats {
        println!("{}", sender.stats().report());
        println!("{}", receiver.stats().report());
    }
    Ok(())
}

/// Line-oriented console loop over stdin. Command errors are printed
/// and the loop continues; EOF or `quit` ends it.
fn run_console() -> Result<(), String> {
    let stdin = std::io::stdin();
    let mut console = console::Console::new();

    print!("> ");
    let _ = std::io::stdout().flush();

    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        if !line.trim().is_empty() {
            match console::parse(&line).and_then(|command| console.handle(command)) {
                Ok(true) => {}
                Ok(false) => break,
                Err(message) => println!("{message}"),
            }
        }
        print!("> ");
        let _ = std::io::stdout().flush();
    }
    Ok(())
}
