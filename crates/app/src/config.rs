//! Configuration for the stacksim application.
//!
//! Handles parsing command-line arguments and generating sensible
//! defaults. With no arguments the app runs the interactive console;
//! `--demo` runs a self-contained transfer of a generated payload,
//! reproducible with `--seed`.

use std::path::PathBuf;

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Run the self-contained demo instead of the console
    pub demo: bool,

    /// Seed for the demo payload generator
    pub seed: u64,

    /// Size of the generated demo payload
    pub demo_bytes: usize,

    /// Where the demo writes the delivered payload
    pub out: PathBuf,

    /// Whether to print pipeline stats after a run
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If `--seed` is absent, a time-based seed is chosen and printed so
    /// the run is reproducible.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut demo = false;
        let mut seed: Option<u64> = None;
        let mut demo_bytes: Option<usize> = None;
        let mut out: Option<PathBuf> = None;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--demo" => {
                    demo = true;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--demo-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--demo-bytes requires a number".to_string());
                    }
                    demo_bytes = Some(args[i].parse().map_err(|_| "invalid demo-bytes")?);
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    out = Some(PathBuf::from(&args[i]));
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            demo,
            seed,
            demo_bytes: demo_bytes.unwrap_or(5000),
            out: out.unwrap_or_else(|| PathBuf::from("./demo-out.bin")),
            print_stats,
        })
    }
}

fn print_help() {
    println!("stacksim: educational four-layer protocol stack simulation");
    println!();
    println!("USAGE:");
    println!("    stacksim [OPTIONS]");
    println!();
    println!("Without options an interactive console starts:");
    println!("    sender <link> <net> <port>            create the sender");
    println!("    receiver <name> <link> <net> <port>   register a receiver");
    println!("    send <file> <link> <net> <port>       transmit a file");
    println!("    quit                                  exit");
    println!();
    println!("Addresses are literal byte strings: 6 chars for link,");
    println!("4 for net, 2 for port.");
    println!();
    println!("OPTIONS:");
    println!("    --demo              Run a self-contained generated transfer");
    println!("    --seed <N>          Seed for the demo payload (default: time-based)");
    println!("    --demo-bytes <N>    Demo payload size (default: 5000)");
    println!("    --out <PATH>        Demo output file (default: ./demo-out.bin)");
    println!("    --no-stats          Don't print pipeline stats");
    println!("    --help, -h          Print this help");
    println!();
}
