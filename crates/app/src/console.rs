//! Interactive console: command parsing and pipeline driving.
//!
//! Commands mirror the classic exercise interface:
//!
//! ```text
//! sender <link> <net> <port>            create the sender
//! receiver <name> <link> <net> <port>   register a receiver
//! send <file> <link> <net> <port>       transmit a file to an endpoint
//! quit                                  exit
//! ```
//!
//! Names and file paths may contain spaces; the LAST three tokens of a
//! `receiver` or `send` line are always the addresses. Addresses are
//! literal byte strings (6 chars link, 4 chars net, 2 chars port).
//!
//! Transmission is a same-process handoff: every line code produced by a
//! `send` is offered to every registered receiver, and whichever one
//! completes a message hands it to the file sink.

use crate::sink;
use stacksim_core::address::Endpoint;
use stacksim_core::stack::{Delivery, Receiver, Sender};
use std::path::Path;

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sender {
        link: String,
        net: String,
        port: String,
    },
    Receiver {
        name: String,
        link: String,
        net: String,
        port: String,
    },
    Send {
        file: String,
        link: String,
        net: String,
        port: String,
    },
    Quit,
}

/// Parse one console line.
///
/// Returns a human-readable message for anything unparseable; the loop
/// prints it and continues.
pub fn parse(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&keyword, rest) = tokens.split_first().ok_or("unknown command")?;

    match keyword {
        "sender" => {
            if rest.len() != 3 {
                return Err("usage: sender <link> <net> <port>".to_string());
            }
            Ok(Command::Sender {
                link: rest[0].to_string(),
                net: rest[1].to_string(),
                port: rest[2].to_string(),
            })
        }
        "receiver" => {
            let (head, addrs) = split_trailing_addresses(rest)
                .ok_or("usage: receiver <name> <link> <net> <port>")?;
            Ok(Command::Receiver {
                name: head,
                link: addrs[0].to_string(),
                net: addrs[1].to_string(),
                port: addrs[2].to_string(),
            })
        }
        "send" => {
            let (head, addrs) = split_trailing_addresses(rest)
                .ok_or("usage: send <file> <link> <net> <port>")?;
            Ok(Command::Send {
                file: head,
                link: addrs[0].to_string(),
                net: addrs[1].to_string(),
                port: addrs[2].to_string(),
            })
        }
        "quit" => Ok(Command::Quit),
        _ => Err("unknown command".to_string()),
    }
}

/// Split `<head with spaces> <link> <net> <port>` into the rejoined head
/// and the three address tokens.
fn split_trailing_addresses<'a>(tokens: &'a [&'a str]) -> Option<(String, &'a [&'a str])> {
    if tokens.len() < 4 {
        return None;
    }
    let split = tokens.len() - 3;
    Some((tokens[..split].join(" "), &tokens[split..]))
}

/// Console state: one optional sender and any number of named receivers.
#[derive(Default)]
pub struct Console {
    sender: Option<Sender>,
    receivers: Vec<(String, Receiver)>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one command. Returns `false` when the loop should stop.
    ///
    /// Errors are reported as strings so the loop can print and carry on,
    /// matching the console's forgiving style.
    pub fn handle(&mut self, command: Command) -> Result<bool, String> {
        match command {
            Command::Sender { link, net, port } => {
                let source = Endpoint::from_bytes(link.as_bytes(), net.as_bytes(), port.as_bytes())
                    .map_err(|e| e.to_string())?;
                self.sender = Some(Sender::new(source));
                Ok(true)
            }
            Command::Receiver {
                name,
                link,
                net,
                port,
            } => {
                let source = Endpoint::from_bytes(link.as_bytes(), net.as_bytes(), port.as_bytes())
                    .map_err(|e| e.to_string())?;
                self.receivers.push((name, Receiver::new(source)));
                Ok(true)
            }
            Command::Send {
                file,
                link,
                net,
                port,
            } => {
                let dest = Endpoint::from_bytes(link.as_bytes(), net.as_bytes(), port.as_bytes())
                    .map_err(|e| e.to_string())?;
                let payload = std::fs::read(&file).map_err(|e| format!("{file}: {e}"))?;
                self.transmit(&payload, &dest)?;
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }

    /// Drive one payload through the sender and offer every resulting
    /// line code to every registered receiver.
    fn transmit(&mut self, payload: &[u8], dest: &Endpoint) -> Result<(), String> {
        let sender = self
            .sender
            .as_mut()
            .ok_or("no sender configured; use the sender command first")?;
        let codes = sender.send(payload, dest).map_err(|e| e.to_string())?;

        for code in &codes {
            for (name, receiver) in self.receivers.iter_mut() {
                match receiver.receive(code).map_err(|e| format!("{name}: {e}"))? {
                    Delivery::Complete => {
                        let written = sink::write_completed(Path::new("."), name, receiver)
                            .map_err(|e| e.to_string())?;
                        println!("{name}: {written} bytes");
                    }
                    Delivery::MoreExpected | Delivery::NotForMe => {}
                }
            }
        }
        Ok(())
    }

    pub fn sender(&self) -> Option<&Sender> {
        self.sender.as_ref()
    }

    pub fn receivers(&self) -> &[(String, Receiver)] {
        &self.receivers
    }
}
