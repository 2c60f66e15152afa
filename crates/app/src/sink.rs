//! File sink: persists a completed message and resets the receiver.
//!
//! After a completion signal the assembled buffer is taken out of the
//! receiver (which returns its reassembler to idle) and written as a
//! binary file named after the receiver.

use stacksim_core::stack::Receiver;
use std::io::{self, Write};
use std::path::Path;

/// Write the receiver's completed message to `<dir>/<name>.bin`.
///
/// Returns the number of bytes written. Taking the message resets the
/// reassembler, so the receiver is immediately ready for the next one.
pub fn write_completed(dir: &Path, name: &str, receiver: &mut Receiver) -> io::Result<u64> {
    let message = receiver
        .take_completed()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let path = dir.join(format!("{name}.bin"));
    let mut file = std::fs::File::create(path)?;
    file.write_all(&message)?;
    Ok(message.len() as u64)
}
