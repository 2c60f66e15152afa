//! Counters for observable pipeline behavior.
//!
//! Plain structs with explicit updates at each pipeline step; the app
//! prints a report after a run. Not thread-safe, like everything else
//! here: the whole stack is a single-threaded, synchronous call chain.

/// Counters for one sender pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SenderStats {
    /// Payloads handed to `send`
    pub payloads_sent: u64,

    /// Fragments produced across all payloads
    pub fragments_sent: u64,

    /// Raw payload bytes handed to `send`
    pub payload_bytes: u64,

    /// Line-code characters emitted on the wire
    pub code_chars_emitted: u64,
}

impl SenderStats {
    /// Human-readable summary.
    pub fn report(&self) -> String {
        format!(
            "sender: {} payload(s), {} fragment(s), {} payload bytes, {} code chars",
            self.payloads_sent, self.fragments_sent, self.payload_bytes, self.code_chars_emitted
        )
    }
}

/// Counters for one receiver pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiverStats {
    /// Line codes offered to `receive`
    pub codes_received: u64,

    /// Codes that decoded but were addressed elsewhere at some stage
    pub no_match: u64,

    /// Fragments accepted into the reassembly buffer
    pub fragments_accepted: u64,

    /// Messages completed (terminal fragment seen)
    pub messages_completed: u64,

    /// Bytes handed out via `take_completed`
    pub bytes_delivered: u64,
}

impl ReceiverStats {
    /// Human-readable summary.
    pub fn report(&self) -> String {
        format!(
            "receiver: {} code(s), {} no-match, {} fragment(s), {} message(s), {} bytes delivered",
            self.codes_received,
            self.no_match,
            self.fragments_accepted,
            self.messages_completed,
            self.bytes_delivered
        )
    }
}
