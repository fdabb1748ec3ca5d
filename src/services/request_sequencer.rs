use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Sequence number handed out when a request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    channel: String,
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Orders outbound requests per channel, e.g. per booking form session.
///
/// Every dispatched request takes a ticket. When its response has been read
/// the ticket is settled, and the response is only applied if no newer
/// ticket was issued on the same channel in the meantime.
///
/// Sequence numbers come from one counter shared by all channels, so a
/// channel forgotten after settling can never hand an old number out again.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next_seq: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, channel: &str) -> Ticket {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        latest.insert(channel.to_string(), seq);
        Ticket {
            channel: channel.to_string(),
            seq,
        }
    }

    /// Close out a ticket once its response is fully read. Returns whether
    /// it was still the latest on its channel. The channel is forgotten when
    /// it was, as no request on it is in flight anymore.
    pub fn settle(&self, ticket: &Ticket) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        if latest.get(&ticket.channel) != Some(&ticket.seq) {
            return false;
        }
        latest.remove(&ticket.channel);
        true
    }

    #[cfg(test)]
    fn open_channels(&self) -> usize {
        self.latest.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
