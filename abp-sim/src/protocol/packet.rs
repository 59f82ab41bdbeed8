//! Packet wire shape and checksum.
//!
//! ```text
//! +----------+----------+------------+----------------------+
//! |  seqnum  |  acknum  |  checksum  |  payload (20 bytes)  |
//! +----------+----------+------------+----------------------+
//! ```
//!
//! The checksum is the plain sum of `seqnum`, `acknum` and every payload
//! byte. There is no modular reduction: with 0/1 header fields the largest
//! legitimate sum is `2 + 20 * 255`, far below the field width.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size of every message and packet payload.
pub const PAYLOAD_LEN: usize = 20;

/// Byte written into the first payload byte by payload corruption.
pub const CORRUPT_PAYLOAD_BYTE: u8 = b'Z';

/// Out-of-band value written into a header field by header corruption.
pub const CORRUPT_HEADER_VALUE: u32 = 999_999;

/// Number of distinct sequence numbers in the alternating-bit protocol.
pub const SEQ_MODULUS: u32 = 2;

/// Fixed-size application payload with value semantics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    /// An all-zero payload, carried by acknowledgements.
    pub const EMPTY: Payload = Payload([0; PAYLOAD_LEN]);

    /// Wraps raw bytes.
    pub fn new(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }

    /// A payload made of `byte` repeated.
    pub fn filled(byte: u8) -> Self {
        Self([byte; PAYLOAD_LEN])
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    fn byte_sum(&self) -> i64 {
        self.0.iter().map(|&b| i64::from(b)).sum()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Data unit handed from the application to the sending protocol entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Message {
    /// Opaque application data.
    pub data: Payload,
}

impl Message {
    /// Creates a message carrying `data`.
    pub fn new(data: Payload) -> Self {
        Self { data }
    }
}

/// Data unit exchanged between protocol entities through the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Packet {
    /// Sequence number, 0 or 1 unless corrupted.
    pub seqnum: u32,
    /// Acknowledgement number, 0 or 1 unless corrupted.
    pub acknum: u32,
    /// Sum over the other fields, see [`checksum`].
    pub checksum: i64,
    /// Application data, or all zeroes for acknowledgements.
    pub payload: Payload,
}

/// One of the mutually exclusive ways the channel damages a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corruption {
    /// Overwrite the first payload byte.
    Payload,
    /// Overwrite the sequence number.
    SeqNum,
    /// Overwrite the acknowledgement number.
    AckNum,
}

impl Corruption {
    /// Chooses the mutation from a uniform sample in `[0, 1)`:
    /// payload below 0.75, seqnum below 0.875, acknum above.
    pub fn from_sample(x: f64) -> Self {
        if x < 0.75 {
            Corruption::Payload
        } else if x < 0.875 {
            Corruption::SeqNum
        } else {
            Corruption::AckNum
        }
    }
}

/// Sums `seqnum`, `acknum` and every payload byte. The stored checksum is ignored.
pub fn checksum(packet: &Packet) -> i64 {
    i64::from(packet.seqnum) + i64::from(packet.acknum) + packet.payload.byte_sum()
}

/// Adds one to a sequence number, wrapping at [`SEQ_MODULUS`].
pub fn next_seq(seq: u32) -> u32 {
    (seq + 1) % SEQ_MODULUS
}

impl Packet {
    /// Builds a packet and stamps its checksum.
    pub fn new(seqnum: u32, acknum: u32, payload: Payload) -> Self {
        let mut packet = Self {
            seqnum,
            acknum,
            checksum: 0,
            payload,
        };
        packet.checksum = checksum(&packet);
        packet
    }

    /// Builds an acknowledgement, which carries an empty payload.
    pub fn ack(seqnum: u32, acknum: u32) -> Self {
        Self::new(seqnum, acknum, Payload::EMPTY)
    }

    /// Returns `true` if the stored checksum matches a recomputation.
    pub fn is_intact(&self) -> bool {
        self.checksum == checksum(self)
    }

    /// Applies `corruption` in place. The stored checksum is left stale.
    ///
    /// Payload corruption writes [`CORRUPT_PAYLOAD_BYTE`], or its complement
    /// when the byte already holds that value, so the byte always changes.
    pub fn corrupt(&mut self, corruption: Corruption) {
        match corruption {
            Corruption::Payload => {
                let first = &mut self.payload.0[0];
                *first = if *first == CORRUPT_PAYLOAD_BYTE {
                    !CORRUPT_PAYLOAD_BYTE
                } else {
                    CORRUPT_PAYLOAD_BYTE
                };
            }
            Corruption::SeqNum => self.seqnum = CORRUPT_HEADER_VALUE,
            Corruption::AckNum => self.acknum = CORRUPT_HEADER_VALUE,
        }
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seq: {}, ack: {}, check: {} {}",
            self.seqnum, self.acknum, self.checksum, self.payload
        )
    }
}
