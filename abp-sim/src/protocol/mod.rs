//! Alternating-bit protocol entities and the packet format they share.
//!
//! Entity A only sends data and entity B only receives it. Both build and
//! check packets with the same [`checksum`] contract but are otherwise
//! independent state machines.

pub mod application;
pub mod packet;
pub mod receiver;
pub mod sender;

pub use application::{ApplicationLayer, Delivery, DeliveryLog};
pub use packet::{
    checksum, next_seq, Corruption, Message, Packet, Payload, CORRUPT_HEADER_VALUE,
    CORRUPT_PAYLOAD_BYTE, PAYLOAD_LEN, SEQ_MODULUS,
};
pub use receiver::{Receiver, ReceiverStats};
pub use sender::{Sender, SenderState, SenderStats};
