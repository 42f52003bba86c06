//! STUN binding request used as the reachability probe.
//!
//! Only the 20-byte header is ever sent. The transaction ID is a fixed
//! literal, so every probe is bit-identical: any UDP answer counts, the
//! answer is never matched against the request.

/// STUN message type of a binding request
pub const BINDING_REQUEST_TYPE: u16 = 0x0001;

/// Fixed STUN magic cookie
pub const MAGIC_COOKIE: u32 = 0x2112_A442;

/// Transaction ID carried by every probe
pub const TRANSACTION_ID: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Size of the header, which is the whole packet here
pub const HEADER_LEN: usize = 20;

/// Size of the buffer responses are read into
pub const RESPONSE_BUFFER_LEN: usize = 1024;

/// The binding request sent to every target
pub const BINDING_REQUEST: [u8; HEADER_LEN] = binding_request();

const fn binding_request() -> [u8; HEADER_LEN] {
    let mut packet = [0u8; HEADER_LEN];

    let kind = BINDING_REQUEST_TYPE.to_be_bytes();
    packet[0] = kind[0];
    packet[1] = kind[1];
    // bytes 2..4: message length, no attributes

    let cookie = MAGIC_COOKIE.to_be_bytes();
    let mut i = 0;
    while i < cookie.len() {
        packet[4 + i] = cookie[i];
        i += 1;
    }

    let mut i = 0;
    while i < TRANSACTION_ID.len() {
        packet[8 + i] = TRANSACTION_ID[i];
        i += 1;
    }

    packet
}
