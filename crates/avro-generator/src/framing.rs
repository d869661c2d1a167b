//! Kafka wire framing for registry-encoded payloads.
//!
//! ```text
//! [0x00][schema id, 4 bytes big-endian][Avro binary body]
//! ```

/// Leading byte of every framed payload.
pub const MAGIC_BYTE: u8 = 0x00;

/// Bytes preceding the Avro body.
pub const HEADER_LEN: usize = 5;

/// Prefix `body` with the magic byte and the big-endian schema id.
pub fn frame_payload(schema_id: u32, body: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(HEADER_LEN + body.len());
    payload.push(MAGIC_BYTE);
    payload.extend_from_slice(&schema_id.to_be_bytes());
    payload.extend_from_slice(body);
    payload
}

/// Split a framed payload into its schema id and body.
///
/// Returns `None` when the header is missing or the magic byte is wrong.
pub fn unframe_payload(payload: &[u8]) -> Option<(u32, &[u8])> {
    if payload.len() < HEADER_LEN || payload[0] != MAGIC_BYTE {
        return None;
    }
    let id = u32::from_be_bytes([payload[1], payload[2], payload[3], payload[4]]);
    Some((id, &payload[HEADER_LEN..]))
}
