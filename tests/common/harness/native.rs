//! Native-messaging frame helpers.

use pagenote::messaging::native::{read_frame, write_frame};
use serde_json::Value;
use std::io::Cursor;

/// Encodes JSON values as consecutive length-prefixed frames.
pub fn encode_frames(values: &[Value]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for value in values {
        let payload = serde_json::to_vec(value).expect("Failed to encode frame");
        write_frame(&mut bytes, &payload).expect("Failed to write frame");
    }
    bytes
}

/// Decodes every frame in `bytes` as JSON.
pub fn decode_frames(bytes: Vec<u8>) -> Vec<Value> {
    let mut reader = Cursor::new(bytes);
    let mut values = Vec::new();
    while let Some(frame) = read_frame(&mut reader).expect("Failed to read frame") {
        values.push(serde_json::from_slice(&frame).expect("Frame was not JSON"));
    }
    values
}
