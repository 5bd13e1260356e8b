//! Frame encoder and decoder
//!
//! Encoding checks the field bounds the decoder enforces, so anything
//! `encode` accepts is guaranteed to come back out of `decode` unchanged
//! (as long as the frame reaches the minimum size). Decoding is strict on
//! length and terminators but lenient on ordinals: unknown commands and
//! kinds are surfaced, not rejected.

use bytes::{BufMut, Bytes, BytesMut};

use super::constants::{
    HEADER_SIZE, MAX_DATA_SIZE, MAX_FRAME_SIZE, MAX_NICKNAME_SIZE, MIN_FRAME_SIZE, TERMINATOR,
};
use super::message::{ChatMessage, Command, Kind};
use crate::error::{CodecError, Field};

/// Encode a message into a new buffer
pub fn encode(message: &ChatMessage) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::with_capacity(encoded_len(message));
    encode_into(message, &mut buf)?;
    Ok(buf.freeze())
}

/// Append the encoding of a message to `buf`
///
/// Nothing is written if the message is rejected.
pub fn encode_into(message: &ChatMessage, buf: &mut BytesMut) -> Result<(), CodecError> {
    check_field(message.nickname(), MAX_NICKNAME_SIZE, Field::Nickname)?;
    check_field(message.data(), MAX_DATA_SIZE, Field::Data)?;

    buf.reserve(encoded_len(message));
    buf.put_u8(message.command().as_byte());
    buf.put_u8(message.kind().as_byte());
    buf.put_slice(message.nickname().as_bytes());
    buf.put_u8(TERMINATOR);
    buf.put_slice(message.data().as_bytes());
    buf.put_u8(TERMINATOR);
    Ok(())
}

/// Number of bytes `encode` produces for this message
pub fn encoded_len(message: &ChatMessage) -> usize {
    HEADER_SIZE + message.nickname().len() + 1 + message.data().len() + 1
}

/// Decode a single frame
pub fn decode(buf: &[u8]) -> Result<ChatMessage, CodecError> {
    if !(MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&buf.len()) {
        return Err(CodecError::FrameSize {
            len: buf.len(),
            min: MIN_FRAME_SIZE,
            max: MAX_FRAME_SIZE,
        });
    }

    let command = Command::from_byte(buf[0]);
    let kind = Kind::from_byte(buf[1]);

    let (nickname, data_start) =
        read_terminated(buf, HEADER_SIZE, MAX_NICKNAME_SIZE, Field::Nickname)?;
    // Anything after the data terminator is ignored
    let (data, _) = read_terminated(buf, data_start, MAX_DATA_SIZE, Field::Data)?;

    Ok(ChatMessage::new(command, kind, nickname, data))
}

/// Read a zero-terminated field starting at `start`
///
/// The terminator must appear within `max` content bytes. Returns the
/// field text and the offset right after its terminator.
fn read_terminated(
    buf: &[u8],
    start: usize,
    max: usize,
    field: Field,
) -> Result<(String, usize), CodecError> {
    let end = buf.len().min(start.saturating_add(max + 1));
    let window = buf.get(start..end).unwrap_or(&[]);

    let len = window
        .iter()
        .position(|&b| b == TERMINATOR)
        .ok_or(CodecError::FieldTooLong { field, max })?;

    Ok((ascii_lossy(&window[..len]), start + len + 1))
}

fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

fn check_field(value: &str, max: usize, field: Field) -> Result<(), CodecError> {
    if value.len() > max {
        return Err(CodecError::FieldTooLong { field, max });
    }
    if let Some(&byte) = value
        .as_bytes()
        .iter()
        .find(|&&b| b == TERMINATOR || !b.is_ascii())
    {
        return Err(CodecError::InvalidField { field, byte });
    }
    Ok(())
}
