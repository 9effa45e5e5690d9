//! Payload layout ordering and per-message CRC seeds.
//!
//! The wire format pads nothing; fields are reordered so every element
//! lands naturally aligned. Parser and builder both iterate the
//! layout-ordered field list, and the CRC seed is derived from that
//! same order - peers whose schemas disagree produce different seeds
//! and reject each other's frames at checksum time.

use std::cmp::Reverse;

use crate::codec::X25;

use super::catalog::FieldDescriptor;

/// Sort fields into wire-layout order: wider elements first, source
/// position breaking ties. The sort is stable, so equal widths keep
/// their schema order.
pub(crate) fn layout_order(fields: &mut [FieldDescriptor]) {
    fields.sort_by_key(|field| Reverse(field.type_size()));
}

/// Fold the canonical message signature into a one-byte CRC seed.
///
/// The signature accumulates the message name and, for each field in
/// layout order, its wire type token and name - every token terminated
/// by a single space. Array fields additionally contribute their
/// element count as one raw byte.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn crc_seed(name: &str, fields: &[FieldDescriptor]) -> u8 {
    let mut crc = X25::new();
    crc.accumulate_slice(name.as_bytes());
    crc.accumulate(b' ');
    for field in fields {
        crc.accumulate_slice(field.base_type().wire_token().as_bytes());
        crc.accumulate(b' ');
        crc.accumulate_slice(field.name().as_bytes());
        crc.accumulate(b' ');
        if let Some(length) = field.array_length() {
            crc.accumulate(length as u8);
        }
    }
    let crc = crc.value();
    ((crc & 0xFF) ^ (crc >> 8)) as u8
}
