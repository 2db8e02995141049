// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! DER encoding of [`WireInteger`]s.
//!
//! An ASN.1 `INTEGER` is encoded in two's complement, using the fewest
//! octets possible; a [`WireInteger`] keeps its magnitude and sign apart.
//! This module converts between the two.
//!
//! Much like BoringSSL's parser, which this is modeled on, we reject all
//! non-DER BER: long-form lengths that could have been short, superfluous
//! length octets, indefinite lengths, and `INTEGER`s with redundant leading
//! `0x00` or `0xff` octets.

use alloc::vec::Vec;

use crate::mem::Alloc;
use crate::wire::Error;
use crate::wire::WireInteger;

#[cfg(test)]
#[path = "der_test.rs"]
mod test;

/// The identifier octet of a universal, primitive `INTEGER`.
const INTEGER: u8 = 0x02;

/// Parse `count` big-endian bytes.
fn be(
    buf: &mut untrusted::Reader,
    count: usize,
) -> core::result::Result<u32, Error> {
    debug_assert!(count <= 4);
    let mut val = 0;
    for _ in 0..count {
        val <<= 8;
        val |= buf.read_byte()? as u32;
    }
    Ok(val)
}

/// Parses the header and contents of a single `INTEGER`, returning its
/// contents octets, which are guaranteed to be non-empty and minimal.
fn contents<'a>(
    buf: &mut untrusted::Reader<'a>,
) -> core::result::Result<&'a [u8], Error> {
    if buf.read_byte()? != INTEGER {
        return Err(Error::BadEncoding);
    }

    // If `len` has the high bit set, then it is a "long form" length.
    let len_byte = buf.read_byte()?;
    let len = if len_byte & 0x80 == 0 {
        len_byte as usize
    } else {
        let num_bytes = len_byte & 0x7f;

        if num_bytes == 0 || num_bytes > 4 {
            // We only support lengths at most 32 bits.
            //
            // This also catches indefinite lengths, which DER forbids.
            return Err(Error::BadEncoding);
        }

        let len = be(buf, num_bytes as usize)?;
        if len < 128 {
            // This should have been a short-form encoding.
            return Err(Error::BadEncoding);
        }
        if len >> ((num_bytes - 1) * 8) == 0 {
            // Superfluous zero bytes; the encoding was not
            // minimal.
            return Err(Error::BadEncoding);
        }
        len as usize
    };

    let data = buf.read_bytes(len)?.as_slice_less_safe();
    match data {
        [] => Err(Error::BadEncoding),
        // A leading 0x00 is only permitted if the byte that follows has its
        // high bit set, to disambiguate `128 == [0x00, 0x80]` from
        // `-128 == [0x80]`; dually for a leading 0xff.
        [0x00, next, ..] if next & 0x80 == 0 => Err(Error::BadEncoding),
        [0xff, next, ..] if next & 0x80 != 0 => Err(Error::BadEncoding),
        _ => Ok(data),
    }
}

/// Replaces `bytes`, read as a big-endian unsigned integer, with its two's
/// complement modulo `2^(8 * bytes.len())`.
fn negate(bytes: &mut [u8]) {
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        let (sum, overflow) = (!*b).overflowing_add(carry as u8);
        *b = sum;
        carry = overflow;
    }
}

/// Parses a single DER `INTEGER` from `buf`.
///
/// The magnitude buffer of the returned [`WireInteger`] is obtained from
/// `alloc`, and is minimal: `0` yields an empty buffer, and negative values
/// have the `negative` flag set.
pub fn parse(
    buf: &mut untrusted::Reader,
    alloc: &impl Alloc,
) -> crate::Result<WireInteger, Error> {
    let contents = contents(buf).or_else(|e| fail!(e))?;

    if contents[0] & 0x80 == 0 {
        // Non-negative: the contents are the magnitude, save for a single
        // possible leading zero.
        let magnitude = &contents[(contents[0] == 0) as usize..];
        let mut data = alloc
            .alloc_bytes(magnitude.len())
            .or_else(|e| fail!(Error::from(e)))?;
        data.copy_from_slice(magnitude);
        return Ok(WireInteger::new(data, false));
    }

    // Negative: the magnitude is `2^(8n) - c`, where `c` is the contents read
    // as an unsigned integer. That has a leading zero octet exactly when `c`
    // is greater than `0xff00...00`, in which case it is equal to the two's
    // complement of the contents past the leading `0xff`.
    let skip = contents[0] == 0xff && contents[1..].iter().any(|&b| b != 0);
    let twos = &contents[skip as usize..];
    let mut data = alloc
        .alloc_bytes(twos.len())
        .or_else(|e| fail!(Error::from(e)))?;
    data.copy_from_slice(twos);
    negate(&mut data);
    Ok(WireInteger::new(data, true))
}

/// Parses `der`, which must consist of exactly one DER `INTEGER`.
pub fn from_der(
    der: &[u8],
    alloc: &impl Alloc,
) -> crate::Result<WireInteger, Error> {
    let mut buf = untrusted::Reader::new(untrusted::Input::from(der));
    let w = parse(&mut buf, alloc)?;
    check!(buf.at_end(), Error::BadEncoding);
    Ok(w)
}

/// The shape of the contents octets of an encoded integer.
struct Contents<'a> {
    /// The magnitude, with leading zeroes removed.
    magnitude: &'a [u8],
    negative: bool,
    /// Whether a sign octet needs to precede the (possibly negated)
    /// magnitude.
    pad: bool,
}

impl<'a> Contents<'a> {
    fn of(w: &'a WireInteger) -> Self {
        let data = w.data();
        let start = data.iter().position(|&b| b != 0).unwrap_or(data.len());
        let magnitude = &data[start..];
        let negative = w.is_negative();

        let pad = match magnitude {
            [] => false,
            [first, ..] if !negative => first & 0x80 != 0,
            // A negative magnitude `m` of `n` octets fits in `n` octets of
            // two's complement exactly when `m <= 2^(8n - 1)`.
            [first, rest @ ..] => {
                *first > 0x80 || (*first == 0x80 && rest.iter().any(|&b| b != 0))
            }
        };

        Self {
            magnitude,
            negative,
            pad,
        }
    }

    fn len(&self) -> usize {
        if self.magnitude.is_empty() {
            // Zero is encoded as a single zero octet.
            return 1;
        }
        self.magnitude.len() + self.pad as usize
    }
}

/// Returns the number of octets needed to encode a definite length of `len`.
fn length_octets(len: usize) -> usize {
    if len < 0x80 {
        return 1;
    }
    let significant = (usize::BITS - len.leading_zeros() + 7) / 8;
    1 + significant as usize
}

/// Returns the length of the DER encoding of `w`, including its header.
pub fn encoded_len(w: &WireInteger) -> usize {
    let contents = Contents::of(w).len();
    1 + length_octets(contents) + contents
}

/// Writes the DER encoding of `w` to the front of `out`, returning the number
/// of octets written.
///
/// A negative zero is encoded as zero.
pub fn write(w: &WireInteger, out: &mut [u8]) -> crate::Result<usize, Error> {
    let contents = Contents::of(w);
    let contents_len = contents.len();
    let header_len = 1 + length_octets(contents_len);
    let total = header_len + contents_len;
    check!(out.len() >= total, Error::BufferExhausted);

    out[0] = INTEGER;
    if contents_len < 0x80 {
        out[1] = contents_len as u8;
    } else {
        let octets = header_len - 2;
        out[1] = 0x80 | octets as u8;
        let be = contents_len.to_be_bytes();
        out[2..header_len].copy_from_slice(&be[be.len() - octets..]);
    }

    let body = &mut out[header_len..total];
    if contents.magnitude.is_empty() {
        body[0] = 0;
        return Ok(total);
    }

    let (sign, rest) = body.split_at_mut(contents.pad as usize);
    rest.copy_from_slice(contents.magnitude);
    if contents.negative {
        negate(rest);
        sign.iter_mut().for_each(|b| *b = 0xff);
    } else {
        sign.iter_mut().for_each(|b| *b = 0x00);
    }
    Ok(total)
}

/// Encodes `w` into a new buffer obtained from `alloc`.
pub fn to_der(
    w: &WireInteger,
    alloc: &impl Alloc,
) -> crate::Result<Vec<u8>, Error> {
    let mut out = alloc
        .alloc_bytes(encoded_len(w))
        .or_else(|e| fail!(Error::from(e)))?;
    write(w, &mut out)?;
    Ok(out)
}
