//! Bounded MessagePack reader.
//!
//! Only the top-level map is interpreted. Nested values are walked to find
//! their extent and handed back as raw byte spans.

use crate::config::DecodeLimits;
use crate::domain::errors::DecodeError;

/// Cursor over one encoded record.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: DecodeLimits,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            buf,
            pos: 0,
            limits,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read a map header and return its entry count.
    pub fn map_header(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let tag = self.byte()?;
        let len = match tag {
            0x80..=0x8f => (tag & 0x0f) as usize,
            0xde => self.be_len(2)?,
            0xdf => self.be_len(4)?,
            found => return Err(DecodeError::NotAMap { found }),
        };
        self.enter(offset, 0)?;
        self.check_container(offset, len, 2)?;
        Ok(len)
    }

    /// Read a string map key.
    pub fn key(&mut self) -> Result<String, DecodeError> {
        let offset = self.pos;
        let tag = self.byte()?;
        let len = match tag {
            0xa0..=0xbf => (tag & 0x1f) as usize,
            0xd9 => self.be_len(1)?,
            0xda => self.be_len(2)?,
            0xdb => self.be_len(4)?,
            found => return Err(DecodeError::NonStringKey { offset, found }),
        };
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::InvalidKey { offset })
    }

    /// Consume one complete value and return its exact bytes.
    pub fn value_span(&mut self, depth: usize) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;
        self.skip_value(depth)?;
        Ok(&self.buf[start..self.pos])
    }

    /// Fail unless the whole input was consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.pos == self.buf.len() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes {
                offset: self.pos,
                remaining: self.remaining(),
            })
        }
    }

    /// Walk one value without recursing.
    ///
    /// `pending` holds the items still owed by each open container, innermost
    /// last, so nesting costs heap rather than stack.
    fn skip_value(&mut self, depth: usize) -> Result<(), DecodeError> {
        let mut pending: Vec<usize> = Vec::new();
        loop {
            let items = self.skip_header(depth + pending.len())?;
            if items > 0 {
                pending.push(items);
                continue;
            }
            // One value complete; close every container it finished.
            loop {
                let Some(left) = pending.last_mut() else {
                    return Ok(());
                };
                *left -= 1;
                if *left > 0 {
                    break;
                }
                pending.pop();
            }
        }
    }

    /// Consume one value header and any scalar payload.
    ///
    /// Returns the number of child items a container header announces, 0 for
    /// scalars and empty containers.
    fn skip_header(&mut self, depth: usize) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let tag = self.byte()?;
        let scalar = |result: Result<(), DecodeError>| result.map(|()| 0usize);
        match tag {
            // positive fixint, negative fixint, nil, false, true
            0x00..=0x7f | 0xe0..=0xff | 0xc0 | 0xc2 | 0xc3 => Ok(0),
            0x80..=0x8f => self.container(offset, (tag & 0x0f) as usize, 2, depth),
            0x90..=0x9f => self.container(offset, (tag & 0x0f) as usize, 1, depth),
            0xa0..=0xbf => scalar(self.skip_bytes((tag & 0x1f) as usize)),
            0xc1 => Err(DecodeError::ReservedType { offset, found: tag }),
            // bin / str
            0xc4 | 0xd9 => {
                let len = self.be_len(1)?;
                scalar(self.skip_bytes(len))
            }
            0xc5 | 0xda => {
                let len = self.be_len(2)?;
                scalar(self.skip_bytes(len))
            }
            0xc6 | 0xdb => {
                let len = self.be_len(4)?;
                scalar(self.skip_bytes(len))
            }
            // ext: length, then one type byte, then payload
            0xc7 => {
                let len = self.be_len(1)?;
                scalar(self.skip_bytes(len + 1))
            }
            0xc8 => {
                let len = self.be_len(2)?;
                scalar(self.skip_bytes(len + 1))
            }
            0xc9 => {
                let len = self.be_len(4)?;
                scalar(self.skip_bytes(len + 1))
            }
            0xca => scalar(self.skip_bytes(4)),
            0xcb => scalar(self.skip_bytes(8)),
            0xcc | 0xd0 => scalar(self.skip_bytes(1)),
            0xcd | 0xd1 => scalar(self.skip_bytes(2)),
            0xce | 0xd2 => scalar(self.skip_bytes(4)),
            0xcf | 0xd3 => scalar(self.skip_bytes(8)),
            // fixext 1/2/4/8/16
            0xd4..=0xd8 => scalar(self.skip_bytes(1 + (1usize << (tag - 0xd4)))),
            0xdc => {
                let len = self.be_len(2)?;
                self.container(offset, len, 1, depth)
            }
            0xdd => {
                let len = self.be_len(4)?;
                self.container(offset, len, 1, depth)
            }
            0xde => {
                let len = self.be_len(2)?;
                self.container(offset, len, 2, depth)
            }
            0xdf => {
                let len = self.be_len(4)?;
                self.container(offset, len, 2, depth)
            }
        }
    }

    fn container(
        &self,
        offset: usize,
        len: usize,
        per_entry: usize,
        depth: usize,
    ) -> Result<usize, DecodeError> {
        self.enter(offset, depth)?;
        self.check_container(offset, len, per_entry)?;
        Ok(len * per_entry)
    }

    fn enter(&self, offset: usize, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.limits.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                offset,
                max: self.limits.max_depth,
            });
        }
        Ok(())
    }

    fn check_container(
        &self,
        offset: usize,
        len: usize,
        per_entry: usize,
    ) -> Result<(), DecodeError> {
        if len > self.limits.max_container_len {
            return Err(DecodeError::ContainerTooLarge {
                offset,
                len,
                max: self.limits.max_container_len,
            });
        }
        // Every item needs at least one byte.
        let items = len * per_entry;
        if items > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: items - self.remaining(),
            });
        }
        Ok(())
    }

    fn byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn be_len(&mut self, width: usize) -> Result<usize, DecodeError> {
        let raw = self.take(width)?;
        Ok(raw.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize))
    }

    fn skip_bytes(&mut self, len: usize) -> Result<(), DecodeError> {
        self.take(len).map(|_| ())
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

/// Payload of a binary value that spans all of `raw`.
pub fn bin_payload(raw: &[u8]) -> Option<&[u8]> {
    let (&tag, rest) = raw.split_first()?;
    let width = match tag {
        0xc4 => 1,
        0xc5 => 2,
        0xc6 => 4,
        _ => return None,
    };
    if rest.len() < width {
        return None;
    }
    let (len_bytes, payload) = rest.split_at(width);
    let len = len_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize);
    (payload.len() == len).then_some(payload)
}
