//! Growable byte sink for encoders.
//!
//! [`ChunkedSink`] is the [`Write`](std::io::Write) target every encoder
//! writes into. It starts with one chunk of capacity and, whenever a write
//! would overflow, grows to `written + incoming + GROW_CHUNK`. Growth is
//! fallible: an exhausted heap surfaces as an `OutOfMemory` I/O error that
//! the encoder reports, instead of aborting the process.

use std::io;

/// Capacity added past the incoming write whenever the sink grows.
pub const GROW_CHUNK: usize = 4096;

/// Growable in-memory sink for encoded bytes.
#[derive(Debug)]
pub struct ChunkedSink {
    buf: Vec<u8>,
}

impl ChunkedSink {
    /// Create a sink with `GROW_CHUNK` bytes of capacity.
    pub fn new() -> io::Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(GROW_CHUNK).map_err(out_of_memory)?;
        Ok(Self { buf })
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current capacity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Take the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl io::Write for ChunkedSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > self.buf.capacity() {
            self.buf
                .try_reserve_exact(data.len() + GROW_CHUNK)
                .map_err(out_of_memory)?;
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn out_of_memory(err: std::collections::TryReserveError) -> io::Error {
    io::Error::new(io::ErrorKind::OutOfMemory, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn starts_with_one_chunk() {
        let sink = ChunkedSink::new().unwrap();
        assert!(sink.is_empty());
        assert!(sink.capacity() >= GROW_CHUNK);
    }

    #[test]
    fn small_writes_do_not_grow() {
        let mut sink = ChunkedSink::new().unwrap();
        let cap = sink.capacity();
        for _ in 0..16 {
            sink.write_all(&[0xAB; 100]).unwrap();
        }
        assert_eq!(sink.len(), 1600);
        assert_eq!(sink.capacity(), cap);
    }

    #[test]
    fn overflowing_write_grows_past_incoming() {
        let mut sink = ChunkedSink::new().unwrap();
        sink.write_all(&[1; 4000]).unwrap();
        sink.write_all(&[2; 5000]).unwrap();
        assert_eq!(sink.len(), 9000);
        assert!(sink.capacity() >= 9000 + GROW_CHUNK);
        let bytes = sink.into_vec();
        assert_eq!(bytes[3999], 1);
        assert_eq!(bytes[4000], 2);
        assert_eq!(bytes[8999], 2);
    }
}
