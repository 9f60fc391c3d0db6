use std::{
    io::{self, Read},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// A reader that hands out its payload in the given read sizes, cycling
/// through `sizes`, regardless of how large the caller's buffer is.
pub(crate) struct ChunkedReader {
    payload: Vec<u8>,
    pos: usize,
    sizes: Vec<usize>,
    next_size: usize,
}

impl ChunkedReader {
    pub(crate) fn new(payload: impl Into<Vec<u8>>, sizes: &[usize]) -> Self {
        let sizes: Vec<usize> = sizes.iter().map(|&s| s.max(1)).collect();
        Self {
            payload: payload.into(),
            pos: 0,
            sizes: if sizes.is_empty() { vec![1] } else { sizes },
            next_size: 0,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = self.sizes[self.next_size % self.sizes.len()];
        self.next_size += 1;
        let n = size.min(buf.len()).min(self.payload.len() - self.pos);
        buf[..n].copy_from_slice(&self.payload[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// A reader that serves `payload` and then fails instead of reporting EOF.
pub(crate) struct FailingReader {
    payload: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub(crate) fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: io::Cursor::new(payload.into()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.payload.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away")),
            n => Ok(n),
        }
    }
}

/// A reader that counts how often it is called.
pub(crate) struct CountingReader {
    inner: io::Cursor<Vec<u8>>,
    reads: Arc<AtomicUsize>,
}

impl CountingReader {
    pub(crate) fn new(payload: impl Into<Vec<u8>>) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let reader = Self {
            inner: io::Cursor::new(payload.into()),
            reads: Arc::clone(&reads),
        };
        (reader, reads)
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(buf)
    }
}

/// Splits the way `str::split` does for a set of separator characters.
pub(crate) fn reference_split(text: &str, separators: &[char]) -> Vec<String> {
    text.split(|c| separators.contains(&c))
        .map(str::to_owned)
        .collect()
}
