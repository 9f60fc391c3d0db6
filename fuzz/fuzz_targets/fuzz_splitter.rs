#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splitstream::{SeparatorSet, Splitter, TextEncoding};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    separators: Vec<char>,
    buffer_size: u8,
    reads: Vec<u8>,
    utf16: bool,
}

/// Serves the payload in the fuzzer-chosen read sizes.
struct Chunks {
    payload: io::Cursor<Vec<u8>>,
    reads: Vec<u8>,
    next: usize,
}

impl Read for Chunks {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = match self.reads.get(self.next % self.reads.len().max(1)) {
            Some(&n) => usize::from(n).max(1),
            None => buf.len(),
        };
        self.next += 1;
        let len = size.min(buf.len());
        self.payload.read(&mut buf[..len])
    }
}

fuzz_target!(|input: Input| {
    let Ok(separators) = SeparatorSet::new(input.separators.iter().copied()) else {
        assert!(input.separators.is_empty());
        return;
    };

    let (bytes, encoding) = if input.utf16 {
        let bytes = input.text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        (bytes, TextEncoding::UTF_16LE)
    } else {
        (input.text.clone().into_bytes(), TextEncoding::UTF_8)
    };
    let reader = Chunks {
        payload: io::Cursor::new(bytes),
        reads: input.reads,
        next: 0,
    };

    let mut splitter = Splitter::from_reader_with_encoding(reader, encoding, separators);
    splitter
        .set_buffer_size(usize::from(input.buffer_size).max(1))
        .unwrap();
    let tokens = splitter.drain_all().unwrap();

    let expected: Vec<&str> = input
        .text
        .split(|c| input.separators.contains(&c))
        .collect();
    assert_eq!(tokens, expected);
    assert!(splitter.is_finished());
});
