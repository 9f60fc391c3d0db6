#![expect(missing_docs)]

mod common;

use std::io::Write;

use splitstream::{ErrorKind, SeparatorSet, Splitter, TextEncoding};
use tempfile::NamedTempFile;

use crate::common::{LOG, render};

fn temp_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn splits_a_utf8_file() {
    let file = temp_file(LOG.as_bytes());
    let mut splitter = Splitter::open(file.path(), SeparatorSet::newlines()).unwrap();
    splitter.set_buffer_size(3).unwrap();
    assert_eq!(
        splitter.drain_all().unwrap(),
        [
            "2024-05-01 boot ok",
            "2024-05-01 disk /dev/sda1 → mounted",
            "",
            "2024-05-02 user żółw logged in",
            "",
        ]
    );
    assert!(splitter.is_finished());
}

#[test]
fn splits_a_utf16_file() {
    let bytes: Vec<u8> = "kot;pies;żółw".encode_utf16().flat_map(u16::to_le_bytes).collect();
    let file = temp_file(&bytes);
    let mut splitter = Splitter::open_with_encoding(
        file.path(),
        TextEncoding::for_label("utf-16le").unwrap(),
        SeparatorSet::from(';'),
    )
    .unwrap();
    splitter.set_buffer_size(5).unwrap();
    assert_eq!(splitter.drain_all().unwrap(), ["kot", "pies", "żółw"]);
}

#[test]
fn large_file_streams_in_small_chunks() {
    let line = "ąęść,".repeat(1_000);
    let file = temp_file(line.as_bytes());
    let mut splitter = Splitter::open(file.path(), SeparatorSet::from(',')).unwrap();
    splitter.set_buffer_size(13).unwrap();
    let mut count = 0;
    for token in &mut splitter {
        let token = token.unwrap();
        if count < 1_000 {
            assert_eq!(token, "ąęść");
        } else {
            assert_eq!(token, "");
        }
        count += 1;
    }
    assert_eq!(count, 1_001);
}

#[test]
fn abandoning_enumeration_releases_the_file() {
    let file = temp_file(LOG.as_bytes());
    let mut splitter = Splitter::open(file.path(), SeparatorSet::newlines()).unwrap();
    splitter.set_buffer_size(4).unwrap();
    assert_eq!(
        splitter.next_token().unwrap().as_deref(),
        Some("2024-05-01 boot ok")
    );
    drop(splitter);
    file.close().unwrap();
}

#[test]
fn opened_file_reads_like_a_string() {
    let file = temp_file(LOG.as_bytes());
    let mut from_file = Splitter::open(file.path(), SeparatorSet::newlines()).unwrap();
    let mut from_text = Splitter::from_text(LOG, SeparatorSet::newlines());
    assert_eq!(render(&mut from_file), render(&mut from_text));
}

#[test]
fn directory_is_not_a_readable_source() {
    let dir = tempfile::tempdir().unwrap();
    // Opening a directory succeeds on some platforms; reading it never does.
    match Splitter::open(dir.path(), SeparatorSet::newlines()) {
        Ok(mut splitter) => {
            let err = splitter.next_token().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SourceReadFailure);
            assert!(splitter.is_finished());
        }
        Err(err) => assert_eq!(err.kind(), ErrorKind::SourceUnavailable),
    }
}
