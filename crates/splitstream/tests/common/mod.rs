#![allow(dead_code)]

use std::fmt::Write;

use splitstream::Splitter;

/// A small log with an empty line, non-ASCII text and a trailing newline.
pub const LOG: &str = "2024-05-01 boot ok\n\
2024-05-01 disk /dev/sda1 → mounted\n\
\n\
2024-05-02 user żółw logged in\n";

/// Buffer sizes that put chunk boundaries inside multi-byte characters as
/// well as on separators.
pub const BUFFER_SIZES: [usize; 5] = [1, 2, 3, 16, 4096];

/// Renders every remaining token, one `index: token` line each.
pub fn render(splitter: &mut Splitter) -> String {
    let mut out = String::new();
    for (i, token) in splitter.enumerate() {
        let token = token.expect("split error");
        if i > 0 {
            out.push('\n');
        }
        write!(out, "{i}: {token:?}").unwrap();
    }
    out
}
