//! Local audible cue.

use std::io::Write;

/// Ring the terminal bell. Write errors are ignored.
pub fn ring_bell() {
    let mut out = std::io::stdout().lock();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}
