use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::debug;

/// Scanline countdown on a side channel (normally stderr).
///
/// Each row announces itself by rewriting the same line with the number of
/// rows not yet started. Safe to share across rendering threads.
pub struct Progress<W> {
    remaining: AtomicUsize,
    sink: Mutex<W>,
}

impl Progress<io::Sink> {
    /// A progress reporter that discards everything.
    pub fn silent(rows: usize) -> Self {
        Progress::new(rows, io::sink())
    }
}

impl<W: Write + Send> Progress<W> {
    pub fn new(rows: usize, sink: W) -> Self {
        Progress {
            remaining: AtomicUsize::new(rows),
            sink: Mutex::new(sink),
        }
    }

    /// Called as each row starts.
    pub fn scanline(&self) {
        let remaining = self.remaining.fetch_sub(1, Ordering::Relaxed);
        self.emit(format_args!("\rScanlines remaining: {} ", remaining));
    }

    pub fn finish(&self) {
        self.emit(format_args!("\rDone.                 \n"));
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    // Progress output is best-effort; a broken side channel never fails a
    // render.
    fn emit(&self, args: std::fmt::Arguments<'_>) {
        let mut sink = match self.sink.lock() {
            Ok(s) => s,
            Err(e) => e.into_inner(),
        };
        if let Err(e) = sink.write_fmt(args).and_then(|_| sink.flush()) {
            debug!("progress write failed: {}", e);
        }
    }
}
