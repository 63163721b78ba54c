//! Line input for interactive prompts
//!
//! Lines are read on a dedicated OS thread and handed over through a tokio
//! channel. Dropping a pending `next_line()` never leaves a read parked on
//! the runtime's blocking pool, so Ctrl+C can end the process while the
//! user has not pressed Enter.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

pub struct LineReader {
    lines: mpsc::Receiver<io::Result<String>>,
}

impl LineReader {
    /// Read lines from the process stdin
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(io::BufReader::new(io::stdin()))
    }

    /// Read lines from any blocking reader on a background thread
    ///
    /// The thread exits at EOF, on a read error, or once the reader is dropped
    /// and the next line arrives.
    pub fn spawn<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        thread::Builder::new()
            .name("nwo-stdin".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    let failed = line.is_err();
                    if tx.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
                debug!("Input reader thread finished");
            })?;
        Ok(Self { lines: rx })
    }

    /// Next line without its terminator; `Ok(None)` at EOF
    ///
    /// Cancel safe: a line that arrives after the future is dropped is kept
    /// for the next call.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.recv().await.transpose()
    }
}
