//! Buffered capture of a child's stdout and stderr.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const READ_CHUNK_SIZE: usize = 8192;

/// Stream type (stdout or stderr)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Stdout => write!(f, "stdout"),
            StreamType::Stderr => write!(f, "stderr"),
        }
    }
}

/// Append-only byte buffer shared between a reader task and its readers.
///
/// Clones share the same storage. Reads return a snapshot; the reader task
/// may keep appending afterwards.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, bytes: &[u8]) {
        self.inner.lock().extend_from_slice(bytes);
    }

    /// Copy of everything captured so far.
    pub fn snapshot(&self) -> Vec<u8> {
        self.inner.lock().clone()
    }

    /// Captured output as text, with invalid UTF-8 replaced.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Spawn a task copying `stream` into `buffer` until EOF.
///
/// Returns `None` when there is no stream to read (it was not piped).
pub(crate) fn spawn_reader<R>(
    stream: Option<R>,
    buffer: OutputBuffer,
    stream_type: StreamType,
    label: String,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let stream = stream?;
    Some(tokio::spawn(async move {
        drain(stream, &buffer, stream_type, &label).await;
    }))
}

async fn drain<R>(mut stream: R, buffer: &OutputBuffer, stream_type: StreamType, label: &str)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => {
                debug!("{} {} reached EOF ({} bytes)", label, stream_type, buffer.len());
                break;
            }
            Ok(n) => buffer.append(&chunk[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Error reading {} from {}: {}", stream_type, label, e);
                break;
            }
        }
    }
}
