use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use tokio::sync::Mutex as TokioMutex;

/// A trait for writing protocol frames to an output stream.
/// This abstraction allows capturing the actual output in tests.
#[async_trait]
pub trait MessageWriter: Send + Sync {
    /// Write one frame to the output stream and flush it.
    async fn write_message(&mut self, message: &str) -> Result<()>;
}

/// The default implementation of MessageWriter that writes to Stdout.
pub struct StdoutWriter {
    stdout: Stdout,
}

impl StdoutWriter {
    pub fn new(stdout: Stdout) -> Self {
        Self { stdout }
    }
}

#[async_trait]
impl MessageWriter for StdoutWriter {
    async fn write_message(&mut self, message: &str) -> Result<()> {
        self.stdout.write_all(message.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        Ok(())
    }
}

/// A mock writer implementation for testing.
#[cfg(test)]
pub struct MockWriter {
    /// Stores all frames written to this writer
    pub messages: Arc<TokioMutex<Vec<String>>>,
}

#[cfg(test)]
impl MockWriter {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(TokioMutex::new(Vec::new())),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl MessageWriter for MockWriter {
    async fn write_message(&mut self, message: &str) -> Result<()> {
        self.messages.lock().await.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_writer_records_frames_in_order() {
        let mut writer = MockWriter::new();
        let messages = writer.messages.clone();

        writer.write_message("first").await.unwrap();
        writer.write_message("second").await.unwrap();

        let recorded = messages.lock().await;
        assert_eq!(recorded.as_slice(), ["first", "second"]);
    }
}
