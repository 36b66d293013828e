//! Pauses between tutorial steps.
//!
//! The binary waits for Enter on stdin unless `--non-interactive` is given,
//! in which case [`NoPrompt`] lets every step run straight through.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

#[async_trait::async_trait]
pub trait Prompter: Send {
    /// Whether [`Prompter::confirm`] actually waits for the user.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Waits for the user to acknowledge the previous step.
    async fn confirm(&mut self) -> std::io::Result<()>;
}

/// Waits for one line on a reader. End of input counts as confirmation, so a
/// closed stdin never blocks the run.
pub struct LinePrompter<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin + Send> LinePrompter<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LinePrompter<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> Prompter for LinePrompter<R> {
    async fn confirm(&mut self) -> std::io::Result<()> {
        let mut line = String::new();
        self.reader.read_line(&mut line).await?;
        Ok(())
    }
}

/// Never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

#[async_trait::async_trait]
impl Prompter for NoPrompt {
    fn is_interactive(&self) -> bool {
        false
    }

    async fn confirm(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
