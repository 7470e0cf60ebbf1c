use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const PROMPT: &str = "\nYou: ";

/// Prompt for one line of input. Returns `None` once stdin is closed.
pub async fn read_user_input() -> Result<Option<String>> {
    let mut output = tokio::io::stdout();
    let input = tokio::io::stdin();
    let mut reader = BufReader::new(input);
    let mut buffer = String::new();
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;
    if reader.read_line(&mut buffer).await? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}
