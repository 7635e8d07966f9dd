//! RFC 1035 §4.2.2 framing: each message is preceded by its length as a
//! big-endian `u16`. Shared by the TCP listener and the TLS upstream.

use dotproxy_domain::DomainError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const MAX_TCP_MESSAGE_SIZE: usize = 65535;

/// Prefixes `message_bytes` with its two-byte length.
pub fn frame_message(message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        DomainError::SerializationFailed(format!(
            "message too large for TCP framing: {} bytes (max {})",
            message_bytes.len(),
            MAX_TCP_MESSAGE_SIZE
        ))
    })?;

    let mut framed = Vec::with_capacity(message_bytes.len() + 2);
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(message_bytes);
    Ok(framed)
}

pub async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let framed = frame_message(message_bytes)?;

    stream
        .write_all(&framed)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("failed to flush stream: {}", e)))?;

    Ok(())
}

pub async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to read message length: {}", e)))?;

    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream
        .read_exact(&mut message)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to read message body: {}", e)))?;

    Ok(message)
}
