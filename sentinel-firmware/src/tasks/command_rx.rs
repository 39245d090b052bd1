//! Host serial receive task
//!
//! Splits the byte stream into lines and decodes each into a command.
//! Lines that do not decode are dropped without a trace.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use sentinel_protocol::{parse_command, LineBuffer, LineError};

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Command RX task - receives and decodes lines from the host tracker
#[embassy_executor::task]
pub async fn command_rx_task(mut rx: BufferedUartRx) {
    info!("Command RX task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match lines.feed(byte) {
                        Ok(Some(line)) => {
                            if let Ok(cmd) = parse_command(&line) {
                                COMMAND_CHANNEL.send(cmd).await;
                            }
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(LineError::Overflow) => {
                            warn!("Command line too long, discarding until newline");
                        }
                        Err(LineError::InvalidUtf8) => {
                            // Not a command
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}, dropping partial line", e);
                lines.reset();
            }
        }
    }
}
