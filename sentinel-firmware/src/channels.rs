//! Inter-task communication channels
//!
//! The serial receive task decodes command lines and hands them to the
//! motion task through a bounded channel. Commands are applied in arrival
//! order; when the channel is full the receive task waits and the UART
//! buffer absorbs the backlog.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use sentinel_protocol::Command;

/// Channel capacity for decoded commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Decoded host commands, in arrival order
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();
