//! Motion task
//!
//! Owns the turret and applies decoded commands one at a time.

use defmt::*;

use sentinel_core::traits::ServoDriver;

use super::BoardTurret;
use crate::channels::COMMAND_CHANNEL;

/// Motion task - drives servos and laser from host commands
#[embassy_executor::task]
pub async fn motion_task(mut turret: BoardTurret) {
    info!(
        "Motion task started (pan={}us tilt={}us)",
        turret.pan().pulse_us(),
        turret.tilt().pulse_us()
    );

    loop {
        let cmd = COMMAND_CHANNEL.receive().await;
        let frame = turret.apply(&cmd);

        trace!(
            "cmd pan={} tilt={} laser={} -> {:?}",
            cmd.pan_delta,
            cmd.tilt_delta,
            cmd.laser_on,
            frame
        );
    }
}
