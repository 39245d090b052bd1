//! Diagnostic sweep task
//!
//! Walks each servo across its travel in both directions, reporting
//! progress on the serial link, then centres the turret and holds.
//! Host commands are not read in this mode.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Timer;
use embedded_io_async::Write;

use sentinel_core::config::CalibrationConfig;
use sentinel_core::motion::{SweepEvent, SweepPlan};

use super::BoardTurret;

/// Calibration task - runs the servo sweep once
#[embassy_executor::task]
pub async fn calibration_task(
    mut turret: BoardTurret,
    mut tx: BufferedUartTx,
    config: CalibrationConfig,
) {
    info!(
        "Calibration task started (step={}deg, dwell={}ms)",
        config.step_deg, config.dwell_ms
    );

    let plan = SweepPlan::new(turret.config(), config.step_deg);

    for event in plan {
        match event {
            SweepEvent::Announce(text) => {
                info!("{=str}", text.trim_end());
                if let Err(e) = tx.write_all(text.as_bytes()).await {
                    warn!("Failed to send sweep progress: {:?}", e);
                }
            }
            SweepEvent::Move { axis, angle_deg } => {
                let width_us = turret.move_axis(axis, angle_deg);
                debug!("Sweep {:?} to {} deg ({}us)", axis, angle_deg, width_us);
                Timer::after_millis(config.dwell_ms as u64).await;
            }
        }
    }

    let frame = turret.home();
    info!("Sweep complete, holding centre: {:?}", frame);

    loop {
        Timer::after_secs(60).await;
    }
}
