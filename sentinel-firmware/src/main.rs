//! Sentinel - Pan/Tilt Turret Firmware
//!
//! Main firmware binary for RP2040-based pan/tilt turrets. A host tracker
//! streams delta commands over UART; the firmware smooths them into servo
//! positions and switches the laser.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embedded_io_async::Write;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sentinel_core::config::StartupMode;
use sentinel_core::Turret;
use sentinel_drivers::{GpioLaser, PwmServo};
use sentinel_hal::{EhOutputPin, UartConfig};
use sentinel_hal_rp2040::{to_uart_config, PwmChannel, PwmServoChannel};
use sentinel_protocol::READY_BANNER;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sentinel firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    info!(
        "Config: {} baud, smoothing {}, mode {:?}",
        config.serial.baudrate, config.motion.smooth_factor, config.mode
    );

    // Setup UART for the host link
    // Pin assignments are board-specific (UART0: TX=GPIO0, RX=GPIO1)
    let uart_config = to_uart_config(&UartConfig::with_baudrate(config.serial.baudrate));
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (mut tx, rx) = uart.split();
    info!("UART initialized for host link");

    // Setup servo PWM
    // Pin assignments are board-specific (pan=GPIO6 slice 3A, tilt=GPIO5 slice 2B)
    let pan_pwm = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, PwmConfig::default());
    let tilt_pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, PwmConfig::default());
    let pan = PwmServo::new(
        PwmServoChannel::new(pan_pwm, PwmChannel::A),
        config.motion.pan.pulse,
    );
    let tilt = PwmServo::new(
        PwmServoChannel::new(tilt_pwm, PwmChannel::B),
        config.motion.tilt.pulse,
    );
    info!("Servo PWM initialized");

    // Setup laser output, idle level first so it never flashes on
    // Pin assignment is board-specific (GPIO13)
    let active_low = config.laser.active_low;
    let idle = if active_low { Level::High } else { Level::Low };
    let laser_pin = EhOutputPin::with_level(Output::new(p.PIN_13, idle), active_low);
    let laser = GpioLaser::new(laser_pin, active_low);
    info!("Laser output initialized (active_low={})", active_low);

    let mut turret = Turret::new(pan, tilt, laser, config.motion);
    let frame = turret.home();
    info!("Turret centred: {:?}", frame);

    if let Err(e) = tx.write_all(READY_BANNER.as_bytes()).await {
        warn!("Failed to send ready banner: {:?}", e);
    }

    // Spawn tasks
    match config.mode {
        StartupMode::Run => {
            spawner.spawn(tasks::command_rx_task(rx)).unwrap();
            spawner.spawn(tasks::motion_task(turret)).unwrap();
        }
        StartupMode::Calibrate => {
            spawner
                .spawn(tasks::calibration_task(turret, tx, config.calibration))
                .unwrap();
        }
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
