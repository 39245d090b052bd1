//! UART settings conversion

use embassy_rp::uart::{Config, DataBits, Parity, StopBits};

use sentinel_hal::uart::{self, UartConfig};

/// Convert link settings into an embassy-rp UART config
pub fn to_uart_config(settings: &UartConfig) -> Config {
    let mut config = Config::default();
    config.baudrate = settings.baudrate;
    config.data_bits = match settings.data_bits {
        uart::DataBits::Seven => DataBits::DataBits7,
        uart::DataBits::Eight => DataBits::DataBits8,
    };
    config.parity = match settings.parity {
        uart::Parity::None => Parity::ParityNone,
        uart::Parity::Even => Parity::ParityEven,
        uart::Parity::Odd => Parity::ParityOdd,
    };
    config.stop_bits = match settings.stop_bits {
        uart::StopBits::One => StopBits::STOP1,
        uart::StopBits::Two => StopBits::STOP2,
    };
    config
}
