//! Build script for sentinel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware parser understands
const KNOWN_SECTIONS: &[&str] = &[
    "serial",
    "pan",
    "tilt",
    "motion",
    "laser",
    "mode",
    "calibration",
];

/// Longest pulse a 50 Hz servo frame can carry
const SERVO_PERIOD_US: i64 = 20_000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds machine.toml at build time.                 ║\n\
            ║  Please create one in the sentinel-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read machine.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in machine.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_serial(&config, &mut errors);
    validate_axis(&config, "pan", &mut errors);
    validate_axis(&config, "tilt", &mut errors);
    validate_motion(&config, &mut errors);
    validate_laser(&config, &mut errors);
    validate_mode(&config, &mut errors);
    validate_calibration(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in machine.toml", &errors);
    }

    println!("cargo:warning=machine.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(errors)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(errors: &[String]) -> String {
    errors
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every top-level key must be a known section table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let table = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (name, value) in table {
        if !KNOWN_SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(toml::Value::as_table)
}

/// Read a number that may be written as an integer or a float
fn number(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = section(config, "serial") else {
        return;
    };

    match serial.get("baudrate") {
        None => {}
        Some(toml::Value::Integer(b)) if *b > 0 && *b <= u32::MAX as i64 => {}
        Some(_) => errors.push("[serial] baudrate must be a positive integer".to_string()),
    }
}

fn validate_axis(config: &toml::Value, name: &str, errors: &mut Vec<String>) {
    let Some(axis) = section(config, name) else {
        return;
    };

    let mut angles = (0.0, 180.0);
    for (key, slot) in [("min_angle", &mut angles.0), ("max_angle", &mut angles.1)] {
        if let Some(value) = axis.get(key) {
            match number(value) {
                Some(v) if v.is_finite() => *slot = v,
                _ => errors.push(format!("[{}] {} must be a number", name, key)),
            }
        }
    }
    if angles.0 >= angles.1 {
        errors.push(format!("[{}] min_angle must be below max_angle", name));
    }

    let mut pulses = (700, 2500);
    for (key, slot) in [
        ("min_pulse_us", &mut pulses.0),
        ("max_pulse_us", &mut pulses.1),
    ] {
        match axis.get(key) {
            None => {}
            Some(toml::Value::Integer(us)) if (1..SERVO_PERIOD_US).contains(us) => *slot = *us,
            Some(_) => errors.push(format!(
                "[{}] {} must be 1-{} us",
                name,
                key,
                SERVO_PERIOD_US - 1
            )),
        }
    }
    if pulses.0 >= pulses.1 {
        errors.push(format!("[{}] min_pulse_us must be below max_pulse_us", name));
    }

    if let Some(value) = axis.get("inverted") {
        if !value.is_bool() {
            errors.push(format!("[{}] inverted must be true or false", name));
        }
    }
}

fn validate_motion(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(motion) = section(config, "motion") else {
        return;
    };

    if let Some(value) = motion.get("smooth_factor") {
        match number(value) {
            Some(f) if f > 0.0 && f <= 1.0 => {}
            _ => errors.push("[motion] smooth_factor must be in (0, 1]".to_string()),
        }
    }
}

fn validate_laser(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(laser) = section(config, "laser") else {
        return;
    };

    if let Some(value) = laser.get("active_low") {
        if !value.is_bool() {
            errors.push("[laser] active_low must be true or false".to_string());
        }
    }
}

fn validate_mode(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(mode) = section(config, "mode") else {
        return;
    };

    match mode.get("startup") {
        None => {}
        Some(toml::Value::String(s)) if ["run", "calibrate"].contains(&s.as_str()) => {}
        Some(_) => errors.push("[mode] startup must be 'run' or 'calibrate'".to_string()),
    }
}

fn validate_calibration(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(calibration) = section(config, "calibration") else {
        return;
    };

    match calibration.get("step_deg") {
        None => {}
        Some(toml::Value::Integer(step)) if (1..=180).contains(step) => {}
        Some(_) => errors.push("[calibration] step_deg must be 1-180".to_string()),
    }

    match calibration.get("dwell_ms") {
        None => {}
        Some(toml::Value::Integer(ms)) if (0..=10_000).contains(ms) => {}
        Some(_) => errors.push("[calibration] dwell_ms must be 0-10000".to_string()),
    }
}
