//! The board scenarios run by `fakeboard selftest`.

use anyhow::{ensure, Context, Result};
use fakeboard_core::roster::{ROM_ID, STORE_ID};
use fakeboard_core::{Board, DeviceError, Word};

const STORE_VERSION: i32 = 3;

type Scenario = fn() -> Result<()>;

pub const SCENARIOS: &[(&str, Scenario)] = &[
    ("good_init", good_init),
    ("bad_init", bad_init),
    ("happy_paths", happy_paths),
    ("put_readonly", put_readonly),
    ("read_mem_errors", read_mem_errors),
    ("write_mem_errors", write_mem_errors),
];

/// Runs every scenario in order and stops at the first failure.
pub fn run_all() -> Result<()> {
    for (label, scenario) in SCENARIOS {
        println!("Test {}...", label);
        scenario().with_context(|| format!("{} FAILED", label))?;
        println!("{} PASSED\n", label);
    }
    Ok(())
}

fn ready_board() -> Result<Board> {
    let mut board = Board::with_version(STORE_VERSION);
    board.initialize().context("board initialization")?;
    Ok(board)
}

fn report(label: &str, what: &str, err: &DeviceError) {
    println!("{} {} failed: {}", label, what, err.strerror());
}

fn good_init() -> Result<()> {
    ready_board().map(|_| ())
}

fn bad_init() -> Result<()> {
    let mut board = Board::with_version(12);
    let err = board.initialize().err().context("initialization unexpectedly succeeded")?;
    ensure!(
        err == DeviceError::DeviceNotConfigured { version: 12 },
        "unexpected error: {}",
        err
    );
    report("bad_init", "initialization", &err);
    Ok(())
}

fn happy_paths() -> Result<()> {
    let mut board = ready_board()?;

    let value = board.device_get(ROM_ID, 3)?;
    ensure!(value == 3, "ROM word 3 is {:#x}", value);

    let size = board.device_size(STORE_ID)?;
    for offset in 0..size as u32 {
        let value = board.device_get(STORE_ID, offset)?;
        ensure!(value == 0, "store word {} is {:#x} after initialize", offset, value);
    }

    let value: Word = 0x1234_5678;
    board.device_put(STORE_ID, 7, value)?;
    let fetched = board.device_get(STORE_ID, 7)?;
    ensure!(fetched == value, "read back {:#x}, wrote {:#x}", fetched, value);
    Ok(())
}

fn put_readonly() -> Result<()> {
    let mut board = ready_board()?;
    let rom_name = board.device_name(ROM_ID)?.to_string();
    let what = format!("{} put", rom_name);

    let err = board.device_put(ROM_ID, 1, 123).err().context("ROM accepted a write")?;
    ensure!(err == DeviceError::PermissionDenied, "unexpected error: {}", err);
    report("put_readonly", &what, &err);

    let size = board.device_size(ROM_ID)?;
    let err = board
        .device_put(ROM_ID, size as u32 + 1, 123)
        .err()
        .context("ROM accepted an out of range write")?;
    ensure!(matches!(err, DeviceError::OutOfRange { .. }), "unexpected error: {}", err);
    report("put_readonly", &what, &err);

    ensure!(board.device_name(11) == Err(DeviceError::NoSuchDevice(11)), "device 11 has a name");
    ensure!(board.device_size(12) == Err(DeviceError::NoSuchDevice(12)), "device 12 has a size");
    ensure!(board.device_get(13, 1) == Err(DeviceError::NoSuchDevice(13)), "device 13 is readable");
    let err = board.device_put(14, 1, 456).err().context("device 14 is writable")?;
    ensure!(err == DeviceError::NoSuchDevice(14), "unexpected error: {}", err);
    report("put_readonly", &what, &err);
    Ok(())
}

fn read_mem_errors() -> Result<()> {
    let board = ready_board()?;
    let size = board.device_size(STORE_ID)?;
    let what = format!("{} get", board.device_name(STORE_ID)?);
    let past = size as u32 + 8;

    let err = board.device_get(6, past).err().context("device 6 is readable")?;
    ensure!(err == DeviceError::NoSuchDevice(6), "unexpected error: {}", err);
    report("read_mem_errors", &what, &err);

    let err = board.device_get(STORE_ID, past).err().context("read past the store succeeded")?;
    ensure!(matches!(err, DeviceError::OutOfRange { .. }), "unexpected error: {}", err);
    report("read_mem_errors", &what, &err);
    Ok(())
}

fn write_mem_errors() -> Result<()> {
    let mut board = ready_board()?;
    let size = board.device_size(STORE_ID)?;
    let what = format!("{} put", board.device_name(STORE_ID)?);
    let past = size as u32 + 8;
    let value: Word = 0xcafe;

    let err = board.device_put(6, past, value).err().context("device 6 is writable")?;
    ensure!(err == DeviceError::NoSuchDevice(6), "unexpected error: {}", err);
    report("write_mem_errors", &what, &err);

    let err = board.device_put(STORE_ID, past, value).err().context("write past the store succeeded")?;
    ensure!(matches!(err, DeviceError::OutOfRange { .. }), "unexpected error: {}", err);
    report("write_mem_errors", &what, &err);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scenario_passes() {
        for (label, scenario) in SCENARIOS {
            assert!(scenario().is_ok(), "{} failed", label);
        }
        assert!(run_all().is_ok());
    }

    #[test]
    fn test_scenario_labels_are_unique() {
        let mut labels: Vec<&str> = SCENARIOS.iter().map(|(label, _)| *label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 6);
    }
}
