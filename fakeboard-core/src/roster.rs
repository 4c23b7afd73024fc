//! The devices soldered onto this board.

use fakeboard_io::{Device, RomConfig, Store};

pub const ROM_ID: u32 = 0;
pub const STORE_ID: u32 = 1;
pub const NUM_DEVICES: u32 = 2;

pub const ROM_NAME: &str = "Acme ROM";
pub const STORE_NAME: &str = "Beta Memory";

/// Builds the roster in id order.
pub fn populate(store_version: i32) -> Vec<Box<dyn Device>> {
    let devices: Vec<Box<dyn Device>> = vec![
        Box::new(RomConfig::new(ROM_NAME)),
        Box::new(Store::new(STORE_NAME, store_version)),
    ];
    debug_assert_eq!(devices.len(), NUM_DEVICES as usize);
    devices
}
