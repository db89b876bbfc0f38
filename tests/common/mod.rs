//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Temporary directory management
//! - Input dataset generation
#![allow(dead_code)]

pub mod test_utils;

pub use test_utils::{
    get_temp_dir, test_temp_dir, write_bank_csv, write_csv, TempTestDir, BANK_HEADERS,
};

/// The sample dataset as CSV rows
pub const SAMPLE_ROWS: [&[&str]; 6] = [
    &["Emirates NBD", "2015", "10000", "2000", "50000", "7000", "30000", "20000", "12.5", "1.2"],
    &["Dubai Islamic Bank", "2015", "8000", "1500", "40000", "6000", "25000", "18000", "10.2", "1.0"],
    &["Mashreq", "2015", "6000", "1200", "30000", "5000", "20000", "15000", "8.7", "0.8"],
    &["Emirates NBD", "2016", "11000", "2100", "52000", "7200", "31000", "21000", "13.0", "1.3"],
    &["Dubai Islamic Bank", "2016", "8500", "1600", "41000", "6100", "25500", "18500", "10.5", "1.1"],
    &["Mashreq", "2016", "6500", "1300", "31000", "5100", "20500", "15500", "9.0", "0.9"],
];

/// Assert two floats agree to within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
