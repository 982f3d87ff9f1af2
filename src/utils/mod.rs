/// Utility modules for the skill checks
///
/// This module contains the file walker, report formatting and logging setup
/// shared by every binary.

pub mod file_utils;
pub mod logging;
pub mod output_formatter;
