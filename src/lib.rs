//! nutnrb-cal: NUTNR-B calibration file conversion
//!
//! Reads a SUNA/NUTNR-B vendor calibration file, checks that it is
//! complete, and writes the CGINS calibration record CSV the downstream
//! processing expects.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
