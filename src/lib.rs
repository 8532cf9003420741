//! Point, line and polygon drawing on a 2D map.
//!
//! The drawing controller lives in [`drawing`]; it claims pick input through the
//! interaction-mode stack in [`interaction`]. The remaining modules make up the
//! map application around it.

pub mod camera;
pub mod config;
pub mod constants;
pub mod drawing;
pub mod grid;
pub mod interaction;
pub mod params;
pub mod paths;
pub mod theme;
pub mod ui;
