//! Rasterdelta: frame-delta classification and ranking for constrained
//! raster displays.
//!
//! Given the changed byte ranges between two frame buffers, the crate
//! classifies each range as a fill-able run or a copy-only slice, prices it
//! in replay cycles, and keeps the set in a strict priority order so a
//! budget-limited encoder can keep the most valuable prefix.
//!
//! The crate provides:
//! - Codec configuration and display-mode presets (`config`)
//! - Delta classification, ordering strategies and collections (`delta`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use rasterdelta::config::CodecConfig;
//! use rasterdelta::frame::FramePair;
//! use rasterdelta::io::build_priority_list;
//!
//! let config = CodecConfig { buffer_size: 64, ..CodecConfig::default() };
//! let prev = vec![0u8; 64];
//! let mut next = prev.clone();
//! next[8..28].fill(0x5A);
//! next[40] = 0xFF;
//!
//! let frames = FramePair::new(&prev, &next, config.buffer_size).unwrap();
//! let mut list = build_priority_list(&frames, &[(40, 40), (8, 27)], &config).unwrap();
//! assert_eq!(list.get(0).map(|d| d.fill_value()), Some(0x5A));
//!
//! list.split_all(&frames, &config).unwrap();
//! assert_eq!(list.len(), 3);
//! ```

pub mod config;
pub mod delta;
pub mod error;
pub mod frame;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::DeltaError;
