// Codec configuration and display-mode presets.
//
// Every tunable the classifier and the priority comparator read lives in a
// `CodecConfig` value passed in explicitly. The presets below describe the
// raster layouts the codec targets.

use crate::error::DeltaError;

/// Shortest delta eligible for a fill (run) instruction.
pub const DEFAULT_MIN_RUN_LENGTH: usize = 9;

/// Estimated cycles to copy one word (`REP MOVSW` on an 8088).
pub const COPY_UNIT_COST: f64 = 25.0;

/// Estimated cycles to fill one word (`REP STOSW` on an 8088).
pub const FILL_UNIT_COST: f64 = 14.0;

/// Pixel depths the change decomposition understands.
pub const SUPPORTED_BIT_DEPTHS: [u8; 3] = [1, 4, 8];

/// Classification and ordering parameters for one display mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecConfig {
    /// Name for display purposes.
    pub name: &'static str,
    /// Size of each frame buffer in bytes.
    pub buffer_size: usize,
    /// Bits per pixel (1, 4 or 8).
    pub bits_per_pixel: u8,
    /// Deltas shorter than this are always slices.
    pub min_run_length: usize,
    /// Cycles per word for a copy-style replay.
    pub copy_unit_cost: f64,
    /// Cycles per word for a fill-style replay.
    pub fill_unit_cost: f64,
    /// Mask start offsets when breaking ties so both interlaced fields of
    /// the same visual row sort together.
    pub interlace_compensation: bool,
}

impl CodecConfig {
    /// Mask applied to start offsets by the priority order, if enabled.
    ///
    /// Half the buffer, rounded up to a power of two, minus one. A 16 KiB
    /// CGA buffer yields `0x1FFF`.
    pub fn interlace_mask(&self) -> Option<usize> {
        if !self.interlace_compensation || self.buffer_size < 2 {
            return None;
        }
        Some((self.buffer_size / 2).next_power_of_two() - 1)
    }

    /// Check the configuration up front instead of on the first single-byte
    /// delta.
    pub fn validate(&self) -> Result<(), DeltaError> {
        if self.buffer_size == 0 {
            return Err(DeltaError::InvalidConfig("buffer size is zero".into()));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_pixel) {
            return Err(DeltaError::UnsupportedBitDepth(self.bits_per_pixel));
        }
        if !(self.copy_unit_cost.is_finite() && self.fill_unit_cost.is_finite()) {
            return Err(DeltaError::InvalidConfig("unit costs must be finite".into()));
        }
        if self.copy_unit_cost <= 0.0 || self.fill_unit_cost <= 0.0 {
            return Err(DeltaError::InvalidConfig("unit costs must be positive".into()));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CGA_HIRES
    }
}

/// Look up a preset by name (case-insensitive).
pub fn config_for_mode(name: &str) -> Option<CodecConfig> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .copied()
}

// ---------------------------------------------------------------------------
// Display-mode presets
// ---------------------------------------------------------------------------

/// 640x200 monochrome, two interlaced 8 KiB fields.
pub const CGA_HIRES: CodecConfig = CodecConfig {
    name: "cga-hires",
    buffer_size: 16384,
    bits_per_pixel: 1,
    min_run_length: DEFAULT_MIN_RUN_LENGTH,
    copy_unit_cost: COPY_UNIT_COST,
    fill_unit_cost: FILL_UNIT_COST,
    interlace_compensation: true,
};

/// 160x200 16-colour composite artifact colour, same interlaced layout.
pub const CGA_COMPOSITE: CodecConfig = CodecConfig {
    name: "cga-composite",
    buffer_size: 16384,
    bits_per_pixel: 4,
    min_run_length: DEFAULT_MIN_RUN_LENGTH,
    copy_unit_cost: COPY_UNIT_COST,
    fill_unit_cost: FILL_UNIT_COST,
    interlace_compensation: true,
};

/// 320x200 256-colour, linear.
pub const MCGA: CodecConfig = CodecConfig {
    name: "mcga",
    buffer_size: 64000,
    bits_per_pixel: 8,
    min_run_length: DEFAULT_MIN_RUN_LENGTH,
    copy_unit_cost: COPY_UNIT_COST,
    fill_unit_cost: FILL_UNIT_COST,
    interlace_compensation: false,
};

pub const PRESETS: [CodecConfig; 3] = [CGA_HIRES, CGA_COMPOSITE, MCGA];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_validate() {
        for p in PRESETS {
            assert!(p.validate().is_ok(), "preset {} failed validation", p.name);
        }
    }

    #[test]
    fn fill_is_cheaper_than_copy() {
        for p in PRESETS {
            assert!(
                p.fill_unit_cost < p.copy_unit_cost,
                "preset {} has fill >= copy",
                p.name
            );
        }
    }

    #[test]
    fn interlace_mask_for_cga() {
        assert_eq!(CGA_HIRES.interlace_mask(), Some(0x1FFF));
        assert_eq!(MCGA.interlace_mask(), None);

        let odd = CodecConfig {
            buffer_size: 16000,
            ..CGA_HIRES
        };
        assert_eq!(odd.interlace_mask(), Some(0x1FFF));
    }

    #[test]
    fn mode_lookup() {
        assert_eq!(config_for_mode("cga-hires").map(|c| c.name), Some("cga-hires"));
        assert_eq!(config_for_mode("MCGA").map(|c| c.bits_per_pixel), Some(8));
        assert!(config_for_mode("ega").is_none());
    }

    #[test]
    fn validate_rejects_bad_depth_and_costs() {
        let bad_depth = CodecConfig {
            bits_per_pixel: 2,
            ..CGA_HIRES
        };
        assert!(matches!(
            bad_depth.validate(),
            Err(DeltaError::UnsupportedBitDepth(2))
        ));

        let bad_cost = CodecConfig {
            fill_unit_cost: f64::NAN,
            ..CGA_HIRES
        };
        assert!(matches!(bad_cost.validate(), Err(DeltaError::InvalidConfig(_))));

        let empty = CodecConfig {
            buffer_size: 0,
            ..MCGA
        };
        assert!(empty.validate().is_err());
    }
}
