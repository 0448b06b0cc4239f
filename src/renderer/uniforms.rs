//! Uniform blocks for the external shader programs
//!
//! Each struct mirrors one shader's uniform block byte for byte; fields are
//! ordered so vec4s come first and every struct is a multiple of 16 bytes.

use bytemuck::{Pod, Zeroable};

use super::{ShaderId, Tint};

/// Animated star field over the nebula noise
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct StarsUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

/// Pulsing band around the arena edge
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ArenaBorderUniforms {
    pub border_color0: [f32; 4],
    pub border_color1: [f32; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

/// Glow over the ship when the dash comes back
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DashGlowUniforms {
    pub glow_color: [f32; 4],
    pub alpha: f32,
    pub _pad: [f32; 3],
}

impl StarsUniforms {
    pub const SHADER: ShaderId = ShaderId::Stars;

    pub fn new(resolution: [f32; 2], time: f32) -> Self {
        Self {
            resolution,
            time,
            _pad: 0.0,
        }
    }
}

impl ArenaBorderUniforms {
    pub const SHADER: ShaderId = ShaderId::ArenaBorder;

    pub fn new(color0: Tint, color1: Tint, resolution: [f32; 2], time: f32) -> Self {
        Self {
            border_color0: color0.0,
            border_color1: color1.0,
            resolution,
            time,
            _pad: 0.0,
        }
    }
}

impl DashGlowUniforms {
    pub const SHADER: ShaderId = ShaderId::DashGlow;

    pub fn new(glow_color: Tint, alpha: f32) -> Self {
        Self {
            glow_color: glow_color.0,
            alpha,
            _pad: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_blocks_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<StarsUniforms>(), 16);
        assert_eq!(std::mem::size_of::<ArenaBorderUniforms>(), 48);
        assert_eq!(std::mem::size_of::<DashGlowUniforms>(), 32);
    }

    #[test]
    fn test_bytes_round_trip_through_pod() {
        let glow = DashGlowUniforms::new(colors::SKYBLUE.fade(0.1), 0.5);
        let bytes = bytemuck::bytes_of(&glow);
        let back: DashGlowUniforms = bytemuck::pod_read_unaligned(bytes);
        assert_eq!(back, glow);
        assert_eq!(back.glow_color[3], 0.1);
    }
}
