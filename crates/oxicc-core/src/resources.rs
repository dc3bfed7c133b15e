//! Bundled ICC profiles
//!
//! The v4 profiles are the canonical profiles' embedded bytes. The compact
//! variants are smaller v2 encodings of the same color spaces, meant for
//! embedding in output images. Grey output reuses the compact sRGB profile.

const SRGB_V4: &[u8] = include_bytes!("../resources/srgb-v4.icc");
const SRGB_COMPACT: &[u8] = include_bytes!("../resources/srgb-v2-micro.icc");
const SGREY_V4: &[u8] = include_bytes!("../resources/sgrey-v4.icc");
const ADOBE_RGB_V4: &[u8] = include_bytes!("../resources/adobe-compat-v4.icc");
const ADOBE_RGB_COMPACT: &[u8] = include_bytes!("../resources/adobe-compat-v2.icc");
const DISPLAY_P3_V4: &[u8] = include_bytes!("../resources/display-p3-compat-v4.icc");
const DISPLAY_P3_COMPACT: &[u8] = include_bytes!("../resources/display-p3-compat-v2-micro.icc");

/// Accessors for the bundled profile bytes
#[derive(Debug, Clone, Copy)]
pub struct IccResources;

impl IccResources {
    pub fn srgb_v4() -> &'static [u8] {
        SRGB_V4
    }

    pub fn srgb_compact() -> &'static [u8] {
        SRGB_COMPACT
    }

    pub fn sgrey_v4() -> &'static [u8] {
        SGREY_V4
    }

    pub fn sgrey_compact() -> &'static [u8] {
        SRGB_COMPACT
    }

    pub fn adobe_rgb_v4() -> &'static [u8] {
        ADOBE_RGB_V4
    }

    pub fn adobe_rgb_compact() -> &'static [u8] {
        ADOBE_RGB_COMPACT
    }

    pub fn display_p3_v4() -> &'static [u8] {
        DISPLAY_P3_V4
    }

    pub fn display_p3_compact() -> &'static [u8] {
        DISPLAY_P3_COMPACT
    }
}
