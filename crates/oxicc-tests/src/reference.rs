//! moxcms wrappers
//!
//! moxcms is used only as an independent reader of profile structure; its
//! transforms are not compared here.

use anyhow::{Result, anyhow};

/// What moxcms reads from a profile, reduced to plain values
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProfile {
    pub is_rgb: bool,
    pub is_grey: bool,
    pub pcs_is_xyz: bool,
    /// Red, green and blue colorants, one XYZ row each
    pub colorants: [[f64; 3]; 3],
    pub has_rgb_trc: bool,
    pub has_grey_trc: bool,
}

/// Parse `data` with moxcms
pub fn read_with_moxcms(data: &[u8]) -> Result<ReferenceProfile> {
    use moxcms::{ColorProfile, DataColorSpace};

    let profile = ColorProfile::new_from_slice(data).map_err(|e| anyhow!("moxcms: {e:?}"))?;
    let row = |c: &moxcms::Xyzd| [c.x, c.y, c.z];

    Ok(ReferenceProfile {
        is_rgb: profile.color_space == DataColorSpace::Rgb,
        is_grey: profile.color_space == DataColorSpace::Gray,
        pcs_is_xyz: profile.pcs == DataColorSpace::Xyz,
        colorants: [
            row(&profile.red_colorant),
            row(&profile.green_colorant),
            row(&profile.blue_colorant),
        ],
        has_rgb_trc: profile.red_trc.is_some()
            && profile.green_trc.is_some()
            && profile.blue_trc.is_some(),
        has_grey_trc: profile.gray_trc.is_some(),
    })
}
