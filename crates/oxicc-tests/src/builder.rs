//! Synthetic ICC profiles
//!
//! Produces structurally valid containers with whatever tags a test needs.
//! Payloads are laid out after the directory in insertion order, padded to
//! four bytes, and the whole profile is padded to the 160-byte minimum.

/// ICC file signature at offset 36
const ACSP: &[u8; 4] = b"acsp";
const HEADER_SIZE: usize = 128;
const ENTRY_SIZE: usize = 12;
const MIN_SIZE: usize = 160;

/// Builder for synthetic profiles
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    color_space: [u8; 4],
    pcs: [u8; 4],
    major_version: u8,
    tags: Vec<([u8; 4], Vec<u8>)>,
}

impl ProfileBuilder {
    pub fn new(color_space: &[u8; 4], pcs: &[u8; 4]) -> Self {
        Self {
            color_space: *color_space,
            pcs: *pcs,
            major_version: 4,
            tags: Vec::new(),
        }
    }

    /// RGB data with an XYZ connection space
    pub fn rgb() -> Self {
        Self::new(b"RGB ", b"XYZ ")
    }

    /// Grey data with an XYZ connection space
    pub fn grey() -> Self {
        Self::new(b"GRAY", b"XYZ ")
    }

    pub fn version(mut self, major: u8) -> Self {
        self.major_version = major;
        self
    }

    pub fn tag(mut self, signature: &[u8; 4], payload: impl Into<Vec<u8>>) -> Self {
        self.tags.push((*signature, payload.into()));
        self
    }

    /// Colorant and TRC tags for a matrix/TRC profile sharing one curve
    pub fn matrix_trc(self, primaries: [[f64; 3]; 3], trc: &[u8]) -> Self {
        self.tag(b"rXYZ", xyz(primaries[0]))
            .tag(b"gXYZ", xyz(primaries[1]))
            .tag(b"bXYZ", xyz(primaries[2]))
            .tag(b"rTRC", trc)
            .tag(b"gTRC", trc)
            .tag(b"bTRC", trc)
    }

    pub fn build(&self) -> Vec<u8> {
        let directory_end = HEADER_SIZE + 4 + self.tags.len() * ENTRY_SIZE;
        let mut data = vec![0u8; directory_end];

        data[8] = self.major_version;
        data[12..16].copy_from_slice(b"mntr");
        data[16..20].copy_from_slice(&self.color_space);
        data[20..24].copy_from_slice(&self.pcs);
        data[36..40].copy_from_slice(ACSP);
        data[128..132].copy_from_slice(&(self.tags.len() as u32).to_be_bytes());

        for (i, (signature, payload)) in self.tags.iter().enumerate() {
            let offset = data.len();
            data.extend_from_slice(payload);
            while data.len() % 4 != 0 {
                data.push(0);
            }

            let entry = HEADER_SIZE + 4 + i * ENTRY_SIZE;
            data[entry..entry + 4].copy_from_slice(signature);
            data[entry + 4..entry + 8].copy_from_slice(&(offset as u32).to_be_bytes());
            data[entry + 8..entry + 12].copy_from_slice(&(payload.len() as u32).to_be_bytes());
        }

        if data.len() < MIN_SIZE {
            data.resize(MIN_SIZE, 0);
        }
        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());
        data
    }
}

fn s15f16(v: f64) -> [u8; 4] {
    ((v * 65536.0).round() as i32).to_be_bytes()
}

/// `XYZ ` tag payload
pub fn xyz(v: [f64; 3]) -> Vec<u8> {
    let mut data = b"XYZ \0\0\0\0".to_vec();
    for c in v {
        data.extend_from_slice(&s15f16(c));
    }
    data
}

/// `curv` tag payload with a single u8Fixed8 gamma
pub fn curv_gamma(gamma: f64) -> Vec<u8> {
    curv_raw_gamma((gamma * 256.0).round() as u16)
}

/// `curv` tag payload with a raw u8Fixed8 gamma value
pub fn curv_raw_gamma(value: u16) -> Vec<u8> {
    let mut data = b"curv\0\0\0\0".to_vec();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&value.to_be_bytes());
    data
}

/// `curv` tag payload holding a sample table
pub fn curv_table(points: &[u16]) -> Vec<u8> {
    let mut data = b"curv\0\0\0\0".to_vec();
    data.extend_from_slice(&(points.len() as u32).to_be_bytes());
    for p in points {
        data.extend_from_slice(&p.to_be_bytes());
    }
    data
}

/// `para` tag payload for `function` with s15Fixed16 parameters
pub fn para(function: u16, params: &[f64]) -> Vec<u8> {
    let mut data = b"para\0\0\0\0".to_vec();
    data.extend_from_slice(&function.to_be_bytes());
    data.extend_from_slice(&[0, 0]);
    for &p in params {
        data.extend_from_slice(&s15f16(p));
    }
    data
}

/// `n` samples of `f` over [0, 1], quantized to u16
pub fn sample_curve(n: usize, f: impl Fn(f64) -> f64) -> Vec<u16> {
    (0..n)
        .map(|i| (f(i as f64 / (n - 1) as f64) * 65535.0).round() as u16)
        .collect()
}
