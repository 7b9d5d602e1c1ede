//! Signature image sniffing.
//!
//! A stored signature image is tried as PNG first, then JPEG. Anything the
//! sniffer cannot place into a PDF directly (interlaced or paletted PNG,
//! unknown formats, truncated data) returns `None` and the signature
//! renderer degrades to a blank signature line. An undecodable image is
//! never an error.

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone)]
pub struct SignatureImage {
    pub width: u32,
    pub height: u32,
    pub kind: ImageKind,
}

#[derive(Debug, Clone)]
pub enum ImageKind {
    /// Baseline JPEG; the file bytes embed directly as a DCTDecode stream.
    Jpeg(Vec<u8>),
    /// Non-interlaced 8-bit PNG; the concatenated IDAT zlib stream embeds as
    /// FlateDecode with a PNG predictor.
    Png { data: Vec<u8>, color: PngColor },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngColor {
    Gray,
    Rgb,
}

impl PngColor {
    pub fn color_space(&self) -> &'static str {
        match self {
            PngColor::Gray => "DeviceGray",
            PngColor::Rgb => "DeviceRGB",
        }
    }

    pub fn components(&self) -> u8 {
        match self {
            PngColor::Gray => 1,
            PngColor::Rgb => 3,
        }
    }
}

/// Decode image bytes, PNG first, then JPEG.
pub fn decode(bytes: &[u8]) -> Option<SignatureImage> {
    parse_png(bytes).or_else(|| parse_jpeg(bytes))
}

fn parse_png(bytes: &[u8]) -> Option<SignatureImage> {
    if bytes.len() < 8 || !bytes.starts_with(&PNG_MAGIC) {
        return None;
    }

    let mut width = 0u32;
    let mut height = 0u32;
    let mut color: Option<PngColor> = None;
    let mut idat: Vec<u8> = Vec::new();
    let mut saw_ihdr = false;

    let mut pos = 8;
    while pos + 8 <= bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().ok()?) as usize;
        let chunk_type = &bytes[pos + 4..pos + 8];
        let data_start = pos + 8;
        let data_end = data_start.checked_add(len)?;
        if data_end > bytes.len() {
            return None;
        }
        let data = &bytes[data_start..data_end];

        match chunk_type {
            b"IHDR" => {
                if len < 13 {
                    return None;
                }
                width = u32::from_be_bytes(data[0..4].try_into().ok()?);
                height = u32::from_be_bytes(data[4..8].try_into().ok()?);
                let bit_depth = data[8];
                let color_type = data[9];
                let interlace = data[12];
                if bit_depth != 8 || interlace != 0 {
                    return None;
                }
                color = match color_type {
                    0 => Some(PngColor::Gray),
                    2 => Some(PngColor::Rgb),
                    // palette/alpha variants are not embeddable directly
                    _ => return None,
                };
                saw_ihdr = true;
            }
            b"IDAT" => idat.extend_from_slice(data),
            b"IEND" => break,
            _ => {}
        }
        // chunk data + 4-byte CRC
        pos = data_end + 4;
    }

    if !saw_ihdr || idat.is_empty() || width == 0 || height == 0 {
        return None;
    }

    Some(SignatureImage {
        width,
        height,
        kind: ImageKind::Png {
            data: idat,
            color: color?,
        },
    })
}

fn parse_jpeg(bytes: &[u8]) -> Option<SignatureImage> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        match marker {
            // standalone markers carry no length
            0x01 | 0xD0..=0xD8 => {
                pos += 2;
                continue;
            }
            // start of scan: dimensions must have appeared already
            0xDA => return None,
            _ => {}
        }
        let seg_len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        if seg_len < 2 || pos + 2 + seg_len > bytes.len() {
            return None;
        }
        // SOF0..SOF15 except DHT/JPG/DAC hold frame dimensions
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            if seg_len < 7 {
                return None;
            }
            let height = u16::from_be_bytes([bytes[pos + 5], bytes[pos + 6]]) as u32;
            let width = u16::from_be_bytes([bytes[pos + 7], bytes[pos + 8]]) as u32;
            if width == 0 || height == 0 {
                return None;
            }
            return Some(SignatureImage {
                width,
                height,
                kind: ImageKind::Jpeg(bytes.to_vec()),
            });
        }
        pos += 2 + seg_len;
    }
    None
}
