//! The BTI single-texture image format.
//!
//! Only the 32-byte header is decoded; palette and pixel payloads are
//! opaque byte slabs carried verbatim. Re-encoding lays the file out as
//! header, palette, pixels, padded to a 32-byte boundary.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};

use crate::error::{Error, FlagError, Result};

/// GameCube/Wii texture pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    I4 = 0,
    I8 = 1,
    Ia4 = 2,
    Ia8 = 3,
    Rgb565 = 4,
    Rgb5A3 = 5,
    Rgba32 = 6,
    C4 = 8,
    C8 = 9,
    C14X2 = 10,
    Cmpr = 14,
}

impl TryFrom<u8> for TextureFormat {
    type Error = FlagError;

    fn try_from(value: u8) -> std::result::Result<Self, FlagError> {
        Ok(match value {
            0 => Self::I4,
            1 => Self::I8,
            2 => Self::Ia4,
            3 => Self::Ia8,
            4 => Self::Rgb565,
            5 => Self::Rgb5A3,
            6 => Self::Rgba32,
            8 => Self::C4,
            9 => Self::C8,
            10 => Self::C14X2,
            14 => Self::Cmpr,
            other => return Err(FlagError::new("TextureFormat", other as u32)),
        })
    }
}

/// The 32-byte BTI header.
#[binrw::binrw]
#[derive(Debug, Clone, Copy, PartialEq)]
#[brw(big)]
pub struct BtiHeader {
    #[br(try_map = |raw: u8| TextureFormat::try_from(raw))]
    #[bw(map = |f: &TextureFormat| *f as u8)]
    pub format: TextureFormat,
    pub alpha_setting: u8,
    pub width: u16,
    pub height: u16,
    pub wrap_s: u8,
    pub wrap_t: u8,
    #[br(map = |raw: u8| raw != 0)]
    #[bw(map = |v: &bool| u8::from(*v))]
    pub palettes_enabled: bool,
    pub palette_format: u8,
    pub palette_count: u16,
    pub palette_offset: u32,
    pub reserved: u32,
    pub min_filter: u8,
    pub mag_filter: u8,
    pub min_lod: i8,
    pub max_lod: i8,
    pub mipmap_count: u8,
    pub unknown_0x19: u8,
    pub lod_bias: i16,
    pub data_offset: u32,
}

/// Size of [`BtiHeader`] on disk.
pub const HEADER_SIZE: usize = 0x20;

/// A decoded BTI image: header plus verbatim palette and pixel slabs.
#[derive(Debug, Clone, PartialEq)]
pub struct BtiImage {
    pub header: BtiHeader,
    pub palette: Vec<u8>,
    pub pixels: Vec<u8>,
}

impl BtiImage {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header = BtiHeader::read(&mut Cursor::new(data))?;

        let palette = if header.palettes_enabled && header.palette_count > 0 {
            let start = header.palette_offset as usize;
            let len = header.palette_count as usize * 2;
            slab(data, start, "palette offset")?
                .get(..len)
                .ok_or(Error::ValueOutOfRange {
                    tag: "BTI",
                    what: "palette length",
                    value: len,
                })?
                .to_vec()
        } else {
            Vec::new()
        };

        let pixels = slab(data, header.data_offset as usize, "data offset")?.to_vec();

        Ok(Self {
            header,
            palette,
            pixels,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut header = self.header;
        if self.palette.is_empty() {
            header.palettes_enabled = false;
            header.palette_count = 0;
            header.palette_offset = 0;
        } else {
            header.palettes_enabled = true;
            header.palette_count = (self.palette.len() / 2) as u16;
            header.palette_offset = HEADER_SIZE as u32;
        }
        header.data_offset = (HEADER_SIZE + self.palette.len()) as u32;

        let mut cursor = Cursor::new(Vec::new());
        header.write(&mut cursor)?;
        let mut out = cursor.into_inner();
        out.extend_from_slice(&self.palette);
        out.extend_from_slice(&self.pixels);
        let padded = out.len().next_multiple_of(32);
        out.resize(padded, 0);
        Ok(out)
    }
}

/// Slice from `start` to the end of the buffer, requiring `start` to sit
/// between the header and the buffer end.
fn slab<'a>(data: &'a [u8], start: usize, what: &'static str) -> Result<&'a [u8]> {
    if start < HEADER_SIZE || start > data.len() {
        return Err(Error::ValueOutOfRange {
            tag: "BTI",
            what,
            value: start,
        });
    }
    Ok(&data[start..])
}
