//! `KFA1`: key-frame animation of one emitter parameter.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::enums::KeyType;
use crate::error::{Error, Result};

/// One Hermite key: a frame position, the value at it, and its tangents.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub tangent_in: f32,
    pub tangent_out: f32,
}

/// `KFA1` body: the animated parameter and its key table.
#[binrw::binrw]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct KeyBlock {
    #[br(try_map = |raw: u8| KeyType::try_from(raw as u32))]
    #[bw(map = |k: &KeyType| k.bits() as u8)]
    pub key_type: KeyType,
    #[br(temp)]
    #[bw(calc = keyframes.len() as u8)]
    key_count: u8,
    pub unused: u8,
    #[br(map = |raw: u8| raw != 0)]
    #[bw(map = |v: &bool| u8::from(*v))]
    #[serde(rename = "Loop")]
    pub is_loop: bool,
    #[br(count = key_count)]
    pub keyframes: Vec<Keyframe>,
}

impl KeyBlock {
    pub fn from_body(body: &[u8]) -> Result<Self> {
        Ok(Self::read(&mut Cursor::new(body))?)
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        if self.keyframes.len() > u8::MAX as usize {
            return Err(Error::ValueOutOfRange {
                tag: "KFA1",
                what: "keyframe count",
                value: self.keyframes.len(),
            });
        }
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::blocks::key::{KeyBlock, Keyframe};
    use crate::enums::KeyType;

    fn sample_body() -> Vec<u8> {
        #[rustfmt::skip]
        let mut body = vec![
            0x0A, // key type: scale
            0x02, // two keyframes
            0x00,
            0x01, // looping
        ];
        for f in [0.0f32, 1.0, 0.5, -0.5, 30.0, 2.0, 0.0, 0.0] {
            body.extend_from_slice(&f.to_be_bytes());
        }
        body
    }

    #[test]
    fn roundtrip_preserves_bytes() {
        let body = sample_body();
        let block = KeyBlock::from_body(&body).unwrap();

        assert_eq!(block.key_type, KeyType::Scale);
        assert!(block.is_loop);
        assert_eq!(block.keyframes.len(), 2);
        assert_eq!(
            block.keyframes[0],
            Keyframe {
                time: 0.0,
                value: 1.0,
                tangent_in: 0.5,
                tangent_out: -0.5,
            }
        );

        assert_eq!(block.to_body().unwrap(), body);
    }

    #[test]
    fn count_drives_the_key_table() {
        let block = KeyBlock::from_body(&sample_body()).unwrap();
        let body = block.to_body().unwrap();
        assert_eq!(body[1], 2);
        assert_eq!(body.len(), 4 + 2 * 0x10);
    }
}
