//! This library handles reading and writing the **JPC** particle container
//! used by JSystem games, revision **JPAC 2-10**.
//!
//! # JPC Format Documentation
//!
//! A JPC file holds a list of particle resources followed by a pool of BTI
//! textures shared between them. Each resource is a chain of tagged,
//! length-prefixed blocks describing one particle effect.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                | Description                               |
//! |----------------|----------------------|-------------------------------------------|
//! | 0x0000         | Magic                | 8 bytes: `JPAC2-10`                       |
//! | 0x0008         | Resource Count       | 2 bytes: number of particle resources     |
//! | 0x000A         | Texture Count        | 2 bytes: number of texture entries        |
//! | 0x000C         | Texture Table Offset | 4 bytes: offset of the first texture      |
//! | 0x0010         | Resources            | back-to-back, self-delimiting             |
//! |                | Padding              | to a 32-byte boundary                     |
//! |                | Texture Table        | `TEX1` entries, each padded to 32 bytes   |
//!
//! ### Resource
//!
//! An 8-byte header (`i16` index, `i16` section count, `u8` field-block
//! count, `u8` key-block count, `u8` texture count, 1 pad byte) followed by
//! `section count` blocks. Every block starts with a 4-character ASCII tag
//! and a `u32` length covering the whole block including its header, padded
//! to a 4-byte boundary:
//!
//! | Tag    | Block           | Multiplicity |
//! |--------|-----------------|--------------|
//! | `BEM1` | dynamics        | exactly one  |
//! | `FLD1` | field           | any number   |
//! | `KFA1` | key-frame anim  | any number   |
//! | `BSP1` | base shape      | exactly one  |
//! | `ESP1` | extra shape     | exactly one  |
//! | `SSP1` | child shape     | at most one  |
//! | `ETX1` | ex-tex shape    | at most one  |
//! | `TDB1` | texture indices | exactly one, terminates the resource |
//!
//! ### Texture Entry
//!
//! | Offset (bytes) | Field      | Description                             |
//! |----------------|------------|-----------------------------------------|
//! | 0x0000         | Tag        | 4 bytes: `TEX1`                         |
//! | 0x0004         | Total Size | 4 bytes: entry size including header    |
//! | 0x0008         | Reserved   | 4 bytes: zero                           |
//! | 0x000C         | File Name  | 20 bytes: NUL-padded texture name       |
//! | 0x0020         | BTI Data   | raw texture image, padded to 32 bytes   |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.jpc`
//! - **Endianness**: Big-endian for all multi-byte integers
//!

pub mod blocks;
pub mod bti;
pub mod color;
pub mod container;
pub mod enums;
pub mod error;
pub mod resource;
pub mod texture;

pub use blocks::Block;
pub use bti::{BtiHeader, BtiImage};
pub use color::Color;
pub use container::{Container, ContainerWriterOptions};
pub use error::{Error, Result};
pub use resource::Resource;
pub use texture::Texture;
