//! Column descriptors and typed cell values.

use crate::error::{Error, Result};
use crate::hash::NameTable;
use crate::types::ColumnDescriptor;

/// Cell type of a BCSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 32-bit signed integer, masked and shifted.
    Long = 0,
    /// 32-bit IEEE-754 float; mask and shift are ignored.
    Float = 2,
    /// Alias of [`FieldType::Long`] carrying different semantic intent.
    Long2 = 3,
    /// 16-bit integer, masked and shifted.
    Short = 4,
    /// 8-bit integer, masked and shifted, unsigned.
    Char = 5,
    /// `u32` offset into the string pool.
    StringOffset = 6,
}

impl FieldType {
    pub fn from_raw(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(Self::Long),
            2 => Ok(Self::Float),
            3 => Ok(Self::Long2),
            4 => Ok(Self::Short),
            5 => Ok(Self::Char),
            6 => Ok(Self::StringOffset),
            other => Err(Error::InvalidFieldType(other)),
        }
    }

    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Byte width of the cell inside a row.
    pub fn size(self) -> usize {
        match self {
            Self::Long | Self::Float | Self::Long2 | Self::StringOffset => 4,
            Self::Short => 2,
            Self::Char => 1,
        }
    }

    /// The mask covering the cell's full width.
    pub fn full_mask(self) -> u32 {
        match self {
            Self::Long | Self::Float | Self::Long2 | Self::StringOffset => 0xFFFF_FFFF,
            Self::Short => 0xFFFF,
            Self::Char => 0xFF,
        }
    }
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

/// One column of a table: a bit window at a byte offset inside each row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Resolved name, or `_0x????????` when the hash is unknown.
    pub label: String,
    /// JGadget hash of the name; the on-disk identifier.
    pub hash: u32,
    pub kind: FieldType,
    pub mask: u32,
    pub shift: u8,
    /// Byte offset of the cell inside a row.
    pub offset: u16,
}

impl Column {
    /// A full-width column. The offset is assigned when the column list is
    /// attached to a [`crate::Table`].
    pub fn new(name: &str, kind: FieldType) -> Self {
        Self {
            label: name.to_owned(),
            hash: NameTable::hash_for_label(name),
            kind,
            mask: kind.full_mask(),
            shift: 0,
            offset: 0,
        }
    }

    /// Validate a wire descriptor into a column, resolving its name hash.
    pub fn from_descriptor(descriptor: ColumnDescriptor, names: &NameTable) -> Result<Self> {
        Ok(Self {
            label: names.resolve(descriptor.name_hash),
            hash: descriptor.name_hash,
            kind: FieldType::from_raw(descriptor.cell_type)?,
            mask: descriptor.bitmask,
            shift: descriptor.shift,
            offset: descriptor.offset,
        })
    }

    /// The wire descriptor for this column.
    pub fn descriptor(&self) -> ColumnDescriptor {
        ColumnDescriptor {
            name_hash: self.hash,
            bitmask: self.mask,
            offset: self.offset,
            shift: self.shift,
            cell_type: self.kind.raw(),
        }
    }

    /// The bit window of this column after shifting, e.g. `0xFF` for an
    /// 8-bit window regardless of where it sits in the raw word.
    pub fn window(&self) -> u32 {
        self.mask >> self.shift
    }
}

/// Sign-extend `value` from the width of `window` (the shifted-down mask).
/// A zero window yields zero; a window reaching bit 31 is returned as-is.
pub(crate) fn sign_extend(value: u32, window: u32) -> i32 {
    if window == 0 {
        return 0;
    }
    let width = 32 - window.leading_zeros();
    if width >= 32 || value & (1 << (width - 1)) == 0 {
        value as i32
    } else {
        (value | !window) as i32
    }
}
