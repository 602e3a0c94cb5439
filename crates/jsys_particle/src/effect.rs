//! Auto effect list rows and their enumerated field encodings.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use jsys_bcsv::{Column, FieldType, Table, Value};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Flags over the translation, rotation and scale components of a
/// transform, written as a slash-joined subset of `T`, `R`, `S`.
///
/// Any order is accepted when parsing; the canonical order `T/R/S` is
/// produced when formatting. The wire bit values are T=1, R=2, S=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrsFlags {
    pub translation: bool,
    pub rotation: bool,
    pub scale: bool,
}

impl TrsFlags {
    pub fn is_empty(&self) -> bool {
        !(self.translation || self.rotation || self.scale)
    }

    pub fn bits(&self) -> u32 {
        u32::from(self.translation) | u32::from(self.rotation) << 1 | u32::from(self.scale) << 2
    }

    pub fn from_bits(bits: u32) -> Self {
        Self {
            translation: bits & 1 != 0,
            rotation: bits & 2 != 0,
            scale: bits & 4 != 0,
        }
    }
}

/// Error produced when a `T/R/S` string cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid transform flag {0:?}, expected a subset of T/R/S")]
pub struct TrsParseError(String);

impl FromStr for TrsFlags {
    type Err = TrsParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut flags = Self::default();
        if s.is_empty() {
            return Ok(flags);
        }
        for part in s.split('/') {
            match part {
                "T" => flags.translation = true,
                "R" => flags.rotation = true,
                "S" => flags.scale = true,
                other => return Err(TrsParseError(other.to_owned())),
            }
        }
        Ok(flags)
    }
}

impl fmt::Display for TrsFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.translation {
            parts.push("T");
        }
        if self.rotation {
            parts.push("R");
        }
        if self.scale {
            parts.push("S");
        }
        f.write_str(&parts.join("/"))
    }
}

impl Serialize for TrsFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TrsFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Rendering priority of an effect. The wire form is the name string; the
/// discriminants are the engine's draw-order indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOrder {
    #[serde(rename = "3D")]
    ThreeD = 0,
    #[serde(rename = "PAUSE_IGNORE")]
    PauseIgnore = 1,
    #[serde(rename = "INDIRECT")]
    Indirect = 2,
    #[serde(rename = "AFTER_INDIRECT")]
    AfterIndirect = 3,
    #[serde(rename = "BLOOM_EFFECT")]
    BloomEffect = 4,
    #[serde(rename = "AFTER_IMAGE_EFFECT")]
    AfterImageEffect = 5,
    #[serde(rename = "2D")]
    TwoD = 6,
    #[serde(rename = "2D_PAUSE_IGNORE")]
    TwoDPauseIgnore = 7,
    #[serde(rename = "FOR_2D_MODEL")]
    For2dModel = 8,
}

impl DrawOrder {
    const NAMES: [(&'static str, DrawOrder); 9] = [
        ("3D", Self::ThreeD),
        ("PAUSE_IGNORE", Self::PauseIgnore),
        ("INDIRECT", Self::Indirect),
        ("AFTER_INDIRECT", Self::AfterIndirect),
        ("BLOOM_EFFECT", Self::BloomEffect),
        ("AFTER_IMAGE_EFFECT", Self::AfterImageEffect),
        ("2D", Self::TwoD),
        ("2D_PAUSE_IGNORE", Self::TwoDPauseIgnore),
        ("FOR_2D_MODEL", Self::For2dModel),
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::NAMES.iter().find(|(_, v)| v.index() == index).map(|(_, v)| *v)
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.index() as usize].0
    }

    /// Resolve a wire name; unknown names decode as "undefined" (`None`),
    /// matching how the game treats them.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// One row of the auto effect list.
///
/// Serialization omits every field holding its default value; missing keys
/// deserialize back to those defaults, so `Effects.json` carries only the
/// meaningful fields of each row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Effect {
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anim_name: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub continue_anim_end: bool,
    pub unique_name: String,
    pub effect_name: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub joint_name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset_x: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset_y: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset_z: f32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub start_frame: i32,
    #[serde(default = "minus_one", skip_serializing_if = "is_minus_one")]
    pub end_frame: i32,
    #[serde(default, skip_serializing_if = "TrsFlags::is_empty")]
    pub affect: TrsFlags,
    #[serde(default, skip_serializing_if = "TrsFlags::is_empty")]
    pub follow: TrsFlags,
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub scale_value: f32,
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub rate_value: f32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prm_color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub env_color: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub light_affect_value: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_order: Option<DrawOrder>,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            anim_name: Vec::new(),
            continue_anim_end: false,
            unique_name: String::new(),
            effect_name: Vec::new(),
            parent_name: String::new(),
            joint_name: String::new(),
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
            start_frame: 0,
            end_frame: -1,
            affect: TrsFlags::default(),
            follow: TrsFlags::default(),
            scale_value: 1.0,
            rate_value: 1.0,
            prm_color: String::new(),
            env_color: String::new(),
            light_affect_value: 0.0,
            draw_order: None,
        }
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero(v: &f32) -> bool {
    *v == 0.0
}

fn is_one(v: &f32) -> bool {
    *v == 1.0
}

fn one() -> f32 {
    1.0
}

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

fn is_minus_one(v: &i32) -> bool {
    *v == -1
}

fn minus_one() -> i32 {
    -1
}

impl Effect {
    /// The AutoEffectList column schema, in wire order. The leading `No`
    /// column carries the row index and never appears in the documents.
    pub fn schema() -> Vec<Column> {
        use FieldType::{Float, Long, StringOffset};
        vec![
            Column::new("No", Long),
            Column::new("GroupName", StringOffset),
            Column::new("AnimName", StringOffset),
            Column::new("ContinueAnimEnd", Long),
            Column::new("UniqueName", StringOffset),
            Column::new("EffectName", StringOffset),
            Column::new("ParentName", StringOffset),
            Column::new("JointName", StringOffset),
            Column::new("OffsetX", Float),
            Column::new("OffsetY", Float),
            Column::new("OffsetZ", Float),
            Column::new("StartFrame", Long),
            Column::new("EndFrame", Long),
            Column::new("Affect", StringOffset),
            Column::new("Follow", StringOffset),
            Column::new("ScaleValue", Float),
            Column::new("RateValue", Float),
            Column::new("PrmColor", StringOffset),
            Column::new("EnvColor", StringOffset),
            Column::new("LightAffectValue", Float),
            Column::new("DrawOrder", StringOffset),
        ]
    }

    /// Decode one table row. Cells are read tolerantly: a missing column
    /// falls back to the field default, `ContinueAnimEnd` accepts both the
    /// integer form and the legacy `"on"` string, and an unknown DrawOrder
    /// name decodes as undefined.
    pub fn from_row(table: &Table, row: usize) -> Result<Self> {
        let text = |label: &str| {
            table
                .get(row, label)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        let int = |label: &str, fallback: i32| {
            table
                .get(row, label)
                .and_then(Value::as_int)
                .unwrap_or(fallback)
        };
        let float = |label: &str, fallback: f32| {
            table
                .get(row, label)
                .and_then(Value::as_float)
                .unwrap_or(fallback)
        };

        let continue_anim_end = match table.get(row, "ContinueAnimEnd") {
            Some(Value::Int(v)) => *v != 0,
            Some(Value::String(s)) => s == "on",
            _ => false,
        };

        let affect = text("Affect").parse().unwrap_or_default();
        let follow = text("Follow").parse().unwrap_or_default();

        Ok(Self {
            group_name: text("GroupName"),
            anim_name: split_list(&text("AnimName"), ','),
            continue_anim_end,
            unique_name: text("UniqueName"),
            effect_name: split_list(&text("EffectName"), ' '),
            parent_name: text("ParentName"),
            joint_name: text("JointName"),
            offset_x: float("OffsetX", 0.0),
            offset_y: float("OffsetY", 0.0),
            offset_z: float("OffsetZ", 0.0),
            start_frame: int("StartFrame", 0),
            end_frame: int("EndFrame", -1),
            affect,
            follow,
            scale_value: float("ScaleValue", 1.0),
            rate_value: float("RateValue", 1.0),
            prm_color: text("PrmColor"),
            env_color: text("EnvColor"),
            light_affect_value: float("LightAffectValue", 0.0),
            draw_order: DrawOrder::from_name(&text("DrawOrder")),
        })
    }

    /// Encode this row as a label → cell map for the schema above, with
    /// `index` as the `No` cell.
    pub fn to_row_map(&self, index: i32) -> IndexMap<String, Value> {
        let mut map = IndexMap::new();
        let mut put = |label: &str, value: Value| {
            map.insert(label.to_owned(), value);
        };

        put("No", Value::Int(index));
        put("GroupName", Value::String(self.group_name.clone()));
        put("AnimName", Value::String(self.anim_name.join(",")));
        put(
            "ContinueAnimEnd",
            Value::Int(i32::from(self.continue_anim_end)),
        );
        put("UniqueName", Value::String(self.unique_name.clone()));
        put("EffectName", Value::String(self.effect_name.join(" ")));
        put("ParentName", Value::String(self.parent_name.clone()));
        put("JointName", Value::String(self.joint_name.clone()));
        put("OffsetX", Value::Float(self.offset_x));
        put("OffsetY", Value::Float(self.offset_y));
        put("OffsetZ", Value::Float(self.offset_z));
        put("StartFrame", Value::Int(self.start_frame));
        put("EndFrame", Value::Int(self.end_frame));
        put("Affect", Value::String(self.affect.to_string()));
        put("Follow", Value::String(self.follow.to_string()));
        put("ScaleValue", Value::Float(self.scale_value));
        put("RateValue", Value::Float(self.rate_value));
        put("PrmColor", Value::String(self.prm_color.clone()));
        put("EnvColor", Value::String(self.env_color.clone()));
        put("LightAffectValue", Value::Float(self.light_affect_value));
        put(
            "DrawOrder",
            Value::String(
                self.draw_order
                    .map(|order| order.name().to_owned())
                    .unwrap_or_default(),
            ),
        );
        map
    }
}

fn split_list(s: &str, separator: char) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(separator).map(str::to_owned).collect()
}
