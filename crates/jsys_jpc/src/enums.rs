//! Enumerations embedded in JPA block flag words.
//!
//! Every enum occupies a small bit window inside a block's flag word; a
//! window value outside the variant set is a decode error, never a silent
//! clamp.

macro_rules! jpa_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            pub fn bits(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = crate::error::FlagError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(crate::error::FlagError::new(stringify!($name), other)),
                }
            }
        }
    };
}

jpa_enum! {
    /// Shape of the emitter volume.
    VolumeType {
        Cube = 0,
        Sphere = 1,
        Cylinder = 2,
        Torus = 3,
        Point = 4,
        Circle = 5,
        Line = 6,
    }
}

jpa_enum! {
    /// Kind of force a field block applies to live particles.
    FieldType {
        Gravity = 0,
        Air = 1,
        Magnet = 2,
        Newton = 3,
        Vortex = 4,
        Random = 5,
        Drag = 6,
        Convection = 7,
        Spin = 8,
    }
}

jpa_enum! {
    /// Which velocity component a field feeds into.
    FieldAddType {
        FieldAccel = 0,
        BaseVelocity = 1,
        FieldVelocity = 2,
    }
}

jpa_enum! {
    /// The emitter parameter animated by a key block.
    KeyType {
        Rate = 0,
        VolumeSize = 1,
        VolumeSweep = 2,
        VolumeMinRadius = 3,
        Lifetime = 4,
        Moment = 5,
        InitVeloOmni = 6,
        InitVeloAxis = 7,
        InitVeloDirection = 8,
        Spread = 9,
        Scale = 10,
    }
}

jpa_enum! {
    DirectionType {
        Velocity = 0,
        Position = 1,
        PositionInverse = 2,
        EmitterDirection = 3,
        PreviousParticle = 4,
        Dir5 = 5,
    }
}

jpa_enum! {
    RotationType {
        Y = 0,
        X = 1,
        Z = 2,
        Xyz = 3,
        YJiggle = 4,
    }
}

jpa_enum! {
    PlaneType {
        Xy = 0,
        Xz = 1,
    }
}

jpa_enum! {
    ShapeType {
        Point = 0,
        Line = 1,
        Billboard = 2,
        Direction = 3,
        DirectionCross = 4,
        Stripe = 5,
        StripeCross = 6,
        Rotation = 7,
        RotationCross = 8,
        DirectionBillboard = 9,
        YBillboard = 10,
    }
}

jpa_enum! {
    BlendMode {
        None = 0,
        Blend = 1,
        Logic = 2,
    }
}

jpa_enum! {
    BlendFactor {
        Zero = 0,
        One = 1,
        SourceColor = 2,
        InverseSourceColor = 3,
        SourceColorExtra = 4,
        InverseSourceColorExtra = 5,
        SourceAlpha = 6,
        InverseSourceAlpha = 7,
        DestinationAlpha = 8,
        InverseDestinationAlpha = 9,
    }
}

jpa_enum! {
    CompareType {
        Never = 0,
        LessThan = 1,
        LessThanEqual = 2,
        Equal = 3,
        NotEqual = 4,
        GreaterThanEqual = 5,
        GreaterThan = 6,
        Always = 7,
    }
}

jpa_enum! {
    AlphaOperator {
        And = 0,
        Or = 1,
        Xor = 2,
        Xnor = 3,
    }
}

jpa_enum! {
    IndirectTextureMode {
        Off = 0,
        Normal = 1,
    }
}

jpa_enum! {
    /// How an animation index advances over a particle's life.
    CalcIndexType {
        Normal = 0,
        Repeat = 1,
        Reverse = 2,
        Merge = 3,
        Random = 4,
    }
}

jpa_enum! {
    CalcScaleAnimType {
        Normal = 0,
        Repeat = 1,
        Reverse = 2,
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::enums::{BlendFactor, ShapeType, VolumeType};

    #[test]
    fn window_values_map_to_variants() {
        assert_eq!(VolumeType::try_from(0).unwrap(), VolumeType::Cube);
        assert_eq!(VolumeType::try_from(6).unwrap(), VolumeType::Line);
        assert!(VolumeType::try_from(7).is_err());

        assert_eq!(ShapeType::try_from(10).unwrap(), ShapeType::YBillboard);
        assert_eq!(BlendFactor::InverseDestinationAlpha.bits(), 9);
    }

    #[test]
    fn json_names_are_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ShapeType::DirectionCross).unwrap(),
            "\"DIRECTION_CROSS\""
        );
        assert_eq!(
            serde_json::to_string(&VolumeType::Cube).unwrap(),
            "\"CUBE\""
        );
    }
}
