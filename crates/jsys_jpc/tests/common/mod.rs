//! Builders for complete in-memory containers shared by the integration
//! tests and benchmarks.

use jsys_jpc::blocks::base_shape::{
    AlphaCompareFlags, BaseShape, BaseShapeFlags, BlendModeFlags, ColorFlags, ColorFrame,
    TextureFlags, ZModeFlags,
};
use jsys_jpc::blocks::dynamics::{DynamicsBlock, DynamicsFlags};
use jsys_jpc::blocks::field::{FieldBlock, FieldFlags};
use jsys_jpc::blocks::key::{KeyBlock, Keyframe};
use jsys_jpc::color::Color;
use jsys_jpc::enums::{BlendFactor, BlendMode, KeyType};
use jsys_jpc::{Container, Resource, Texture};

pub fn sample_dynamics() -> DynamicsBlock {
    DynamicsBlock {
        flags: DynamicsFlags::try_from_bits(0x0000_0101).unwrap(),
        unknown: 0,
        emitter_scale_x: 1.0,
        emitter_scale_y: 1.0,
        emitter_scale_z: 1.0,
        emitter_translation_x: 0.0,
        emitter_translation_y: 50.0,
        emitter_translation_z: 0.0,
        emitter_direction_x: 0.0,
        emitter_direction_y: 1.0,
        emitter_direction_z: 0.0,
        initial_velocity_omni: 5.0,
        initial_velocity_axis: 0.0,
        initial_velocity_random: 1.5,
        initial_velocity_direction: 0.0,
        spread: 0.25,
        initial_velocity_ratio: 0.0,
        rate: 2.0,
        rate_random: 0.5,
        lifetime_random: 0.0,
        volume_sweep: 1.0,
        volume_minimum_radius: 0.0,
        air_resistance: 1.0,
        moment_random: 0.0,
        emitter_rotation_x_deg: 0,
        emitter_rotation_y_deg: 90,
        emitter_rotation_z_deg: 0,
        max_frame: 0,
        start_frame: 0,
        lifetime: 60,
        volume_size: 10,
        division_number: 1,
        rate_step: 1,
    }
}

pub fn sample_field() -> FieldBlock {
    FieldBlock {
        flags: FieldFlags::try_from_bits(0x0000_0000).unwrap(),
        position_x: 0.0,
        position_y: -100.0,
        position_z: 0.0,
        direction_x: 0.0,
        direction_y: -1.0,
        direction_z: 0.0,
        param_1: 0.4,
        param_2: 0.0,
        param_3: 0.0,
        fade_in: 0.0,
        fade_out: 0.0,
        enter_time: 0.0,
        distance_time: 0.0,
        cycle: 0,
    }
}

pub fn sample_key() -> KeyBlock {
    KeyBlock {
        key_type: KeyType::Rate,
        unused: 0,
        is_loop: true,
        keyframes: vec![
            Keyframe {
                time: 0.0,
                value: 0.0,
                tangent_in: 0.0,
                tangent_out: 1.0,
            },
            Keyframe {
                time: 30.0,
                value: 2.0,
                tangent_in: 1.0,
                tangent_out: 0.0,
            },
        ],
    }
}

pub fn sample_base_shape() -> BaseShape {
    BaseShape {
        flags: BaseShapeFlags::try_from_bits(0x2).unwrap(),
        base_size_x: 1.0,
        base_size_y: 1.0,
        blend_mode_flags: BlendModeFlags::try_from_bits(
            (BlendMode::Blend.bits()
                | BlendFactor::SourceAlpha.bits() << 2
                | BlendFactor::One.bits() << 6) as u16,
        )
        .unwrap(),
        alpha_compare_flags: AlphaCompareFlags::from_bits(0),
        alpha_reference_0: 0,
        alpha_reference_1: 0,
        z_mode_flags: ZModeFlags::from_bits(0x17),
        texture_flags: TextureFlags::try_from_bits(0).unwrap(),
        texture_index: 0,
        color_flags: ColorFlags::try_from_bits(0).unwrap(),
        color_animation_max_frame: 30,
        primary_color: Color::new(0xFF, 0xFF, 0xFF, 0xFF),
        environment_color: Color::new(0x80, 0x80, 0x80, 0xFF),
        animation_random: 0,
        color_loop_offset_mask: 0,
        texture_index_loop_offset_mask: 0,
        tex_scroll: None,
        texture_index_anim_data: Some(vec![0, 1]),
        primary_color_keyframes: Some(vec![
            ColorFrame {
                frame: 0,
                color: Color::new(0xFF, 0x00, 0x00, 0xFF),
            },
            ColorFrame {
                frame: 30,
                color: Color::new(0xFF, 0xFF, 0x00, 0x00),
            },
        ]),
        environment_color_keyframes: None,
    }
}

pub fn sample_extra_shape() -> jsys_jpc::blocks::ExtraShape {
    use jsys_jpc::blocks::extra_shape::{ExtraShape, ExtraShapeFlags};

    ExtraShape {
        flags: ExtraShapeFlags::try_from_bits(0x1 | 1 << 16).unwrap(),
        scale_in_timing: 0.1,
        scale_out_timing: 0.9,
        scale_in_value_x: 0.0,
        scale_out_value_x: 1.0,
        scale_in_value_y: 0.0,
        scale_out_value_y: 1.0,
        scale_out_random: 0.0,
        scale_animation_x_max_frame: 0,
        scale_animation_y_max_frame: 0,
        alpha_in_timing: 0.2,
        alpha_out_timing: 0.8,
        alpha_in_value: 0.0,
        alpha_base_value: 1.0,
        alpha_out_value: 0.0,
        alpha_wave_frequency: 0.0,
        alpha_wave_random: 0.0,
        alpha_wave_amplitude: 0.0,
        rotate_angle: 0.0,
        rotate_angle_random: 0.0,
        rotate_speed: 0.0,
        rotate_speed_random: 0.0,
        rotate_direction: 0.0,
    }
}

/// A resource exercising repeated blocks and the texture-index terminator.
pub fn sample_resource(texture_ids: Vec<i16>) -> Resource {
    Resource {
        index: 0,
        dynamics: sample_dynamics(),
        fields: vec![sample_field()],
        keys: vec![sample_key()],
        base_shape: sample_base_shape(),
        extra_shape: sample_extra_shape(),
        child_shape: None,
        ex_tex_shape: None,
        texture_ids,
    }
}

/// A 64-byte stand-in BTI payload.
pub fn sample_bti_payload(fill: u8) -> Vec<u8> {
    let mut data = vec![
        0x01, 0x00, 0x00, 0x04, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x20,
    ];
    data.extend_from_slice(&[fill; 16]);
    data.extend_from_slice(&[0; 16]);
    data
}

/// A container with two textures and `resources` copies of the sample
/// resource referencing both.
pub fn sample_container(resources: usize) -> Container {
    let mut container = Container::new();
    container
        .add_texture(Texture::new("mr_glow01_i", sample_bti_payload(0x11)))
        .unwrap();
    container
        .add_texture(Texture::new("mr_spark00_i", sample_bti_payload(0x22)))
        .unwrap();
    for _ in 0..resources {
        container.resources.push(sample_resource(vec![0, 1]));
    }
    container
}
