/// WGSL shader for the textured, instanced cubes.
///
/// Group 0 holds the per-frame view and projection; group 1 the base and
/// overlay textures. Model matrices arrive per instance.
pub const CUBE_SHADER: &str = r#"
struct Globals {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var base_texture: texture_2d<f32>;
@group(1) @binding(1)
var overlay_texture: texture_2d<f32>;
@group(1) @binding(2)
var texture_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.projection * globals.view * world_pos;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.uv = vertex.uv;
    return out;
}

const OVERLAY_MIX: f32 = 0.2;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(base_texture, texture_sampler, in.uv);
    let overlay = textureSample(overlay_texture, texture_sampler, in.uv);
    let color = mix(base, overlay, OVERLAY_MIX);

    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let diffuse = max(dot(in.world_normal, light_dir), 0.0);
    let lighting = 0.3 + diffuse * 0.7;
    return vec4<f32>(color.rgb * lighting, color.a);
}
"#;
