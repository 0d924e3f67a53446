//! GPU-accelerated canvas blit using glow (OpenGL).
//!
//! The sketch surface is a full-viewport CPU pixel buffer refreshed every
//! frame; pushing it through egui's Shape → tessellation → vertex path
//! costs a full-texture tint pass per frame. This renders it as a single
//! textured quad inside an [`egui::PaintCallback`] instead.

use std::sync::{Arc, Mutex};

use glow::HasContext as _;

// ─── Shader sources ─────────────────────────────────────────────────────

const VERT_SRC: &str = r#"#version 140

in vec2 a_pos;
out vec2 v_uv;

void main() {
    // Map [-1, 1] NDC to [0, 1] UV with y=0 at screen top
    v_uv = vec2(a_pos.x * 0.5 + 0.5, 0.5 - a_pos.y * 0.5);
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

const FRAG_SRC: &str = r#"#version 140

in vec2 v_uv;
out vec4 frag_color;

uniform float u_has_frame;     // 1.0 = sketch texture ready
uniform sampler2D u_frame_tex; // texture unit 0

void main() {
    frag_color = vec4(0.0, 0.0, 0.0, 1.0);
    if (u_has_frame > 0.5) {
        vec4 frame = texture(u_frame_tex, v_uv);
        frag_color = vec4(mix(frag_color.rgb, frame.rgb, frame.a), 1.0);
    }
}
"#;

// ─── GL resource bundle ─────────────────────────────────────────────────

struct GlResources {
    program: glow::Program,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    frame_tex: glow::Texture,
    loc_has_frame: Option<glow::UniformLocation>,
    loc_frame_tex: Option<glow::UniformLocation>,
}

struct PendingFrame {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

// ─── Public shared state ────────────────────────────────────────────────

/// Shared state for the GPU canvas blit.
///
/// Wrap in `Arc<Mutex<GlCanvasState>>` and share between the app logic
/// (which pushes pixel data each frame) and the [`egui::PaintCallback`]
/// (which uploads and renders).
pub struct GlCanvasState {
    resources: Option<GlResources>,
    frame_data: Option<PendingFrame>,
    frame_dirty: bool,
    has_frame: bool,
}

impl GlCanvasState {
    pub fn new() -> Self {
        Self {
            resources: None,
            frame_data: None,
            frame_dirty: false,
            has_frame: false,
        }
    }

    /// Store the latest sketch surface pixels (RGBA `u8`).
    pub fn set_frame_pixels(&mut self, rgba: Vec<u8>, width: u32, height: u32) {
        self.frame_data = Some(PendingFrame { rgba, width, height });
        self.frame_dirty = true;
        self.has_frame = true;
    }

    /// Release GL resources.  Must be called with a current GL context.
    #[allow(dead_code)]
    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(res) = self.resources.take() {
            unsafe {
                gl.delete_program(res.program);
                gl.delete_vertex_array(res.vao);
                gl.delete_buffer(res.vbo);
                gl.delete_texture(res.frame_tex);
            }
        }
    }
}

// ─── GL helpers ─────────────────────────────────────────────────────────

fn compile_shader(gl: &glow::Context, kind: u32, source: &str) -> glow::Shader {
    unsafe {
        let shader = gl.create_shader(kind).expect("GL: 创建着色器失败");
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            panic!("GL: 着色器编译失败:\n{log}");
        }
        shader
    }
}

fn init_resources(gl: &glow::Context) -> GlResources {
    unsafe {
        // ── compile & link ──
        let vert = compile_shader(gl, glow::VERTEX_SHADER, VERT_SRC);
        let frag = compile_shader(gl, glow::FRAGMENT_SHADER, FRAG_SRC);

        let program = gl.create_program().expect("GL: 创建程序失败");
        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            panic!("GL: 着色器链接失败:\n{log}");
        }
        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        // ── fullscreen quad (triangle strip) ──
        let vertices: [f32; 8] = [
            -1.0, -1.0,
             1.0, -1.0,
            -1.0,  1.0,
             1.0,  1.0,
        ];
        let vbo = gl.create_buffer().expect("GL: 创建 VBO 失败");
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        let vertex_bytes: &[u8] = core::slice::from_raw_parts(
            vertices.as_ptr() as *const u8,
            core::mem::size_of_val(&vertices),
        );
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vertex_bytes, glow::STATIC_DRAW);

        let vao = gl.create_vertex_array().expect("GL: 创建 VAO 失败");
        gl.bind_vertex_array(Some(vao));

        let a_pos = gl
            .get_attrib_location(program, "a_pos")
            .expect("GL: 找不到 a_pos 属性");
        gl.enable_vertex_attrib_array(a_pos);
        gl.vertex_attrib_pointer_f32(a_pos, 2, glow::FLOAT, false, 8, 0);

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        let frame_tex = create_empty_texture(gl);

        GlResources {
            program,
            vao,
            vbo,
            frame_tex,
            loc_has_frame: gl.get_uniform_location(program, "u_has_frame"),
            loc_frame_tex: gl.get_uniform_location(program, "u_frame_tex"),
        }
    }
}

fn create_empty_texture(gl: &glow::Context) -> glow::Texture {
    unsafe {
        let tex = gl.create_texture().expect("GL: 创建纹理失败");
        gl.bind_texture(glow::TEXTURE_2D, Some(tex));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            1,
            1,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(&[0u8; 4]),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
        tex
    }
}

fn upload_texture(gl: &glow::Context, tex: glow::Texture, data: &PendingFrame) {
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(tex));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            data.width as i32,
            data.height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(&data.rgba),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
    }
}

// ─── Public API ─────────────────────────────────────────────────────────

/// Build the [`egui::PaintCallback`] that blits the sketch surface via raw
/// OpenGL into `canvas_rect`.
pub fn make_canvas_callback(
    state: Arc<Mutex<GlCanvasState>>,
    canvas_rect: egui::Rect,
) -> egui::PaintCallback {
    let cb = egui_glow::CallbackFn::new(move |_info, painter| {
        let gl = painter.gl();
        let mut st = state.lock().unwrap();

        // ── lazy init ──
        if st.resources.is_none() {
            st.resources = Some(init_resources(gl));
        }
        // Copy GL handles out so we can release the immutable borrow before mutating.
        let res = st.resources.as_ref().unwrap();
        let program = res.program;
        let vao = res.vao;
        let frame_tex = res.frame_tex;
        let loc_has_frame = res.loc_has_frame.clone();
        let loc_frame_tex = res.loc_frame_tex.clone();
        let _ = res;

        // ── upload dirty texture ──
        if st.frame_dirty {
            if let Some(data) = &st.frame_data {
                upload_texture(gl, frame_tex, data);
            }
            st.frame_dirty = false;
        }

        // ── draw ──
        unsafe {
            gl.disable(glow::SCISSOR_TEST);
            gl.disable(glow::BLEND);

            gl.use_program(Some(program));

            gl.uniform_1_f32(
                loc_has_frame.as_ref(),
                if st.has_frame { 1.0 } else { 0.0 },
            );

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(frame_tex));
            gl.uniform_1_i32(loc_frame_tex.as_ref(), 0);

            gl.bind_vertex_array(Some(vao));
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
            gl.bind_vertex_array(None);

            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.use_program(None);
        }
    });

    egui::PaintCallback {
        rect: canvas_rect,
        callback: Arc::new(cb),
    }
}
