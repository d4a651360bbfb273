/// WebGL2 implementation of the scene's render backend
use std::collections::HashMap;

use js_sys::{Float32Array, Uint16Array};
use log::{debug, info};
use shapes_core::{Mat4, Mesh, RenderBackend, ShapeKind};
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::WebError;

const POSITION_LOCATION: u32 = 0;
const COLOR_LOCATION: u32 = 1;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec4 aColor;

uniform mat4 uProjection;
uniform mat4 uModelView;

out vec4 vColor;

void main() {
    gl_Position = uProjection * uModelView * vec4(aPosition, 1.0);
    vColor = aColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec4 vColor;
out vec4 outColor;

void main() {
    outColor = vColor;
}
"#;

/// Buffers of one uploaded mesh, captured in a vertex array object
struct GpuMesh {
    vao: WebGlVertexArrayObject,
    index_count: i32,
}

pub struct GlBackend {
    gl: Gl,
    program: WebGlProgram,
    u_projection: WebGlUniformLocation,
    u_model_view: WebGlUniformLocation,
    clear_color: [f32; 4],
    meshes: HashMap<ShapeKind, GpuMesh>,
}

impl GlBackend {
    pub fn new(gl: Gl, clear_color: [f32; 4]) -> Result<Self, WebError> {
        let vertex = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let u_projection = gl
            .get_uniform_location(&program, "uProjection")
            .ok_or(WebError::Resource("uProjection uniform"))?;
        let u_model_view = gl
            .get_uniform_location(&program, "uModelView")
            .ok_or(WebError::Resource("uModelView uniform"))?;

        gl.enable(Gl::DEPTH_TEST);
        gl.depth_func(Gl::LEQUAL);
        info!("WebGL2 program linked");

        Ok(Self {
            gl,
            program,
            u_projection,
            u_model_view,
            clear_color,
            meshes: HashMap::new(),
        })
    }

    /// Upload a mesh once; later draws of `kind` reuse these buffers
    pub fn upload(&mut self, kind: ShapeKind, mesh: &Mesh) -> Result<(), WebError> {
        mesh.validate()
            .map_err(|source| WebError::InvalidMesh { kind, source })?;

        let gl = &self.gl;
        let vao = gl
            .create_vertex_array()
            .ok_or(WebError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let positions = mesh.positions().concat();
        self.upload_attribute(&positions, POSITION_LOCATION, 3)?;
        let colors = mesh.colors().concat();
        self.upload_attribute(&colors, COLOR_LOCATION, 4)?;

        let index_buffer = gl
            .create_buffer()
            .ok_or(WebError::Resource("index buffer"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        let indices = Uint16Array::from(mesh.indices());
        gl.buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &indices, Gl::STATIC_DRAW);

        gl.bind_vertex_array(None);

        debug!(
            "uploaded {}: {} vertices, {} indices",
            kind.name(),
            mesh.vertex_count(),
            mesh.indices().len()
        );
        self.meshes.insert(
            kind,
            GpuMesh {
                vao,
                index_count: mesh.indices().len() as i32,
            },
        );
        Ok(())
    }

    fn upload_attribute(&self, data: &[f32], location: u32, size: i32) -> Result<(), WebError> {
        let gl = &self.gl;
        let buffer = gl
            .create_buffer()
            .ok_or(WebError::Resource("vertex buffer"))?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        let array = Float32Array::from(data);
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, Gl::STATIC_DRAW);
        gl.vertex_attrib_pointer_with_i32(location, size, Gl::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(location);
        Ok(())
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }
}

impl RenderBackend for GlBackend {
    fn clear(&mut self) {
        let [r, g, b, a] = self.clear_color;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    fn draw(&mut self, kind: ShapeKind, projection: &Mat4, model_view: &Mat4) {
        let Some(mesh) = self.meshes.get(&kind) else {
            return;
        };

        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&self.u_projection), false, projection.as_slice());
        gl.uniform_matrix4fv_with_f32_array(Some(&self.u_model_view), false, model_view.as_slice());
        gl.bind_vertex_array(Some(&mesh.vao));
        gl.draw_elements_with_i32(Gl::TRIANGLES, mesh.index_count, Gl::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, WebError> {
    let shader = gl
        .create_shader(kind)
        .ok_or(WebError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error creating shader".to_string());
        gl.delete_shader(Some(&shader));
        Err(WebError::ShaderCompile(log))
    }
}

fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, WebError> {
    let program = gl
        .create_program()
        .ok_or(WebError::Resource("shader program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error creating program".to_string());
        gl.delete_program(Some(&program));
        Err(WebError::ProgramLink(log))
    }
}
