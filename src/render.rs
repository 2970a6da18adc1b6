use crate::constants::{POSITION_ATTRIBUTE, QUAD_COMPONENTS, QUAD_VERTICES};
use crate::core::{resolve_time_uniform, resolve_uniform};
use crate::error::{FxError, ShaderStage};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

/// Linked program plus the full-screen quad it draws.
#[derive(Debug)]
pub struct Program {
    program: WebGlProgram,
    quad: WebGlBuffer,
}

impl Program {
    pub fn raw(&self) -> &WebGlProgram {
        &self.program
    }

    pub fn quad(&self) -> &WebGlBuffer {
        &self.quad
    }

    pub fn uniform(&self, gl: &GL, name: &str) -> Option<WebGlUniformLocation> {
        resolve_uniform(&[name], |n| gl.get_uniform_location(&self.program, n))
    }

    /// Location of the time-like uniform under either accepted name.
    pub fn time_uniform(&self, gl: &GL) -> Option<WebGlUniformLocation> {
        resolve_time_uniform(|n| gl.get_uniform_location(&self.program, n))
    }
}

/// Obtains an alpha-enabled, non-premultiplied WebGL2 context for `canvas`.
pub fn webgl2_context(canvas: &HtmlCanvasElement) -> Result<GL, FxError> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
    js_sys::Reflect::set(&options, &"premultipliedAlpha".into(), &JsValue::FALSE)?;
    canvas
        .get_context_with_context_options("webgl2", &options)
        .map_err(|_| FxError::ContextUnavailable)?
        .ok_or(FxError::ContextUnavailable)?
        .dyn_into::<GL>()
        .map_err(|_| FxError::ContextUnavailable)
}

/// Compiles and links `vertex` + `fragment`, makes the program current and
/// binds the full-screen quad to its `aPos` attribute.
///
/// On failure nothing is left selected as the current program.
pub fn build_program(gl: &GL, vertex: &str, fragment: &str) -> Result<Program, FxError> {
    let vs = compile_stage(gl, ShaderStage::Vertex, vertex)?;
    let fs = match compile_stage(gl, ShaderStage::Fragment, fragment) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(Some(&vs));
            return Err(e);
        }
    };

    let program = gl.create_program().ok_or(FxError::ContextUnavailable)?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    // flagged shaders are released together with the program
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    if !gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        return Err(FxError::ShaderLink(log));
    }

    gl.use_program(Some(&program));

    let quad = gl.create_buffer().ok_or(FxError::ContextUnavailable)?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
    gl.buffer_data_with_u8_array(
        GL::ARRAY_BUFFER,
        bytemuck::cast_slice(&QUAD_VERTICES),
        GL::STATIC_DRAW,
    );

    let position = gl.get_attrib_location(&program, POSITION_ATTRIBUTE);
    if position < 0 {
        log::warn!("attribute `{}` not found; quad not bound", POSITION_ATTRIBUTE);
    } else {
        let position = position as u32;
        gl.enable_vertex_attrib_array(position);
        gl.vertex_attrib_pointer_with_i32(position, QUAD_COMPONENTS, GL::FLOAT, false, 0, 0);
    }

    Ok(Program { program, quad })
}

fn compile_stage(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, FxError> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl.create_shader(kind).ok_or(FxError::ContextUnavailable)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(FxError::ShaderCompile { stage, log })
    }
}
