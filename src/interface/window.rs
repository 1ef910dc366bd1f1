//! The window, its OpenGL context and the event loop that redraws it.

use glutin::dpi::LogicalSize;
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use log::{error, info};
use shaders::{GlDriver, ProgramBuilder, SourceLoader};

use super::cli::Config;
use crate::error::AppError;
use crate::graphics::quad::Mesh;
use crate::graphics::scene::Scene;
use crate::graphics::utils::gl_string;
use crate::graphics::version::GlVersion;

/// A window with a current context and a scene ready to draw.
pub struct GlWindow {
    event_loop: EventLoop<()>,
    context: WindowedContext<PossiblyCurrent>,
    scene: Scene,
}

impl GlWindow {
    /// Opens the window, checks the driver, builds the shader program and uploads the quad.
    ///
    /// Any failure here is final; nothing is retried.
    pub fn create(config: &Config) -> Result<Self, AppError> {
        let required = config.required_version();

        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(f64::from(config.width), f64::from(config.height)));

        let context = ContextBuilder::new()
            // Any core context; the version is checked by `check_driver` once it is current.
            .with_gl(GlRequest::Latest)
            .with_gl_profile(GlProfile::Core)
            .with_double_buffer(Some(true))
            .with_depth_buffer(24)
            .build_windowed(window, &event_loop)?;

        let context = unsafe { context.make_current() }.map_err(|(_, e)| AppError::ContextCurrent(e))?;

        gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
        check_driver(required)?;

        let loader = SourceLoader::new(&config.shader_dir);
        let program = ProgramBuilder::new(GlDriver, &loader)
            .stages(config.stages.iter().map(|(kind, name)| (*kind, name.as_str())))
            .build()?;

        let scene = Scene::new(program, &Mesh::quad())?;
        info!("drawing the quad as {:?}", scene.mode());
        let size = context.window().inner_size();
        scene.resize(size.width, size.height);

        Ok(Self { event_loop, context, scene })
    }

    /// Redraws on demand until the window is closed, then exits the process with status 0.
    pub fn run(self) -> ! {
        let GlWindow { event_loop, context, scene } = self;
        let mut scene = Some(scene);

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        context.resize(size);
                        if let Some(scene) = &scene {
                            scene.resize(size.width, size.height);
                        }
                        context.window().request_redraw();
                    }
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                    _ => {}
                },

                Event::RedrawRequested(_) => {
                    if let Some(scene) = &scene {
                        scene.render();
                        if let Err(e) = context.swap_buffers() {
                            error!("failed to present frame: {}", e);
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                }

                // The process exits right after this event, without running destructors, so the
                // scene's GL objects are released here while the context is still current.
                Event::LoopDestroyed => {
                    if scene.take().is_some() {
                        info!("released scene");
                    }
                }

                _ => {}
            }
        })
    }
}

/// Confirms the GL entry points loaded and the driver provides at least `required`.
fn check_driver(required: GlVersion) -> Result<GlVersion, AppError> {
    if !gl::GetString::is_loaded() || !gl::CreateShader::is_loaded() {
        return Err(AppError::DriverInitFailed("OpenGL functions could not be loaded".to_string()));
    }

    let version = gl_string(gl::VERSION)
        .ok_or_else(|| AppError::DriverInitFailed("driver did not report a version".to_string()))?;
    info!("OpenGL\t{}", version);
    if let Some(glsl) = gl_string(gl::SHADING_LANGUAGE_VERSION) {
        info!("GLSL\t{}", glsl);
    }
    if let Some(renderer) = gl_string(gl::RENDERER) {
        info!("Renderer\t{}", renderer);
    }

    let available = GlVersion::from_gl_string(&version)
        .ok_or_else(|| AppError::DriverInitFailed(format!("unrecognized version string \"{}\"", version)))?;

    require_feature_level(required, available)
}

fn require_feature_level(required: GlVersion, available: GlVersion) -> Result<GlVersion, AppError> {
    if available < required {
        return Err(AppError::FeatureLevelUnsupported { required, available });
    }

    Ok(available)
}
