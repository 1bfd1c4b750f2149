//! Window creation and the per-frame loop.
//!
//! [`OrreryApp`] implements winit's [`ApplicationHandler`]. Window events are
//! translated into [`InputEvent`]s as they arrive and drained once per
//! redraw, after which the scene is evaluated at the current clock time and
//! handed to the renderer.

use std::sync::Arc;
use std::time::Duration;

use orrery_assets::{TextureSource, decode_rgba};
use orrery_config::Config;
use orrery_input::{CameraController, InputEvent, InputQueue, WinitBridge};
use orrery_mesh::MeshLibrary;
use orrery_render::{RenderContextError, Renderer, SurfaceError};
use orrery_scene::{FrameClock, FramePacket, OrbitSceneGraph, Projection, SceneError};
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::frame_pacer::FramePacer;
use crate::startup::Startup;

/// Reasons the event loop stopped abnormally.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] RenderContextError),

    #[error("scene evaluation failed: {0}")]
    Scene(#[from] SceneError),

    #[error("rendering stopped: {0}")]
    Surface(SurfaceError),
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

/// Outcome of one pass over the input queue and scene.
#[derive(Debug)]
pub enum FrameStep {
    Render(FramePacket),
    Quit,
}

pub struct OrreryApp {
    config: Config,
    meshes: MeshLibrary,
    graph: OrbitSceneGraph,
    textures: Vec<TextureSource>,
    camera: CameraController,
    projection: Projection,
    clock: FrameClock,
    bridge: WinitBridge,
    queue: InputQueue,
    pacer: FramePacer,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    failure: Option<AppError>,
}

impl OrreryApp {
    /// `clock` should be started at process launch so animation time counts
    /// from then, not from when the window opens.
    pub fn new(startup: Startup, clock: FrameClock) -> Self {
        let Startup {
            config,
            meshes,
            graph,
            textures,
        } = startup;
        let camera = CameraController::from_config(&config.camera, config.scene.tilt_enabled);
        let mut projection = Projection::new(
            config.projection.fov_y_deg,
            config.projection.near,
            config.projection.far,
        );
        projection.set_viewport(config.window.width, config.window.height);
        let pacer = FramePacer::new(Duration::from_millis(config.frame.frame_sleep_ms));

        Self {
            config,
            meshes,
            graph,
            textures,
            camera,
            projection,
            clock,
            bridge: WinitBridge::new(),
            queue: InputQueue::new(),
            pacer,
            window: None,
            renderer: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    #[must_use]
    pub fn graph(&self) -> &OrbitSceneGraph {
        &self.graph
    }

    pub fn queue_mut(&mut self) -> &mut InputQueue {
        &mut self.queue
    }

    /// Feed every queued event to the camera. Returns `true` once a
    /// [`InputEvent::Quit`] is seen; events after it are discarded.
    pub fn process_input(&mut self) -> bool {
        let mut quit = false;
        for event in self.queue.drain() {
            if quit {
                continue;
            }
            match event {
                InputEvent::Quit => quit = true,
                other => self.camera.handle_event(&other),
            }
        }
        quit
    }

    /// Drain input, read the clock, and assemble this frame's packet.
    pub fn step(&mut self) -> Result<FrameStep, SceneError> {
        if self.process_input() {
            return Ok(FrameStep::Quit);
        }
        let t = self.clock.now();
        let placements = self.graph.compute_frame(t, self.camera.tilt_enabled())?;
        Ok(FrameStep::Render(FramePacket::build(
            t,
            &placements,
            self.camera.view_transform(),
            self.projection.matrix(),
        )))
    }

    /// Decode and upload every available texture, attaching each to its body.
    /// Failures leave the body on its flat color.
    fn load_textures(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        for source in self.textures.iter().filter(|s| s.status.is_available()) {
            let image = match decode_rgba(&source.path) {
                Ok(image) => image,
                Err(e) => {
                    warn!(body = %source.body, error = %e, "Texture decode failed");
                    continue;
                }
            };
            match renderer.load_texture(&source.body, &image.pixels, image.width, image.height) {
                Ok(id) => {
                    if self.graph.set_texture(&source.body, Some(id)) {
                        info!(
                            body = %source.body,
                            "{}x{} texture loaded",
                            image.width,
                            image.height
                        );
                    } else {
                        warn!(body = %source.body, "Texture has no matching body");
                    }
                }
                Err(e) => warn!(body = %source.body, error = %e, "Texture upload failed"),
            }
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let packet = match self.step() {
            Ok(FrameStep::Render(packet)) => packet,
            Ok(FrameStep::Quit) => {
                info!("Quit requested, shutting down");
                event_loop.exit();
                return;
            }
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        if let Some(renderer) = &mut self.renderer {
            match renderer.render(&packet) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => {
                    self.fail(event_loop, AppError::Surface(e));
                    return;
                }
                Err(SurfaceError::Lost) => {
                    if let Some(window) = &self.window {
                        let size = window.inner_size();
                        renderer.resize(size.width, size.height);
                    }
                }
                Err(e) => debug!("{e}"),
            }
        }

        self.pacer.tick();
        self.pacer.sleep();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for OrreryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        let size = window.inner_size();
        self.projection.set_viewport(size.width, size.height);

        match Renderer::new(window.clone(), self.config.window.vsync, &self.meshes) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }
        self.load_textures();

        info!(
            "Window created: {}x{} (scale: {:.2})",
            size.width,
            size.height,
            window.scale_factor()
        );
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.bridge.push_window_event(&event, &mut self.queue);
        match event {
            WindowEvent::CloseRequested => {
                // The window may not redraw again, so act on it now.
                if self.process_input() {
                    info!("Close requested, shutting down");
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                if self.projection.set_viewport(new_size.width, new_size.height) {
                    debug!("Viewport {}x{}", new_size.width, new_size.height);
                }
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open the window and run until it closes.
///
/// # Errors
///
/// The first fatal error seen by the loop: window or GPU creation, scene
/// evaluation, or an unrecoverable surface error.
pub fn run(startup: Startup, clock: FrameClock) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = OrreryApp::new(startup, clock);
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
