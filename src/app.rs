//! Winit-based Application Framework
//!
//! - [`App`]: builder for configuring and launching a windowed program
//! - [`AppHandler`]: trait the program implements
//! - `AppRunner`: internal event loop handler (not exposed)
//!
//! The runner creates the window on `resumed`, blocks on GPU context
//! creation, then drives a redraw-per-frame loop. Render errors terminate
//! the loop with an error log.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use crate::context::GpuContext;
use crate::errors::Result;
use crate::settings::ContextSettings;

/// Per-frame timing information passed to [`AppHandler::update`].
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Seconds since the application started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Frames rendered so far.
    pub frame_count: u64,
}

/// Trait for defining application behavior.
///
/// # Lifecycle
///
/// 1. [`init`](Self::init) — once, after window and GPU context exist
/// 2. [`on_event`](Self::on_event) — per window event
/// 3. [`update`](Self::update) — per frame, before rendering
/// 4. [`render`](Self::render) — per frame
pub trait AppHandler: Sized + 'static {
    /// Initializes the application: create pipelines, buffers, and
    /// whatever state the frames need.
    fn init(ctx: &mut GpuContext, window: &Arc<Window>) -> Result<Self>;

    /// Handles a window event before default processing.
    ///
    /// Return `true` to consume the event.
    #[allow(unused_variables)]
    fn on_event(&mut self, ctx: &mut GpuContext, event: &WindowEvent) -> bool {
        false
    }

    /// Updates application state once per frame.
    #[allow(unused_variables)]
    fn update(&mut self, ctx: &mut GpuContext, frame: &FrameState) {}

    /// Renders one frame: acquire, encode, submit, present.
    fn render(&mut self, ctx: &mut GpuContext) -> Result<()>;

    /// Called after the surface has been resized.
    #[allow(unused_variables)]
    fn resize(&mut self, ctx: &mut GpuContext, width: u32, height: u32) {}
}

/// Application builder for configuring and launching a windowed program.
///
/// # Example
///
/// ```rust,ignore
/// App::new()
///     .with_title("Textured Cube")
///     .run::<TexturedCube>()?;
/// ```
pub struct App {
    title: String,
    width: u32,
    height: u32,
    settings: ContextSettings,
}

impl App {
    /// Creates a builder with a 1024x768 window and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Prism".into(),
            width: 1024,
            height: 768,
            settings: ContextSettings::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ContextSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs the application with the specified handler.
    ///
    /// Blocks until the event loop exits.
    pub fn run<H: AppHandler>(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::<H>::new(self);
        event_loop.run_app(&mut runner)?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal application runner implementing winit's `ApplicationHandler`.
struct AppRunner<H: AppHandler> {
    config: App,

    window: Option<Arc<Window>>,
    ctx: Option<GpuContext>,
    handler: Option<H>,

    start_time: Instant,
    last_frame_time: Instant,
    frame_count: u64,
}

impl<H: AppHandler> AppRunner<H> {
    fn new(config: App) -> Self {
        let now = Instant::now();
        Self {
            config,
            window: None,
            ctx: None,
            handler: None,
            start_time: now,
            last_frame_time: now,
            frame_count: 0,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let time = now.duration_since(self.start_time).as_secs_f32();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        let (Some(ctx), Some(handler)) = (&mut self.ctx, &mut self.handler) else {
            return;
        };

        let frame_state = FrameState {
            time,
            dt,
            frame_count: self.frame_count,
        };
        handler.update(ctx, &frame_state);

        if let Err(e) = handler.render(ctx) {
            log::error!("Fatal render error: {e}");
            event_loop.exit();
            return;
        }
        self.frame_count += 1;
    }
}

impl<H: AppHandler> ApplicationHandler for AppRunner<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.width),
                f64::from(self.config.height),
            ));

        let window = event_loop
            .create_window(window_attributes)
            .expect("Failed to create window");
        let window = Arc::new(window);
        self.window = Some(window.clone());

        log::info!("Initializing GPU context...");

        let size = window.inner_size();
        let mut ctx = match pollster::block_on(GpuContext::new(
            window.clone(),
            &self.config.settings,
            size.width.max(1),
            size.height.max(1),
        )) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("Fatal GPU error: {e}");
                event_loop.exit();
                return;
            }
        };

        match H::init(&mut ctx, &window) {
            Ok(handler) => self.handler = Some(handler),
            Err(e) => {
                log::error!("Fatal init error: {e}");
                event_loop.exit();
                return;
            }
        }
        self.ctx = Some(ctx);

        let now = Instant::now();
        self.start_time = now;
        self.last_frame_time = now;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(ctx), Some(handler)) = (&mut self.ctx, &mut self.handler) else {
            return;
        };

        if handler.on_event(ctx, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                ctx.resize(physical_size.width, physical_size.height);
                handler.resize(ctx, physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.ctx.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
