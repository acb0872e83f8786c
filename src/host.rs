//! Windowed host: winit event loop, engine lifecycle and presentation.
//!
//! ```ignore
//! morphfield::host::run(EngineConfig::default())?;
//! ```
//!
//! Escape or closing the window stops the engine and exits. F12 writes the
//! current frame to `morphfield-<frame>.png` in the working directory.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::config::EngineConfig;
use crate::controller::Controller;
use crate::engine::Engine;
use crate::error::HostError;
use crate::gpu::Presenter;
use crate::input::KeyCode;
use crate::surface::Canvas;
use crate::time::Time;

const TITLE: &str = "morphfield - click to morph, 1-4 for palettes";

/// Open a window and run the engine until it is closed.
pub fn run(config: EngineConfig) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: EngineConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    engine: Option<Engine<Canvas>>,
    controller: Controller,
    time: Time,
    error: Option<HostError>,
}

impl App {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            engine: None,
            controller: Controller::new(),
            time: Time::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let (width, height) = self
            .config
            .bounds
            .map(|b| (b.width.max(1.0) as u32, b.height.max(1.0) as u32))
            .unwrap_or((1280, 720));

        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;

        // The window, not the config, owns the size from here on
        let size = window.inner_size();
        let mut config = self.config.clone();
        config.bounds = None;
        let canvas = Canvas::new(size.width, size.height, config.background);
        let engine = Engine::start(canvas, config)?;

        window.request_redraw();
        self.window = Some(window);
        self.presenter = Some(presenter);
        self.engine = Some(engine);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(engine) = &mut self.engine {
            engine.stop();
        }
        event_loop.exit();
    }

    fn save_snapshot(&self) {
        let Some(engine) = &self.engine else {
            return;
        };
        let path = format!("morphfield-{}.png", engine.frame_count());
        match engine.surface().save_png(&path) {
            Ok(()) => log::info!("Saved frame to {}", path),
            Err(e) => log::error!("Snapshot failed: {}", e),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(engine), Some(presenter)) = (&mut self.engine, &mut self.presenter) else {
            return;
        };
        if !engine.frame() {
            return;
        }

        match presenter.present(engine.surface()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                engine.stop();
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Present error: {:?}", e),
        }

        if self.time.update() {
            if let Some(window) = &self.window {
                window.set_title(&format!("{} ({:.0} fps)", TITLE, self.time.fps()));
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. } if key.state == ElementState::Pressed => {
                if let PhysicalKey::Code(code) = key.physical_key {
                    match KeyCode::from(code) {
                        KeyCode::Escape => {
                            self.shutdown(event_loop);
                            return;
                        }
                        KeyCode::F12 if !key.repeat => self.save_snapshot(),
                        _ => {}
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(*size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => {}
        }

        if let Some(command) = self.controller.translate(&event) {
            if let Some(engine) = &mut self.engine {
                engine.apply(command);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &mut self.engine {
            engine.stop();
        }
    }
}
