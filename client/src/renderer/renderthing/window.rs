use std::sync::Arc;

use anyhow::Context;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture, wgpu::TextureFormat};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes, WindowId},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

pub(super) struct RendererWindow {
    config: RendererWindowConfig,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
    error: Option<anyhow::Error>,
}

impl RendererWindow {
    pub fn new(config: RendererWindowConfig) -> Self {
        let sleeper = Sleeper::from_fps(config.target_fps);

        Self {
            config,
            resumed_window: None,
            sleeper,
            error: None,
        }
    }

    /// The error that made the window close, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<ResumedWindow> {
        let window_size = LogicalSize::new(self.config.width as f64, self.config.height as f64);

        let window = Arc::new(
            event_loop
                .create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(window_size),
                )
                .context("Creating window")?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let surface_texture = SurfaceTexture::new(width, height, window.clone());

        let pixels = PixelsBuilder::new(width.max(1), height.max(1), surface_texture)
            .texture_format(TextureFormat::Rgba8UnormSrgb)
            .build()
            .map_err(|e| anyhow::anyhow!("Creating pixels buffer: {e}"))?;

        Ok(ResumedWindow { window, pixels })
    }
}

pub struct RendererWindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u64,
    pub draw_callback: Box<dyn FnMut(RenderFrame)>,
    pub event_callback: Option<Box<dyn FnMut(&WindowEvent)>>,
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl ApplicationHandler for RendererWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(resumed_window) => {
                resumed_window.window.request_redraw();
                self.resumed_window = Some(resumed_window);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(ResumedWindow { window, pixels }) = self.resumed_window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                // Minimized windows have nothing to draw into.
                if width > 0 && height > 0 {
                    let next_frame = RenderFrame {
                        width,
                        height,
                        buffer: pixels.frame_mut(),
                    };

                    (self.config.draw_callback)(next_frame);

                    if let Err(e) = pixels.render() {
                        self.fail(event_loop, anyhow::anyhow!("Rendering with pixels: {e}"));
                        return;
                    }
                }

                // FIXME: Sleeping here stalls event handling (resizes included) until the frame is due.
                self.sleeper.sleep();
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) if width > 0 && height > 0 => {
                let resized = pixels
                    .resize_surface(width, height)
                    .and_then(|()| pixels.resize_buffer(width, height));

                if let Err(e) = resized {
                    self.fail(event_loop, anyhow::anyhow!("Resizing pixels buffer: {e}"));
                    return;
                }

                window.request_redraw();
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }

        if let Some(event_callback) = &mut self.config.event_callback {
            event_callback(&event);
        }
    }
}
