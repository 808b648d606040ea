use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::{
    input::Input,
    render::{Graphics, Renderer},
    time::FrameTimer,
};

pub trait UpdateFn: FnMut(&mut Context) + 'static {}
impl<F: FnMut(&mut Context) + 'static> UpdateFn for F {}

pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "tilegrid".to_string(),
            width: 800,
            height: 600,
            resizable: true,
        }
    }
}

/// Everything a frame callback can touch: drawing, input state, timing.
/// Calling [`Context::exit`] ends the event loop after the callback returns.
pub struct Context<'a> {
    pub gfx: Graphics<'a>,
    pub input: &'a Input,
    pub timer: &'a FrameTimer,
    exit: bool,
}

impl Context<'_> {
    /// Request a clean shutdown; the current frame is not presented
    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Window & event loop runner; calls the frame callback once per redraw
pub struct App<U> {
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<Renderer>>,
    renderer: Option<Renderer>,
    update: Option<U>,
    input: Input,
    timer: FrameTimer,
    config: AppConfig,
}

impl<U: UpdateFn> ApplicationHandler<Renderer> for App<U> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(proxy) = self.proxy.take() {
            let win_attrs = Window::default_attributes()
                .with_title(&self.config.title)
                .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
                .with_resizable(self.config.resizable);

            let window = Arc::new(event_loop.create_window(win_attrs).unwrap());
            self.window = Some(window.clone());

            let logical = (self.config.width, self.config.height);
            pollster::block_on(Renderer::create_graphics(window, logical, proxy));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = self.renderer.as_mut() {
                    let mut ctx = Context {
                        gfx: Graphics::new(&mut *renderer),
                        input: &self.input,
                        timer: &self.timer,
                        exit: false,
                    };
                    (self.update.as_mut().unwrap())(&mut ctx);

                    if ctx.exit {
                        event_loop.exit();
                        return;
                    }

                    renderer.render_frame();
                    self.timer.update();
                    self.input.end_frame();
                }

                self.window.as_ref().unwrap().request_redraw();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.input.keyboard(event),
            _ => {}
        }
    }

    fn user_event(&mut self, _: &ActiveEventLoop, renderer: Renderer) {
        self.renderer = Some(renderer);
    }
}

impl<U: UpdateFn> App<U> {
    pub fn new(config: AppConfig) -> Self {
        Self {
            window: None,
            proxy: None,
            renderer: None,
            update: None,
            input: Input::default(),
            timer: FrameTimer::default(),
            config,
        }
    }

    /// Starts the event loop; returns when the window closes or the
    /// callback requests exit
    pub fn run(mut self, update: U) {
        env_logger::init_from_env(env_logger::Env::default().default_filter_or("error"));

        let event_loop = EventLoop::<Renderer>::with_user_event().build().unwrap();
        event_loop.set_control_flow(ControlFlow::Poll);

        self.proxy = Some(event_loop.create_proxy());
        self.update = Some(update);

        event_loop.run_app(&mut self).unwrap();
    }
}
