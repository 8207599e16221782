use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use gridcaster::scaler::Stretch;
use gridcaster::{Action, EngineConfig, Flow, Frame, FrameHooks, ImageLoader, Session};

/// First-person raycaster for `.cub` scene files.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene description file
    scene: PathBuf,
    /// Width of the rendered view in pixels [default: 1024]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=8192))]
    width: Option<u32>,
    /// Height of the rendered view in pixels [default: 768]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=8192))]
    height: Option<u32>,
}

struct App {
    // Field order is teardown order: textures and scene first, then display resources
    session: Session,
    frame: Frame,
    stretch: Option<Stretch>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    window: Option<Rc<Window>>,

    error: Option<anyhow::Error>,

    frame_counter: u32,
    last_fps_print: Instant,
}

impl App {
    fn new(session: Session, config: &EngineConfig) -> Self {
        Self {
            session,
            frame: Frame::new(config.screen_width, config.screen_height),
            stretch: None,
            surface: None,
            window: None,
            error: None,
            frame_counter: 0,
            last_fps_print: Instant::now(),
        }
    }

    /// Records the first fatal error and stops the loop; `main` reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("gridcaster")
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(
                self.frame.width() as f64,
                self.frame.height() as f64,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("create window")?,
        );
        let context =
            softbuffer::Context::new(window.clone()).map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw_px, dh_px) = (dw.get() as usize, dh.get() as usize);

        self.session.on_frame(&mut self.frame);

        surface
            .resize(dw, dh)
            .map_err(|e| anyhow!("resize surface: {e}"))?;
        let stretch = match self.stretch.take() {
            Some(s) if s.fits(&self.frame, dw_px, dh_px) => s,
            _ => Stretch::new(self.frame.width(), self.frame.height(), dw_px, dh_px),
        };
        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("surface buffer: {e}"))?;
        stretch.blit(&self.frame, &mut buf);
        buf.present().map_err(|e| anyhow!("present: {e}"))?;
        self.stretch = Some(stretch);

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::KeyW => Some(Action::Forward),
        KeyCode::KeyS => Some(Action::Backward),
        KeyCode::KeyA => Some(Action::StrafeLeft),
        KeyCode::KeyD => Some(Action::StrafeRight),
        KeyCode::ArrowLeft => Some(Action::TurnLeft),
        KeyCode::ArrowRight => Some(Action::TurnRight),
        KeyCode::Escape => Some(Action::Exit),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        self.last_fps_print = Instant::now();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                // auto-repeat presses count as further input ticks
                let Some(action) = action_for(code) else {
                    return;
                };
                if self.session.on_key(action) == Flow::Exit {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(id) {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let defaults = EngineConfig::default();
    let config = defaults.with_screen(
        cli.width.map_or(defaults.screen_width, |w| w as usize),
        cli.height.map_or(defaults.screen_height, |h| h as usize),
    );

    let session = Session::load(&cli.scene, &ImageLoader, &config)
        .with_context(|| format!("cannot load scene {}", cli.scene.display()))?;
    let start = session.observer();
    log::info!(
        "observer at ({:.2}, {:.2}) dir ({:.2}, {:.2}) plane ({:.2}, {:.2})",
        start.pos[0],
        start.pos[1],
        start.dir[0],
        start.dir[1],
        start.plane[0],
        start.plane[1]
    );

    let event_loop = EventLoop::new().context("create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(session, &config);
    event_loop.run_app(&mut app).context("event loop")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // clap prints usage and exits non-zero on missing or extra arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error\n{err:#}");
            ExitCode::FAILURE
        }
    }
}
