use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy};
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window};

use gridpaint::cli::{StartupConfig, StartupMode};
use gridpaint::commands::Cmd;
use gridpaint::config::AppConfig;
use gridpaint::error::AnnotateError;
use gridpaint::geometry::Point;
use gridpaint::image::{is_image_file, load_image};
use gridpaint::messages::{AppMsg, GridMsg, Msg, PointerMsg, ViewMsg};
use gridpaint::model::AppModel;
use gridpaint::update::update;
use gridpaint::view::Renderer;

use super::input::{handle_key, Modifiers};

const INITIAL_WIDTH: u32 = 1024;
const INITIAL_HEIGHT: u32 = 768;

pub struct App {
    model: AppModel,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    /// Last pointer position in physical pixels
    mouse_position: Option<(f64, f64)>,
    /// Button currently driving a pan gesture
    pan_button: Option<MouseButton>,
    startup: Option<StartupConfig>,
    /// Worker threads deliver their results as user events, which also wakes the loop
    proxy: EventLoopProxy<Msg>,
}

impl App {
    pub fn new(startup: StartupConfig, config: AppConfig, proxy: EventLoopProxy<Msg>) -> Self {
        let mut model = AppModel::new(INITIAL_WIDTH, INITIAL_HEIGHT, 1.0, config);
        model.form = startup.form.clone();

        Self {
            model,
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            mouse_position: None,
            pan_button: None,
            startup: Some(startup),
            proxy,
        }
    }

    fn init_renderer(&mut self, window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<()> {
        let size = window.inner_size();
        let renderer = Renderer::new(Rc::clone(&window), context)?;
        update(&mut self.model, Msg::resize(size.width, size.height));
        update(
            &mut self.model,
            Msg::App(AppMsg::ScaleFactorChanged(window.scale_factor())),
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Apply CLI startup options once the window exists
    fn run_startup(&mut self) {
        let Some(startup) = self.startup.take() else {
            return;
        };

        if startup.define_grid {
            update(&mut self.model, Msg::Grid(GridMsg::DefineFromForm));
        }

        let cmd = match startup.mode {
            StartupMode::Empty => None,
            StartupMode::Image(path) => update(
                &mut self.model,
                Msg::App(AppMsg::OpenImageDialogResult { path: Some(path) }),
            ),
            StartupMode::Project(path) => update(
                &mut self.model,
                Msg::App(AppMsg::ImportDialogResult { path: Some(path) }),
            ),
        };
        if let Some(cmd) = cmd {
            self.process_cmd(cmd);
        }
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => update(
                &mut self.model,
                Msg::App(AppMsg::Resize(size.width, size.height)),
            ),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => update(
                &mut self.model,
                Msg::App(AppMsg::ScaleFactorChanged(*scale_factor)),
            ),
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                let mods = Modifiers {
                    ctrl: self.modifiers.control_key() || self.modifiers.super_key(),
                    shift: self.modifiers.shift_key(),
                };
                let msg = handle_key(&self.model, &event.logical_key, mods)?;
                update(&mut self.model, msg)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                let point = Point::new(position.x, position.y);
                if self.pan_button.is_some() {
                    update(&mut self.model, Msg::View(ViewMsg::UpdatePan(point)))
                } else {
                    update(&mut self.model, Msg::Pointer(PointerMsg::Moved(point)))
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position?;
                update(&mut self.model, Msg::press(x, y))
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => update(&mut self.model, Msg::release()),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: button @ (MouseButton::Right | MouseButton::Middle),
                ..
            } => {
                let (x, y) = self.mouse_position?;
                self.pan_button = Some(*button);
                self.set_cursor(CursorIcon::Grabbing);
                update(
                    &mut self.model,
                    Msg::View(ViewMsg::StartPan(Point::new(x, y))),
                )
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } if self.pan_button == Some(*button) => {
                self.pan_button = None;
                self.set_cursor(CursorIcon::Default);
                update(&mut self.model, Msg::View(ViewMsg::EndPan))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                if dy > 0.0 {
                    update(&mut self.model, Msg::View(ViewMsg::ZoomIn))
                } else if dy < 0.0 {
                    update(&mut self.model, Msg::View(ViewMsg::ZoomOut))
                } else {
                    None
                }
            }
            WindowEvent::DroppedFile(path) => dropped_file_msg(path)
                .and_then(|msg| update(&mut self.model, msg)),
            _ => None,
        }
    }

    fn set_cursor(&self, icon: CursorIcon) {
        if let Some(window) = &self.window {
            window.set_cursor(icon);
        }
    }

    fn render(&mut self) -> Result<()> {
        if let Some(window) = &self.window {
            window.set_title(&self.model.window_title());
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.model)?;
        }
        Ok(())
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::Redraw => {}

            Cmd::CopyToClipboard { text } => {
                let result = arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(text.clone()))
                    .map_err(|e| AnnotateError::ClipboardWriteFailure(e.to_string()));
                send_result(&self.proxy, Msg::App(AppMsg::ClipboardResult { text, result }));
            }

            // =====================================================================
            // File Dialogs (using rfd)
            // =====================================================================
            Cmd::ShowOpenImageDialog => {
                let proxy = self.proxy.clone();
                std::thread::spawn(move || {
                    let path = rfd::FileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "ico"])
                        .pick_file();
                    send_result(&proxy, Msg::App(AppMsg::OpenImageDialogResult { path }));
                });
            }

            Cmd::ShowImportDialog => {
                let proxy = self.proxy.clone();
                std::thread::spawn(move || {
                    let path = rfd::FileDialog::new()
                        .add_filter("Project", &["json"])
                        .pick_file();
                    send_result(&proxy, Msg::App(AppMsg::ImportDialogResult { path }));
                });
            }

            Cmd::ShowExportDialog { suggested } => {
                let proxy = self.proxy.clone();
                std::thread::spawn(move || {
                    let mut dlg = rfd::FileDialog::new().add_filter("Project", &["json"]);
                    if let Some(ref path) = suggested {
                        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                            dlg = dlg.set_directory(dir);
                        }
                        if let Some(name) = path.file_name() {
                            dlg = dlg.set_file_name(name.to_string_lossy());
                        }
                    }

                    let path = dlg.save_file();
                    send_result(&proxy, Msg::App(AppMsg::ExportDialogResult { path }));
                });
            }

            // =====================================================================
            // File I/O
            // =====================================================================
            Cmd::LoadImage { path } => {
                let proxy = self.proxy.clone();
                std::thread::spawn(move || {
                    let result = load_image(&path);
                    send_result(&proxy, Msg::App(AppMsg::ImageLoaded { path, result }));
                });
            }

            Cmd::LoadProject { path } => {
                let proxy = self.proxy.clone();
                std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                    send_result(&proxy, Msg::App(AppMsg::ProjectLoaded { path, result }));
                });
            }

            Cmd::SaveProject { path, content } => {
                let proxy = self.proxy.clone();
                std::thread::spawn(move || {
                    let result = std::fs::write(&path, content).map_err(|e| e.to_string());
                    send_result(&proxy, Msg::App(AppMsg::ExportCompleted { path, result }));
                });
            }

            // Handled in dispatch
            Cmd::Quit => {}
        }
    }

    /// Run a command, then exit or request a redraw as it asks
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, cmd: Cmd) {
        let action = LoopAction::after(&cmd);
        self.process_cmd(cmd);

        match action {
            LoopAction::Exit => event_loop.exit(),
            LoopAction::Redraw => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            LoopAction::Idle => {}
        }
    }
}

/// What the event loop does once a command has been handed off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopAction {
    Exit,
    Redraw,
    Idle,
}

impl LoopAction {
    fn after(cmd: &Cmd) -> Self {
        if matches!(cmd, Cmd::Quit) {
            LoopAction::Exit
        } else if cmd.needs_redraw() {
            LoopAction::Redraw
        } else {
            LoopAction::Idle
        }
    }
}

fn send_result(proxy: &EventLoopProxy<Msg>, msg: Msg) {
    if proxy.send_event(msg).is_err() {
        tracing::debug!("Event loop closed before a worker result was delivered");
    }
}

/// Dropped images open, dropped `.json` files import
fn dropped_file_msg(path: &Path) -> Option<Msg> {
    let path: PathBuf = path.to_path_buf();
    if is_image_file(&path) {
        return Some(Msg::App(AppMsg::OpenImageDialogResult { path: Some(path) }));
    }
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return Some(Msg::App(AppMsg::ImportDialogResult { path: Some(path) }));
    }
    tracing::debug!("Ignoring dropped file {}", path.display());
    None
}

impl ApplicationHandler<Msg> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);

        let window_attributes = Window::default_attributes()
            .with_title(self.model.window_title())
            .with_inner_size(LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let context = match Context::new(Rc::clone(&window)) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Failed to create graphics context: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init_renderer(Rc::clone(&window), &context) {
            tracing::error!("Failed to initialise renderer: {}", e);
            event_loop.exit();
            return;
        }
        self.window = Some(window);
        self.context = Some(context);

        self.run_startup();
        self.set_cursor(CursorIcon::Crosshair);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = &self.window else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render error: {}", e);
                }
            }
            event => {
                if let Some(cmd) = self.handle_event(&event) {
                    self.dispatch(event_loop, cmd);
                }
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.dispatch(event_loop, cmd);
        }
    }
}
