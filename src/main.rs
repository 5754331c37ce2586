use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use text_scene::assets::{AssetCache, AssetEvent, TextureHandle};
use text_scene::camera::{Camera, OrbitControls};
use text_scene::cli::Cli;
use text_scene::clock::Clock;
use text_scene::frame::{self, FrameInfo};
use text_scene::material::MatcapMaterial;
use text_scene::panel;
use text_scene::renderer::Renderer;
use text_scene::scene::Scene;
use text_scene::state::{AppState, Phase};
use text_scene::tween::{self, Tween};

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// The four matcap images, primary first
const MATCAP_FILES: [&str; 4] = ["8.png", "2.png", "3.png", "4.png"];
const FONT_FILE: &str = "helvetiker_regular.typeface.json";

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    assets: AssetCache,
    texture_handles: [TextureHandle; 4],
    material: Option<MatcapMaterial>,
    state: AppState,
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    fly: Tween,
    clock: Clock,
    frame_number: u64,
    last_frame_time: Instant,
    last_elapsed: f32,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        // All loads start at process init; everything that needs the font
        // waits for it through the cache
        let mut assets = AssetCache::new();
        let texture_handles = MATCAP_FILES
            .map(|file| assets.load_texture(cli.assets.join("textures/matcaps").join(file)));
        assets.load_font(cli.assets.join("fonts").join(FONT_FILE));

        let state = AppState::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT);
        let camera = Camera::new(state.viewport.aspect());
        let scene = Scene::new(&mut rand::thread_rng());

        Self {
            cli,
            window: None,
            renderer: None,
            assets,
            texture_handles,
            material: None,
            state,
            scene,
            camera,
            controls: OrbitControls::new(),
            fly: tween::camera_fly_through(),
            clock: Clock::new(),
            frame_number: 0,
            last_frame_time: Instant::now(),
            last_elapsed: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    /// Drain finished asset loads; the font completion flips the
    /// bootstrap phase and populates the scene exactly once
    fn drain_assets(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        for event in self.assets.poll() {
            match event {
                AssetEvent::Texture(handle, data) => renderer.upload_texture(handle, &data),
                AssetEvent::Font(font) => {
                    if self.state.phase == Phase::Populated {
                        continue;
                    }
                    log::info!("font \"{}\" loaded", font.family_name());
                    self.material = Some(MatcapMaterial::new(self.texture_handles));
                    let populated = self.scene.populate(
                        &font,
                        &mut rand::thread_rng(),
                        &mut |mesh| renderer.upload_mesh(&mesh),
                    );
                    match populated {
                        Ok(()) => self.state.phase = Phase::Populated,
                        // Leave the loop running over an empty scene
                        Err(e) => log::warn!("scene population failed: {e:#}"),
                    }
                }
            }
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(delta);

        self.drain_assets();

        let elapsed = self.clock.elapsed();
        let frame = FrameInfo::new(self.frame_number, elapsed, elapsed - self.last_elapsed);
        self.frame_number += 1;
        self.last_elapsed = elapsed;

        frame::advance(
            &mut self.scene,
            &self.fly,
            &mut self.controls,
            &mut self.camera,
            frame.time,
        );

        let (Some(renderer), Some(window)) = (self.renderer.as_mut(), self.window.as_ref()) else {
            return;
        };

        let active = self
            .material
            .as_ref()
            .map(|m| m.active_texture())
            .unwrap_or(self.texture_handles[0]);

        let material = &mut self.material;
        let fps = self.fps;
        let show_ui = !self.cli.no_ui;
        let result = renderer.render(window, &self.scene, &self.camera, active, |ctx| {
            if show_ui {
                panel::draw(ctx, material.as_mut(), fps);
            }
        });
        if let Err(e) = result {
            log::error!("render error: {e}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Hello Three.js")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("failed to create window: {e}");
                    event_loop.exit();
                    return;
                }
            };

            let slots = self.assets.texture_slots();
            let renderer = match pollster::block_on(Renderer::new(window.clone(), slots)) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("failed to initialize renderer: {e}");
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size().to_logical::<f64>(window.scale_factor());
            self.state.resize(size.width as u32, size.height as u32);
            self.camera.set_aspect(self.state.viewport.aspect());

            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(physical) => {
                let Some(window) = self.window.as_ref() else {
                    return;
                };
                let scale = window.scale_factor();
                let logical = physical.to_logical::<f64>(scale);
                self.state.resize(logical.width as u32, logical.height as u32);
                self.camera.set_aspect(self.state.viewport.aspect());
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(
                        self.state.viewport.width,
                        self.state.viewport.height,
                        scale,
                    );
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                let logical = position.to_logical::<f64>(scale);
                self.state.track_cursor(logical.x as f32, logical.y as f32);
                self.controls.pointer_moved(
                    logical.x as f32,
                    logical.y as f32,
                    self.state.viewport.height as f32,
                );
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.controls.set_dragging(state.is_pressed()),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // The only suspension point: yield to the display pacing and ask
        // for the next tick
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    log::info!("text-scene - drag to orbit, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
