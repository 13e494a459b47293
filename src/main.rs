//! Dash Courier entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use dash_courier::Settings;
    use dash_courier::hud::{self, HudModel};
    use dash_courier::platform::InputState;
    use dash_courier::renderer::RenderState;
    use dash_courier::sim::{EndReason, FixedStep, GameState};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        stepper: FixedStep,
        input: InputState,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed, settings.tuning()),
                render_state: None,
                stepper: FixedStep::new(),
                input: InputState::new(settings.joystick_radius),
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks for this frame
        fn update(&mut self, time: f64) -> Option<EndReason> {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let ended = self
                .stepper
                .advance(&mut self.state, self.input.tick_input_mut(), dt);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            ended
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let model = HudModel::from_state(&self.state, self.input.stick_offset());

            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&model.time_text));
            }
            if let Some(el) = html_element(document, "freshnessBar") {
                let _ = el
                    .style()
                    .set_property("width", &format!("{}px", model.freshness_bar_px));
            }
            if let Some(el) = html_element(document, "deliverOrder") {
                let visibility = if model.has_order { "visible" } else { "hidden" };
                let _ = el.style().set_property("visibility", visibility);
            }
            if let Some(el) = html_element(document, "stick") {
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", model.stick_px.0));
                let _ = style.set_property("top", &format!("{}px", model.stick_px.1));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    el.set_text_content(None);
                }
            }
        }

        /// Swap car/motorbike, remember the choice and restart the round
        fn switch_variant(&mut self) {
            let tuning = self.settings.toggle_variant();
            self.state.set_tuning(tuning);
            self.stepper.reset();
            self.input.clear();
        }

        fn variant_label(&self) -> String {
            format!("Vehicle: {}", self.settings.variant.as_str())
        }

        /// Announce the end of the round and start a fresh one
        fn finish_round(&mut self, reason: EndReason) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(hud::end_message(reason));
            }
            self.state.reset();
            self.stepper.reset();
            self.input.clear();
            // Frame delta across the blocking alert is not game time
            self.last_time = 0.0;
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }
        log::info!("Dash Courier starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_buttons(&document, game.clone())?;
        setup_joystick(&document, game.clone())?;
        setup_keyboard(&window, game.clone())?;
        setup_blur(&window, game.clone());

        request_animation_frame(game);
        log::info!("Dash Courier running!");
        Ok(())
    }

    /// Attach a listener and leak the closure for the page lifetime
    fn listen<E: 'static + wasm_bindgen::convert::FromWasmAbi>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let element = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
        };

        let gas = element("gas")?;
        {
            let game = game.clone();
            listen(&gas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.set_gas(true);
            })?;
        }
        {
            let game = game.clone();
            listen(&gas, "touchend", move |_: TouchEvent| {
                game.borrow_mut().input.set_gas(false)
            })?;
        }

        let brake = element("brake")?;
        {
            let game = game.clone();
            listen(&brake, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.set_brake(true);
            })?;
        }
        {
            let game = game.clone();
            listen(&brake, "touchend", move |_: TouchEvent| {
                game.borrow_mut().input.set_brake(false)
            })?;
        }

        {
            let game = game.clone();
            listen(&element("acceptOrder")?, "click", move |_: web_sys::MouseEvent| {
                game.borrow_mut().input.request_order()
            })?;
        }

        // Delivery and variant buttons are optional in the page layout
        if let Some(deliver) = document.get_element_by_id("deliverOrder") {
            let game = game.clone();
            listen(&deliver, "click", move |_: web_sys::MouseEvent| {
                game.borrow_mut().input.request_delivery()
            })?;
        }
        if let Some(toggle) = document.get_element_by_id("variantToggle") {
            toggle.set_text_content(Some(&game.borrow().variant_label()));
            let label = toggle.clone();
            listen(&toggle, "click", move |_: web_sys::MouseEvent| {
                let mut game = game.borrow_mut();
                game.switch_variant();
                label.set_text_content(Some(&game.variant_label()));
            })?;
        }

        Ok(())
    }

    fn setup_joystick(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let joystick = document.get_element_by_id("joystick").ok_or("missing #joystick")?;

        {
            let game = game.clone();
            listen(&joystick, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.joystick_start();
            })?;
        }
        {
            let game = game.clone();
            listen(&joystick, "touchend", move |_: TouchEvent| {
                game.borrow_mut().input.joystick_end()
            })?;
        }
        {
            let pad = joystick.clone();
            listen(&joystick, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                // Only fingers that started on the pad; a held pedal is another touch
                let Some(touch) = event.target_touches().get(0) else {
                    return;
                };
                let rect = pad.get_bounding_client_rect();
                let drag = glam::Vec2::new(
                    (touch.client_x() as f64 - rect.left() - rect.width() / 2.0) as f32,
                    (touch.client_y() as f64 - rect.top() - rect.height() / 2.0) as f32,
                );
                game.borrow_mut().input.joystick_move(drag);
            })?;
        }

        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            listen(window, "keydown", move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if game.borrow_mut().input.key(&event.key(), true) {
                    event.prevent_default();
                }
            })?;
        }
        listen(window, "keyup", move |event: KeyboardEvent| {
            game.borrow_mut().input.key(&event.key(), false);
        })
    }

    fn setup_blur(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let result = listen(window, "blur", move |_: web_sys::Event| {
            let mut g = game.borrow_mut();
            if g.settings.release_on_blur {
                g.input.clear();
                log::info!("Controls released (window blur)");
            }
        });
        if let Err(e) = result {
            log::warn!("Could not watch window focus: {:?}", e);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            let ended = {
                let mut game = game.borrow_mut();
                let ended = game.update(time);
                game.render();
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    game.update_hud(&document);
                }
                ended
            };

            if let Some(reason) = ended {
                game.borrow_mut().finish_round(reason);
            }

            if let Some(window) = web_sys::window() {
                if let Some(ref closure) = *f.borrow() {
                    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
                }
            }
        }));

        if let Some(window) = web_sys::window() {
            if let Some(ref closure) = *g.borrow() {
                let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dash Courier (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    demo_drive();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless drive: take an order, hold the throttle with a gentle weave
/// and report how the round ends.
#[cfg(not(target_arch = "wasm32"))]
fn demo_drive() {
    use dash_courier::consts::SIM_DT;
    use dash_courier::{GameTuning, Settings, VehicleVariant};
    use dash_courier::hud;
    use dash_courier::sim::{FixedStep, GameState, TickInput, camera_pose};

    let settings = Settings::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let mut state = GameState::new(seed, settings.tuning());
    if let Some(arg) = std::env::args().nth(2) {
        match arg.parse::<VehicleVariant>() {
            Ok(variant) => state.set_tuning(GameTuning::for_variant(variant)),
            Err(e) => log::warn!("{e}, keeping {}", state.tuning.variant.as_str()),
        }
    }
    let mut stepper = FixedStep::new();
    let mut input = TickInput {
        accept_order: true,
        ..Default::default()
    };

    log::info!(
        "Driving {} with seed {} ({} obstacles)",
        state.tuning.variant.as_str(),
        state.seed,
        state.obstacles.len()
    );

    // 60 fps frames, capped at a full shift plus a margin
    let max_frames = (state.round.time_left + 5) * 60;
    for frame in 0..max_frames {
        input.accelerating = true;
        input.steer_axis = ((frame as f32) * SIM_DT).sin() * 0.05;

        if let Some(reason) = stepper.advance(&mut state, &mut input, SIM_DT) {
            let pose = camera_pose(&state);
            println!(
                "{} after {} ticks at ({:.2}, {:.2}), camera at ({:.2}, {:.2}, {:.2}), freshness {:.1}",
                hud::end_message(reason),
                state.time_ticks,
                state.vehicle.pos.x,
                state.vehicle.pos.y,
                pose.eye.x,
                pose.eye.y,
                pose.eye.z,
                state.round.freshness
            );
            return;
        }
    }

    println!("Round still running after {} ticks", state.time_ticks);
}
