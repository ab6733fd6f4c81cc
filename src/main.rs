//! Longcat entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, NodeList};

    use longcat::audio::AudioManager;
    use longcat::autopilot::Autopilot;
    use longcat::frame::FrameClock;
    use longcat::hud::{TitleCache, format_score};
    use longcat::scene::{self, SECTIONS, SectionKind};
    use longcat::sim::{GameState, TickInput, Tuning, tap, tick};
    use longcat::consts::DEFAULT_VIEWPORT_HEIGHT_PX;
    use longcat::{PersonalBest, Settings};

    /// Autopilot tap rate when toggled on with `i`
    const AUTOPILOT_TAPS_PER_SECOND: f64 = 9.0;
    /// Base transform the cat's parts are drawn relative to
    const PART_BASE_TRANSFORM: &str = "translateY(-100%)";

    /// Elements the renderer writes to every frame
    struct Dom {
        document: Document,
        cat: Option<HtmlElement>,
        head: Option<HtmlElement>,
        mouth: Option<HtmlElement>,
        hand_right: Option<HtmlElement>,
        hand_left: Option<HtmlElement>,
        /// Paired with `SECTIONS` by index
        sections: Vec<HtmlElement>,
        gulli: Option<HtmlElement>,
        buildings: Vec<HtmlElement>,
        score: Option<Element>,
        high_score: Option<Element>,
    }

    fn html(el: Option<Element>) -> Option<HtmlElement> {
        el?.dyn_into().ok()
    }

    fn find(document: &Document, selector: &str) -> Option<HtmlElement> {
        html(document.query_selector(selector).ok().flatten())
    }

    fn find_in(root: &Element, selector: &str) -> Option<HtmlElement> {
        html(root.query_selector(selector).ok().flatten())
    }

    fn html_list(list: NodeList) -> Vec<HtmlElement> {
        (0..list.length())
            .filter_map(|i| list.get(i)?.dyn_into().ok())
            .collect()
    }

    fn find_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
        document
            .query_selector_all(selector)
            .map(html_list)
            .unwrap_or_default()
    }

    fn find_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
        root.query_selector_all(selector)
            .map(html_list)
            .unwrap_or_default()
    }

    fn set_transform(el: &HtmlElement, value: &str) {
        let _ = el.style().set_property("transform", value);
    }

    impl Dom {
        fn query(document: Document) -> Self {
            let cat = find(&document, ".longcat");
            let part = |selector: &str| cat.as_ref().and_then(|c| find_in(c, selector));
            let (head, mouth) = (part(".longcat__head"), part(".longcat__mouth"));
            let (hand_right, hand_left) =
                (part(".longcat__hand-right"), part(".longcat__hand-left"));

            let sections = find_all(&document, ".section");
            if sections.len() != SECTIONS.len() {
                log::warn!(
                    "Expected {} sections, found {}",
                    SECTIONS.len(),
                    sections.len()
                );
            }
            let section_of = |kind: SectionKind| {
                SECTIONS
                    .iter()
                    .position(|&k| k == kind)
                    .and_then(|i| sections.get(i))
            };
            let gulli = section_of(SectionKind::Earth)
                .and_then(|s| find_in(s, ".section-earth__gulli"));
            let buildings = section_of(SectionKind::Buildings)
                .map(|s| find_all_in(s, ".section__element"))
                .unwrap_or_default();

            let score = document.query_selector(".score__number").ok().flatten();
            let high_score = document
                .query_selector(".score__number--high")
                .ok()
                .flatten();

            Self {
                document,
                cat,
                head,
                mouth,
                hand_right,
                hand_left,
                sections,
                gulli,
                buildings,
                score,
                high_score,
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: TickInput,
        title: TitleCache,
        best: PersonalBest,
        settings: Settings,
        audio: AudioManager,
        autopilot: Option<Autopilot>,
        preloaded: bool,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, best: PersonalBest) -> Self {
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: GameState::new(tuning),
                clock: FrameClock::default(),
                input: TickInput::default(),
                title: TitleCache::new(),
                best,
                settings,
                audio,
                autopilot: None,
                preloaded: false,
            }
        }

        /// First user gesture: load audio and drop the preloader
        fn preload_once(&mut self, document: &Document) {
            if self.preloaded {
                return;
            }
            self.preloaded = true;
            // iOS only allows loading media from inside a user event
            self.audio.preload();
            if let (Some(body), Some(preloader)) = (
                document.body(),
                document.query_selector(".preloader").ok().flatten(),
            ) {
                let _ = body.remove_child(&preloader);
            }
        }

        /// Raise the cat; the greeting meow must play inside the gesture
        fn tap(&mut self) {
            if let Some(cue) = tap(&mut self.state) {
                self.audio.on_cue(cue);
            }
        }

        fn toggle_autopilot(&mut self, seed: u64) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::new(seed, AUTOPILOT_TAPS_PER_SECOND)),
            };
            log::info!("Autopilot: {}", self.autopilot.is_some());
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_mute();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
        }

        /// Run one frame of simulation. Returns false if the frame was dropped.
        fn update(&mut self, time: f64) -> bool {
            let Some(dt) = self.clock.advance(time) else {
                return false;
            };

            if let Some(pilot) = &mut self.autopilot {
                self.input.tap |= pilot.poll(dt);
            }
            let input = std::mem::take(&mut self.input);
            let report = tick(&mut self.state, &input, dt);
            for &cue in &report.cues {
                self.audio.on_cue(cue);
            }

            let motion = &self.state.motion;
            self.best.record(motion.high_score(), motion.high_score_time());
            // Save once the run is over rather than every frame of the climb
            if motion.on_floor() {
                self.best.save_if_unsaved();
            }
            true
        }

        /// Write the current pose into the DOM
        fn render(&mut self, dom: &Dom) {
            let motion = &self.state.motion;
            let cat = &self.state.cat;

            if let Some(el) = &dom.cat {
                set_transform(el, &format!("translateY(-{}mm)", motion.character_offset()));
            }

            let head_tx = if self.settings.reduced_motion {
                String::new()
            } else {
                format!(
                    " translateX({}%) rotateZ({}deg)",
                    cat.head_shift(),
                    cat.head_angle()
                )
            };
            if let Some(el) = &dom.head {
                set_transform(el, &format!("{}{}", PART_BASE_TRANSFORM, head_tx));
            }
            if let Some(el) = &dom.mouth {
                let open = cat.mouth.open();
                set_transform(
                    el,
                    &format!(
                        "{}{}translateY({}%) translateX({}%)",
                        PART_BASE_TRANSFORM,
                        head_tx,
                        open,
                        open / 4.0
                    ),
                );
            }

            let hand_angle = if self.settings.reduced_motion {
                0.0
            } else {
                cat.hand_angle()
            };
            let hands = format!("{} rotateZ({}deg)", PART_BASE_TRANSFORM, hand_angle);
            for el in [&dom.hand_right, &dom.hand_left].into_iter().flatten() {
                set_transform(el, &hands);
            }

            self.render_sections(dom);

            if let Some(title) = self.title.refresh(motion.score()) {
                dom.document.set_title(title);
            }
            if let Some(el) = &dom.score {
                el.set_text_content(Some(&format_score(motion.score())));
            }
            if let Some(el) = &dom.high_score {
                el.set_text_content(Some(&format_score(motion.high_score())));
            }
        }

        fn render_sections(&self, dom: &Dom) {
            let motion = &self.state.motion;
            let offset = format!("translateY({}mm)", scene::section_offset(motion));

            for (el, kind) in dom.sections.iter().zip(SECTIONS) {
                set_transform(el, &offset);
                match kind {
                    SectionKind::Wall => {
                        if let Some(brightness) = scene::wall_brightness(motion) {
                            let _ = el
                                .style()
                                .set_property("filter", &format!("brightness({})", brightness));
                        }
                    }
                    SectionKind::Earth => {
                        if let (Some(gulli), Some(pose)) = (&dom.gulli, scene::gulli_pose(motion)) {
                            set_transform(
                                gulli,
                                &format!(
                                    "rotate({}deg) translate({}px, {}px)",
                                    pose.rotate_deg, pose.translate_x_px, pose.translate_y_px
                                ),
                            );
                        }
                    }
                    SectionKind::Buildings => {
                        if let Some(offsets) = scene::building_offsets(motion, dom.buildings.len()) {
                            for (building, mm) in dom.buildings.iter().zip(offsets) {
                                set_transform(building, &format!("translateY({}mm)", mm));
                            }
                        }
                    }
                    SectionKind::InfiniteStart => {
                        let active = scene::infinite_active(motion);
                        let _ = el
                            .class_list()
                            .toggle_with_force("section-infinite-start--stepanimation", active);
                        if let Some(body) = dom.document.body() {
                            let _ = body.class_list().toggle_with_force("body--infinite", active);
                        }
                    }
                    SectionKind::Plain => {}
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Longcat starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(DEFAULT_VIEWPORT_HEIGHT_PX);
        let tuning = Settings::load_tuning(Tuning::mid_screen_for_viewport(height));
        let game = Rc::new(RefCell::new(Game::new(
            tuning,
            Settings::load(),
            PersonalBest::load(),
        )));
        let dom = Rc::new(Dom::query(document.clone()));

        // Preloader becomes the instructions
        if let Some(preloader) = find(&document, ".preloader") {
            let _ = preloader.class_list().add_1("preloader--loaded");
            if let Some(text) = find_in(&preloader, ".preloader__text") {
                let _ = text.class_list().add_1("preloader__text--loaded");
                text.set_inner_text("click or tap as fast as you can !!!!");
            }
        }

        setup_input_handlers(game.clone(), document);

        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        game.borrow_mut().clock.start(now);

        // Start game loop
        request_animation_frame(game, dom);

        log::info!("Longcat running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>, document: Document) {
        let window = web_sys::window().unwrap();

        // mousedown rather than click so drags don't start a selection;
        // touchend because most things are not permitted during touchstart
        for event_name in ["mousedown", "touchend"] {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.preload_once(&document);

                // Share buttons keep their normal behaviour
                let on_button = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|el| el.class_list().contains("button"));
                if on_button {
                    return;
                }

                event.prevent_default();
                g.tap();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "i" | "I" => {
                        let seed = js_sys::Date::now() as u64;
                        g.toggle_autopilot(seed);
                    }
                    "m" | "M" => {
                        g.toggle_mute();
                        log::info!("Muted: {}", g.settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away mid-climb: flush a pending record
        let targets: [(&web_sys::EventTarget, &str); 2] =
            [(&window, "pagehide"), (&document, "visibilitychange")];
        for (target, event_name) in targets {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().best.save_if_unsaved();
            });
            let _ = target
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, dom: Rc<Dom>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, dom, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, dom: Rc<Dom>, time: f64) {
        {
            let mut g = game.borrow_mut();
            // A hidden tab delivers no frames; the first one back is dropped
            if g.update(time) {
                g.render(&dom);
            }
        }

        request_animation_frame(game, dom);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Longcat (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use longcat::autopilot::Autopilot;
    use longcat::frame::FrameClock;
    use longcat::hud::{format_score, title_for_score};
    use longcat::sim::{GameState, TickInput, Tuning, tick};
    use longcat::{PersonalBest, Settings};

    /// One minute at 60 fps
    const DEMO_FRAMES: u32 = 60 * 60;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEMO_TAPS_PER_SECOND: f64 = 9.0;

    /// Headless run driven by the autopilot
    pub fn run(seed: u64) {
        let mid_screen = Tuning::default().mid_screen_offset;
        let mut state = GameState::new(Settings::load_tuning(mid_screen));
        let mut pilot = Autopilot::new(seed, DEMO_TAPS_PER_SECOND);
        let mut clock = FrameClock::default();
        clock.start(0.0);

        log::info!("Demo seed: {}", seed);
        for frame in 1..=DEMO_FRAMES {
            let Some(dt) = clock.advance(frame as f64 * FRAME_MS) else {
                continue;
            };
            let input = TickInput {
                tap: pilot.poll(dt),
            };
            let report = tick(&mut state, &input, dt);
            for cue in report.cues {
                log::info!(
                    "{:?} at {} (frame {})",
                    cue,
                    format_score(state.motion.score()),
                    frame
                );
            }
        }

        let motion = &state.motion;
        let mut best = PersonalBest::load();
        best.record(motion.high_score(), motion.high_score_time());
        best.save_if_unsaved();

        println!("{}", title_for_score(motion.score()));
        println!(
            "score {}  high score {} after {:.2}s",
            format_score(motion.score()),
            format_score(motion.high_score()),
            motion.high_score_time()
        );
        println!("{}", best.brag());
    }
}
