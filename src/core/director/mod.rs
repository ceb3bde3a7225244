//=========================================================================
// Director
//=========================================================================
//
// The run-loop: owns the current scene and renderer, tracks the composite
// activity state and drives one frame per iteration.
//
// Iteration:
// ```text
//   1. snapshot state
//   2. drain application events  (resume/suspend/window created/destroyed/quit)
//   3. drain window events       (focus gained/lost, context lost)
//   4. resume()/suspend() the scene when "running" flipped
//   5. running? drain input → remap touches → Scene::handle
//   6. running? Scene::update → lock context → render → flush_and_display
//   7. apply queued scene changes
//   8. stop on exit flag or when no scene is left
// ```
//
// Lifecycle events are always processed before input within an iteration,
// so a scene never sees input before its `resume()`.
//
// Losing the surface is routine: a frame whose accessor is not valid is
// skipped without logging noise or errors.
//
//=========================================================================

//=== Module Declarations =================================================

mod handle;
mod remap;
mod state;

//=== Public API ==========================================================

pub use handle::DirectorHandle;
pub use remap::{remap_point, remap_touch};
pub use state::State;

//=== External Dependencies ===============================================

use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::event::{ApplicationEvent, Event, EventQueue, WindowEvent};
use crate::core::geometry::Size2f;
use crate::core::graphics::{
    DisplayListRenderer, Frame, GraphicsContext, GraphicsError, Renderer, RendererFactory,
};
use crate::core::scene::Scene;
use crate::core::window::Window;
use handle::{DirectorCommand, Kernel};
use state::{TickControl, Transition};

//=== ContextFactory ======================================================

/// Creates a graphics context for a window that has none.
pub type ContextFactory =
    Box<dyn FnMut(&Window) -> Result<Arc<dyn GraphicsContext>, GraphicsError> + Send>;

//=== DirectorConfig ======================================================

/// Run-loop settings.
///
/// # Default Values
///
/// - **default_frame_duration**: 1/60 s (first frame, when the scene has
///   no fixed duration)
/// - **target_fps**: none (present as fast as the context allows)
/// - **idle_sleep**: 10 ms (sleep per iteration while not running)
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorConfig {
    pub default_frame_duration: f32,
    pub target_fps: Option<f64>,
    pub idle_sleep: Duration,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            default_frame_duration: 1.0 / 60.0,
            target_fps: None,
            idle_sleep: Duration::from_millis(10),
        }
    }
}

//=== Director ============================================================

/// Scene lifecycle director and frame loop.
///
/// One director drives one process; it is constructed explicitly by the
/// entry point and runs on the thread that calls [`Director::run_scene`].
/// Other threads reach it through [`DirectorHandle`].
pub struct Director {
    config: DirectorConfig,
    kernel: Arc<Kernel>,
    state: State,

    current_scene: Option<Box<dyn Scene>>,
    renderer: Option<Box<dyn Renderer>>,
    renderer_factory: RendererFactory,
    context_factory: Option<ContextFactory>,

    application: EventQueue<ApplicationEvent>,
    event_queue: EventQueue<Event>,
    commands: EventQueue<DirectorCommand>,

    surface: Size2f,
    frames_rendered: u64,
}

impl Director {
    //--- Construction -----------------------------------------------------

    pub fn new(config: DirectorConfig) -> Self {
        Self {
            config,
            kernel: Arc::new(Kernel::default()),
            state: State::default(),
            current_scene: None,
            renderer: None,
            renderer_factory: DisplayListRenderer::factory(),
            context_factory: None,
            application: EventQueue::new(),
            event_queue: EventQueue::new(),
            commands: EventQueue::new(),
            surface: Size2f::default(),
            frames_rendered: 0,
        }
    }

    /// Replaces the renderer built on every window creation.
    pub fn with_renderer_factory(mut self, factory: RendererFactory) -> Self {
        self.renderer_factory = factory;
        self
    }

    /// Sets the factory used when a created window has no context yet.
    pub fn with_context_factory(mut self, factory: ContextFactory) -> Self {
        self.context_factory = Some(factory);
        self
    }

    pub fn handle(&self) -> DirectorHandle {
        DirectorHandle {
            kernel: Arc::clone(&self.kernel),
            application: self.application.sender(),
            input: self.event_queue.sender(),
            commands: self.commands.sender(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> State {
        self.state
    }

    /// Surface size cached at the last window creation.
    pub fn surface_size(&self) -> Size2f {
        self.surface
    }

    pub fn is_running(&self) -> bool {
        self.kernel.is_running()
    }

    pub fn has_scene(&self) -> bool {
        self.current_scene.is_some()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    //--- Execution --------------------------------------------------------

    /// Installs `scene` and runs the loop until exit or until no scene is
    /// left. Blocks the calling thread.
    ///
    /// A scene whose `initialize` fails is discarded and the loop does not
    /// start.
    pub fn run_scene(&mut self, scene: Box<dyn Scene>) {
        if !self.install_scene(scene) {
            return;
        }

        if !self.kernel.is_running() {
            self.run_kernel();
        }
    }

    fn run_kernel(&mut self) {
        self.kernel.start();
        info!(target: "director", "Run-loop started");

        let mut time = self.first_frame_duration();

        loop {
            let frame_start = Instant::now();

            if self.iterate(time) == TickControl::Exit {
                break;
            }

            self.pace(frame_start);
            time = frame_start.elapsed().as_secs_f32();
        }

        self.kernel.finish();
        info!(
            target: "director",
            "Run-loop finished after {} rendered frames",
            self.frames_rendered
        );
    }

    fn first_frame_duration(&self) -> f32 {
        match &self.current_scene {
            Some(scene) if scene.frame_duration() >= 0.0 => scene.frame_duration(),
            _ => self.config.default_frame_duration,
        }
    }

    fn pace(&self, frame_start: Instant) {
        if !self.state.is_running() {
            thread::sleep(self.config.idle_sleep);
            return;
        }

        if let Some(fps) = self.config.target_fps {
            let frame_duration = Duration::from_secs_f64(1.0 / fps);
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }
    }

    //--- Iteration --------------------------------------------------------

    /// Runs one iteration of the loop with `time` seconds of elapsed time.
    pub(crate) fn iterate(&mut self, time: f32) -> TickControl {
        let previous = self.state;

        if let Err(e) = self.pump_application_events() {
            error!(target: "director", "Cannot attach a graphics context: {}", e);
            self.kernel.request_exit();
            return TickControl::Exit;
        }

        if !self.kernel.should_exit() {
            let window = self.kernel.window();

            if let Some(window) = &window {
                self.pump_window_events(window);
            }

            self.apply_transition(previous);

            if self.state.is_running() {
                self.dispatch_input();
                self.update_scene(time);

                if let Some(window) = &window {
                    self.render_frame(window);
                }
            }
        }

        self.apply_commands();

        if self.kernel.should_exit() || self.current_scene.is_none() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    //--- Event Pumping ----------------------------------------------------

    fn pump_application_events(&mut self) -> Result<(), GraphicsError> {
        while let Some(event) = self.application.poll() {
            trace!(target: "director", "Application event: {:?}", event);

            match event {
                ApplicationEvent::Resume => self.state.active = true,
                ApplicationEvent::Suspend => self.state.active = false,
                ApplicationEvent::WindowCreated(window) => self.on_window_created(window)?,
                ApplicationEvent::WindowDestroyed => {
                    self.state.graphics = false;
                    self.renderer = None;
                    debug!(target: "director", "Window destroyed, renderer dropped");
                }
                ApplicationEvent::Quit => {
                    info!(target: "director", "Quit requested");
                    self.kernel.request_exit();
                }
            }
        }

        Ok(())
    }

    fn on_window_created(&mut self, handle: Weak<Window>) -> Result<(), GraphicsError> {
        let Some(window) = handle.upgrade() else {
            warn!(target: "director", "Window created event for a window that no longer exists");
            return Ok(());
        };

        if !window.has_graphics_context() {
            let factory = self
                .context_factory
                .as_mut()
                .ok_or(GraphicsError::NoGraphicsContext)?;

            let context = factory(&window)?;
            if !window.set_graphics_context(Arc::clone(&context)) {
                return Err(GraphicsError::ContextRejected);
            }
            context.make_current();
        }

        {
            let graphics = window.lock_graphics_context();

            if let Some(context) = graphics.context() {
                let surface = context.surface_size();
                self.surface = surface.to_f32();

                let renderer = (self.renderer_factory)(surface);
                if !renderer.is_ok() {
                    error!(
                        target: "director",
                        "Renderer failed to initialize for a {}x{} surface; rendering disabled until the next window",
                        surface.width,
                        surface.height
                    );
                }
                self.renderer = Some(renderer);

                info!(
                    target: "director",
                    "Window created with a {}x{} surface",
                    surface.width,
                    surface.height
                );
            } else {
                warn!(target: "director", "Window created but its graphics context is unavailable");
            }
        }

        self.kernel.set_window(handle);
        self.state.graphics = true;
        Ok(())
    }

    fn pump_window_events(&mut self, window: &Window) {
        while let Some(event) = window.poll() {
            trace!(target: "director", "Window event: {:?}", event);

            match event {
                WindowEvent::GotFocus => self.state.focused = true,
                WindowEvent::LostFocus => self.state.focused = false,
                WindowEvent::LostGraphicsContext => {
                    debug!(target: "director", "Graphics context lost");
                }
            }
        }
    }

    //--- Scene Driving ----------------------------------------------------

    fn apply_transition(&mut self, previous: State) {
        let Some(scene) = self.current_scene.as_mut() else {
            return;
        };

        match Transition::between(previous, self.state) {
            Transition::Resume => {
                debug!(target: "director", "Resuming scene");
                scene.resume();
            }
            Transition::Suspend => {
                debug!(target: "director", "Suspending scene");
                scene.suspend();
            }
            Transition::None => {}
        }
    }

    fn dispatch_input(&mut self) {
        let Some(scene) = self.current_scene.as_mut() else {
            return;
        };

        let view = scene.view_size();

        while let Some(mut event) = self.event_queue.poll() {
            remap_touch(&mut event, self.surface, view);
            scene.handle(&event);
        }
    }

    fn update_scene(&mut self, time: f32) {
        if let Some(scene) = self.current_scene.as_mut() {
            scene.update(time);
        }
    }

    fn render_frame(&mut self, window: &Window) {
        let Some(scene) = self.current_scene.as_mut() else {
            return;
        };

        let graphics = window.lock_graphics_context();

        let Some(context) = graphics.context() else {
            trace!(target: "director", "Surface unavailable, frame skipped");
            return;
        };

        let Some(renderer) = self.renderer.as_mut().filter(|renderer| renderer.is_ok()) else {
            return;
        };

        let view = scene.view_size();
        renderer.set_view_size(view);
        renderer.clear();

        {
            let mut frame = Frame::new(&mut **renderer, context, view);
            scene.render(&mut frame);
        }

        if context.flush_and_display() {
            self.frames_rendered += 1;
        } else {
            trace!(target: "director", "Surface lost while presenting");
        }
    }

    //--- Scene Management -------------------------------------------------

    fn apply_commands(&mut self) {
        while let Some(command) = self.commands.poll() {
            debug!(target: "director", "Scene command: {:?}", command);

            match command {
                DirectorCommand::RunScene(scene) => {
                    self.install_scene(scene);
                }
                DirectorCommand::EndScene => {
                    if let Some(mut scene) = self.current_scene.take() {
                        if self.state.is_running() {
                            scene.suspend();
                        }
                        info!(target: "director", "Scene ended");
                    }
                }
            }
        }
    }

    /// Initializes `scene` and makes it current.
    ///
    /// While running, the outgoing scene is suspended and the incoming one
    /// resumed so both observe a consistent lifecycle.
    fn install_scene(&mut self, mut scene: Box<dyn Scene>) -> bool {
        if !scene.initialize() {
            error!(target: "director", "Scene failed to initialize and was discarded");
            return false;
        }

        let running = self.state.is_running();

        if let Some(mut previous) = self.current_scene.take() {
            if running {
                previous.suspend();
            }
        }

        if running {
            scene.resume();
        }

        self.current_scene = Some(scene);
        debug!(target: "director", "Scene installed");
        true
    }
}

impl Default for Director {
    fn default() -> Self {
        Self::new(DirectorConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{event_id, Id};
    use crate::core::geometry::Size2u;
    use crate::core::graphics::testing::TrackedContext;
    use crate::core::graphics::HeadlessContext;
    use parking_lot::Mutex;

    //--- Recording Scene --------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Initialize,
        Resume,
        Suspend,
        Handle(Id, Option<(f32, f32)>),
        Update(f32),
        Upload(bool),
        Render(Size2u),
    }

    type Calls = Arc<Mutex<Vec<Call>>>;

    struct Recorder {
        view: Size2u,
        frame_duration: f32,
        initialize_ok: bool,
        calls: Calls,
        stop_after_update: Option<DirectorHandle>,
        upload_with: Option<DirectorHandle>,
    }

    impl Recorder {
        fn new(calls: &Calls) -> Self {
            Self {
                view: Size2u::new(1280, 720),
                frame_duration: -1.0,
                initialize_ok: true,
                calls: Arc::clone(calls),
                stop_after_update: None,
                upload_with: None,
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().push(call);
        }
    }

    impl Scene for Recorder {
        fn view_size(&self) -> Size2u {
            self.view
        }

        fn frame_duration(&self) -> f32 {
            self.frame_duration
        }

        fn initialize(&mut self) -> bool {
            self.record(Call::Initialize);
            self.initialize_ok
        }

        fn suspend(&mut self) {
            self.record(Call::Suspend);
        }

        fn resume(&mut self) {
            self.record(Call::Resume);
        }

        fn handle(&mut self, event: &Event) {
            self.record(Call::Handle(event.id, event.position()));
        }

        fn update(&mut self, time: f32) {
            self.record(Call::Update(time));
            if let Some(handle) = &self.upload_with {
                let uploaded = handle.lock_graphics_context(|graphics| match graphics.context() {
                    Some(context) => context.make_current(),
                    None => false,
                });
                self.record(Call::Upload(uploaded));
            }
            if let Some(handle) = &self.stop_after_update {
                handle.stop();
            }
        }

        fn render(&mut self, frame: &mut Frame<'_>) {
            frame.draw_rectangle(0.0, 0.0, 1.0, 1.0);
            self.record(Call::Render(frame.view_size()));
        }
    }

    fn take(calls: &Calls) -> Vec<Call> {
        std::mem::take(&mut *calls.lock())
    }

    //--- Fixture ----------------------------------------------------------

    struct Fixture {
        director: Director,
        handle: DirectorHandle,
        window: Arc<Window>,
        context: Arc<TrackedContext>,
        calls: Calls,
    }

    impl Fixture {
        fn new(surface: Size2u) -> Self {
            Self::with_director(surface, Director::default())
        }

        fn with_director(surface: Size2u, director: Director) -> Self {
            let handle = director.handle();
            let window = Arc::new(Window::new());
            let (context, _lifecycle) = TrackedContext::concrete(surface);
            assert!(window.set_graphics_context(context.clone()));

            Self {
                director,
                handle,
                window,
                context,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn with_scene(self) -> Self {
            let scene = Recorder::new(&self.calls);
            self.with(scene)
        }

        fn with(mut self, scene: Recorder) -> Self {
            assert!(self.director.install_scene(Box::new(scene)));
            take(&self.calls);
            self
        }

        fn bring_up(&self) {
            self.handle.post(ApplicationEvent::Resume);
            self.handle
                .post(ApplicationEvent::WindowCreated(Arc::downgrade(&self.window)));
            self.window.push_event(WindowEvent::GotFocus);
        }

        fn running() -> Self {
            let mut fixture = Self::new(Size2u::new(1920, 1080)).with_scene();
            fixture.bring_up();
            assert_eq!(fixture.director.iterate(0.5), TickControl::Continue);
            take(&fixture.calls);
            fixture
        }
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn becomes_running_and_renders() {
        let mut fixture = Fixture::new(Size2u::new(1920, 1080)).with_scene();
        fixture.bring_up();

        assert_eq!(fixture.director.iterate(0.5), TickControl::Continue);

        assert!(fixture.director.state().is_running());
        assert_eq!(fixture.director.surface_size(), Size2f::new(1920.0, 1080.0));
        assert_eq!(
            take(&fixture.calls),
            vec![Call::Resume, Call::Update(0.5), Call::Render(Size2u::new(1280, 720))]
        );
        assert_eq!(fixture.context.frames_presented(), 1);
        assert_eq!(fixture.director.frames_rendered(), 1);
    }

    #[test]
    fn partial_state_does_not_resume() {
        let mut fixture = Fixture::new(Size2u::new(800, 480)).with_scene();
        fixture.handle.post(ApplicationEvent::Resume);
        fixture
            .handle
            .post(ApplicationEvent::WindowCreated(Arc::downgrade(&fixture.window)));

        fixture.director.iterate(0.1);

        let state = fixture.director.state();
        assert!(state.active && state.graphics && !state.focused);
        assert!(take(&fixture.calls).is_empty());
        assert_eq!(fixture.context.frames_presented(), 0);
    }

    #[test]
    fn steady_state_has_no_transition() {
        let mut fixture = Fixture::running();

        fixture.director.iterate(0.1);
        fixture.director.iterate(0.1);

        let calls = take(&fixture.calls);
        assert!(!calls.contains(&Call::Resume));
        assert!(!calls.contains(&Call::Suspend));
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::Render(_))).count(), 2);
    }

    #[test]
    fn suspend_event_suspends_scene_once() {
        let mut fixture = Fixture::running();

        fixture.handle.post(ApplicationEvent::Suspend);
        fixture.director.iterate(0.1);
        fixture.director.iterate(0.1);

        assert_eq!(take(&fixture.calls), vec![Call::Suspend]);
        assert!(!fixture.director.state().active);
    }

    #[test]
    fn focus_loss_and_gain_toggle_scene() {
        let mut fixture = Fixture::running();

        fixture.window.push_event(WindowEvent::LostFocus);
        fixture.director.iterate(0.1);
        assert_eq!(take(&fixture.calls), vec![Call::Suspend]);

        fixture.window.push_event(WindowEvent::GotFocus);
        fixture.director.iterate(0.1);
        assert_eq!(
            take(&fixture.calls),
            vec![Call::Resume, Call::Update(0.1), Call::Render(Size2u::new(1280, 720))]
        );
    }

    #[test]
    fn flicker_within_one_iteration_is_no_transition() {
        let mut fixture = Fixture::running();

        fixture.window.push_event(WindowEvent::LostFocus);
        fixture.window.push_event(WindowEvent::GotFocus);
        fixture.director.iterate(0.1);

        let calls = take(&fixture.calls);
        assert!(!calls.contains(&Call::Suspend));
        assert!(!calls.contains(&Call::Resume));
    }

    #[test]
    fn window_destroyed_suspends_and_stops_rendering() {
        let mut fixture = Fixture::running();

        fixture.handle.post(ApplicationEvent::WindowDestroyed);
        fixture.director.iterate(0.1);
        fixture.director.iterate(0.1);

        assert_eq!(take(&fixture.calls), vec![Call::Suspend]);
        assert!(!fixture.director.state().graphics);
        assert!(fixture.director.renderer.is_none());
        assert_eq!(fixture.context.frames_presented(), 1);
    }

    #[test]
    fn context_lost_notification_is_informational() {
        let mut fixture = Fixture::running();

        fixture.window.push_event(WindowEvent::LostGraphicsContext);
        fixture.director.iterate(0.1);

        assert!(fixture.director.state().is_running());
        assert!(!take(&fixture.calls).contains(&Call::Suspend));
    }

    //--- Rendering --------------------------------------------------------

    #[test]
    fn lost_surface_skips_render_but_updates() {
        let mut fixture = Fixture::running();

        fixture.window.invalidate_graphics_context();
        assert_eq!(fixture.director.iterate(0.1), TickControl::Continue);

        assert_eq!(take(&fixture.calls), vec![Call::Update(0.1)]);
        assert_eq!(fixture.context.frames_presented(), 1);
    }

    #[test]
    fn released_surface_skips_render() {
        let mut fixture = Fixture::running();

        fixture.window.release_graphics_context();
        fixture.director.iterate(0.1);

        assert_eq!(take(&fixture.calls), vec![Call::Update(0.1)]);
    }

    #[test]
    fn failed_renderer_is_not_used_until_next_window() {
        let attempts = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&attempts);

        let director = Director::default().with_renderer_factory(Box::new(move |surface| {
            let mut attempts = counter.lock();
            *attempts += 1;
            let renderer: Box<dyn Renderer> = if *attempts == 1 {
                Box::new(DisplayListRenderer::failed(surface, "shader link failed"))
            } else {
                Box::new(DisplayListRenderer::new(surface))
            };
            renderer
        }));
        let mut fixture = Fixture::with_director(Size2u::new(800, 480), director).with_scene();
        fixture.bring_up();

        fixture.director.iterate(0.1);
        fixture.director.iterate(0.1);
        assert_eq!(
            take(&fixture.calls),
            vec![Call::Resume, Call::Update(0.1), Call::Update(0.1)]
        );
        assert_eq!(*attempts.lock(), 1, "no retry within the same window");

        fixture.handle.post(ApplicationEvent::WindowDestroyed);
        fixture
            .handle
            .post(ApplicationEvent::WindowCreated(Arc::downgrade(&fixture.window)));
        fixture.director.iterate(0.1);

        assert_eq!(*attempts.lock(), 2);
        assert!(take(&fixture.calls).contains(&Call::Render(Size2u::new(1280, 720))));
    }

    //--- Input ------------------------------------------------------------

    #[test]
    fn touches_are_remapped_into_view_space() {
        let mut fixture = Fixture::running();

        fixture
            .handle
            .handle_event(Event::touch(event_id::TOUCH_STARTED, 960.0, 540.0));
        fixture
            .handle
            .handle_event(Event::touch(event_id::TOUCH_ENDED, 0.0, 0.0));
        fixture.director.iterate(0.1);

        let calls = take(&fixture.calls);
        assert_eq!(
            &calls[..2],
            &[
                Call::Handle(event_id::TOUCH_STARTED, Some((640.0, 360.0))),
                Call::Handle(event_id::TOUCH_ENDED, Some((0.0, 720.0))),
            ]
        );
    }

    #[test]
    fn other_events_pass_through_unchanged() {
        let mut fixture = Fixture::running();
        let key = Id::from_name("key-pressed");

        fixture.handle.handle_event(Event::touch(key, 5.0, 6.0));
        fixture.director.iterate(0.1);

        assert_eq!(take(&fixture.calls)[0], Call::Handle(key, Some((5.0, 6.0))));
    }

    #[test]
    fn resume_precedes_input_of_the_same_iteration() {
        let mut fixture = Fixture::new(Size2u::new(1920, 1080)).with_scene();

        fixture
            .handle
            .handle_event(Event::touch(event_id::TOUCH_STARTED, 960.0, 540.0));
        fixture.bring_up();
        fixture.director.iterate(0.1);

        let calls = take(&fixture.calls);
        assert_eq!(calls[0], Call::Resume);
        assert_eq!(
            calls[1],
            Call::Handle(event_id::TOUCH_STARTED, Some((640.0, 360.0)))
        );
    }

    #[test]
    fn input_waits_while_not_running() {
        let mut fixture = Fixture::running();

        fixture.window.push_event(WindowEvent::LostFocus);
        fixture
            .handle
            .handle_event(Event::touch(event_id::TOUCH_MOVED, 960.0, 540.0));
        fixture.director.iterate(0.1);
        assert_eq!(take(&fixture.calls), vec![Call::Suspend]);

        fixture.window.push_event(WindowEvent::GotFocus);
        fixture.director.iterate(0.1);
        let calls = take(&fixture.calls);
        assert_eq!(calls[0], Call::Resume);
        assert_eq!(
            calls[1],
            Call::Handle(event_id::TOUCH_MOVED, Some((640.0, 360.0)))
        );
    }

    #[test]
    fn input_is_delivered_in_push_order() {
        let mut fixture = Fixture::running();

        for i in 0..5 {
            fixture
                .handle
                .handle_event(Event::touch(event_id::TOUCH_MOVED, 0.0, 1080.0 - i as f32 * 3.0));
        }
        fixture.director.iterate(0.1);

        let ys: Vec<f32> = take(&fixture.calls)
            .into_iter()
            .filter_map(|call| match call {
                Call::Handle(_, Some((_, y))) => Some(y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 5);
        assert!(ys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    //--- Termination ------------------------------------------------------

    #[test]
    fn quit_ends_the_loop() {
        let mut fixture = Fixture::running();

        fixture.handle.post(ApplicationEvent::Quit);

        assert_eq!(fixture.director.iterate(0.1), TickControl::Exit);
        assert!(take(&fixture.calls).is_empty(), "nothing runs after quit");
    }

    #[test]
    fn ending_the_scene_ends_the_loop() {
        let mut fixture = Fixture::running();

        fixture.handle.end_scene();

        assert_eq!(fixture.director.iterate(0.1), TickControl::Exit);
        assert!(!fixture.director.has_scene());
        assert_eq!(take(&fixture.calls).last(), Some(&Call::Suspend));
    }

    #[test]
    fn missing_context_without_factory_is_fatal() {
        let mut director = Director::default();
        let handle = director.handle();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        director.install_scene(Box::new(Recorder::new(&calls)));

        let window = Arc::new(Window::new());
        handle.post(ApplicationEvent::WindowCreated(Arc::downgrade(&window)));

        assert_eq!(director.iterate(0.1), TickControl::Exit);
    }

    #[test]
    fn context_factory_attaches_missing_context() {
        let mut director = Director::default().with_context_factory(Box::new(|_window| {
            let context: Arc<dyn GraphicsContext> =
                Arc::new(HeadlessContext::new(Size2u::new(640, 360)));
            Ok(context)
        }));
        let handle = director.handle();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        director.install_scene(Box::new(Recorder::new(&calls)));

        let window = Arc::new(Window::new());
        handle.post(ApplicationEvent::WindowCreated(Arc::downgrade(&window)));

        assert_eq!(director.iterate(0.1), TickControl::Continue);
        assert!(window.has_graphics_context());
        assert!(window.lock_graphics_context().is_current());
        assert_eq!(director.surface_size(), Size2f::new(640.0, 360.0));
    }

    #[test]
    fn failing_context_factory_is_fatal() {
        let mut director = Director::default().with_context_factory(Box::new(|_window| {
            Err(GraphicsError::ContextCreation("no EGL config".into()))
        }));
        let handle = director.handle();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        director.install_scene(Box::new(Recorder::new(&calls)));

        let window = Arc::new(Window::new());
        handle.post(ApplicationEvent::WindowCreated(Arc::downgrade(&window)));

        assert_eq!(director.iterate(0.1), TickControl::Exit);
    }

    //--- Scene Replacement ------------------------------------------------

    #[test]
    fn replacement_scene_is_initialized_and_resumed() {
        let mut fixture = Fixture::running();
        let next_calls: Calls = Arc::new(Mutex::new(Vec::new()));

        fixture
            .handle
            .run_scene(Box::new(Recorder::new(&next_calls)));
        fixture.director.iterate(0.1);

        assert_eq!(take(&fixture.calls).last(), Some(&Call::Suspend));
        assert_eq!(take(&next_calls), vec![Call::Initialize, Call::Resume]);

        fixture.director.iterate(0.1);
        assert!(take(&fixture.calls).is_empty());
        assert_eq!(take(&next_calls).len(), 2);
    }

    #[test]
    fn failed_initialize_keeps_current_scene() {
        let mut fixture = Fixture::running();
        let next_calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let mut broken = Recorder::new(&next_calls);
        broken.initialize_ok = false;

        fixture.handle.run_scene(Box::new(broken));

        assert_eq!(fixture.director.iterate(0.1), TickControl::Continue);
        assert_eq!(take(&next_calls), vec![Call::Initialize]);
        assert!(!take(&fixture.calls).contains(&Call::Suspend));
    }

    //--- Graphics Access From Scenes ---------------------------------------

    fn uploading() -> Fixture {
        let fixture = Fixture::new(Size2u::new(1920, 1080));
        let mut scene = Recorder::new(&fixture.calls);
        scene.upload_with = Some(fixture.handle.clone());

        let mut fixture = fixture.with(scene);
        fixture.bring_up();
        fixture.director.iterate(0.5);
        take(&fixture.calls);
        fixture
    }

    #[test]
    fn scene_uploads_under_the_graphics_lock_during_update() {
        let mut fixture = uploading();

        fixture.director.iterate(0.1);

        assert_eq!(
            take(&fixture.calls),
            vec![
                Call::Update(0.1),
                Call::Upload(true),
                Call::Render(Size2u::new(1280, 720))
            ]
        );
        assert!(fixture.context.is_current());
    }

    #[test]
    fn upload_is_skipped_once_the_surface_is_invalidated() {
        let mut fixture = uploading();

        fixture.window.invalidate_graphics_context();
        fixture.director.iterate(0.1);

        assert_eq!(
            take(&fixture.calls),
            vec![Call::Update(0.1), Call::Upload(false)]
        );
    }

    #[test]
    fn handle_without_window_yields_empty_accessor() {
        let director = Director::default();
        let handle = director.handle();

        assert!(!handle.lock_graphics_context(|graphics| graphics.owns_lock()));
        assert!(!handle.try_lock_graphics_context(|graphics| graphics.owns_lock()));
    }

    #[test]
    fn handle_try_lock_reports_contention() {
        let fixture = uploading();

        {
            let _held = fixture.window.lock_graphics_context();
            let (owns_lock, has_context) = fixture
                .handle
                .try_lock_graphics_context(|graphics| (graphics.owns_lock(), graphics.has_context()));
            assert!(!owns_lock);
            assert!(!has_context);
        }

        assert!(fixture
            .handle
            .try_lock_graphics_context(|graphics| graphics.is_valid()));
    }

    #[test]
    fn handle_lock_waits_for_the_render_lock() {
        let fixture = uploading();
        let handle = fixture.handle.clone();
        let held = fixture.window.lock_graphics_context();

        thread::scope(|scope| {
            let uploader = scope.spawn(|| handle.lock_graphics_context(|graphics| graphics.is_valid()));

            thread::sleep(Duration::from_millis(20));
            assert!(!uploader.is_finished(), "blocked while the lock is held");

            drop(held);
            assert!(uploader.join().unwrap());
        });
    }

    //--- Pacing -----------------------------------------------------------

    #[test]
    fn target_fps_paces_running_frames() {
        let director = Director::new(DirectorConfig {
            target_fps: Some(50.0),
            idle_sleep: Duration::ZERO,
            ..DirectorConfig::default()
        });
        let mut fixture = Fixture::with_director(Size2u::new(800, 480), director).with_scene();
        fixture.bring_up();
        fixture.director.iterate(0.1);
        assert!(fixture.director.state().is_running());

        for _ in 0..3 {
            let frame_start = Instant::now();
            fixture.director.iterate(0.02);
            fixture.director.pace(frame_start);
            assert!(frame_start.elapsed() >= Duration::from_millis(20));
        }
    }

    #[test]
    fn measured_time_covers_the_target_frame_duration() {
        struct Timed {
            handle: DirectorHandle,
            times: Arc<Mutex<Vec<f32>>>,
        }

        impl Scene for Timed {
            fn view_size(&self) -> Size2u {
                Size2u::new(320, 240)
            }

            fn update(&mut self, time: f32) {
                let mut times = self.times.lock();
                times.push(time);
                if times.len() == 4 {
                    self.handle.stop();
                }
            }

            fn render(&mut self, _frame: &mut Frame<'_>) {}
        }

        let director = Director::new(DirectorConfig {
            target_fps: Some(50.0),
            ..DirectorConfig::default()
        });
        let mut fixture = Fixture::with_director(Size2u::new(320, 240), director);
        let times = Arc::new(Mutex::new(Vec::new()));
        let scene = Timed {
            handle: fixture.handle.clone(),
            times: Arc::clone(&times),
        };
        fixture.bring_up();

        fixture.director.run_scene(Box::new(scene));

        let times = times.lock();
        assert_eq!(times.len(), 4);
        assert!(times[1..].iter().all(|&time| time >= 0.02), "{:?}", *times);
    }

    //--- Kernel -----------------------------------------------------------

    #[test]
    fn first_update_uses_fixed_frame_duration() {
        let mut fixture = Fixture::new(Size2u::new(800, 480));
        let mut scene = Recorder::new(&fixture.calls);
        scene.frame_duration = 0.25;
        scene.stop_after_update = Some(fixture.handle.clone());
        fixture.bring_up();

        fixture.director.run_scene(Box::new(scene));

        assert!(!fixture.director.is_running());
        assert_eq!(
            take(&fixture.calls),
            vec![
                Call::Initialize,
                Call::Resume,
                Call::Update(0.25),
                Call::Render(Size2u::new(1280, 720))
            ]
        );
    }

    #[test]
    fn first_update_falls_back_to_default_duration() {
        let mut fixture = Fixture::new(Size2u::new(800, 480));
        let mut scene = Recorder::new(&fixture.calls);
        scene.stop_after_update = Some(fixture.handle.clone());
        fixture.bring_up();

        fixture.director.run_scene(Box::new(scene));

        assert!(take(&fixture.calls).contains(&Call::Update(1.0 / 60.0)));
    }

    #[test]
    fn run_scene_with_failed_initialize_does_not_start() {
        let mut director = Director::default();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let mut scene = Recorder::new(&calls);
        scene.initialize_ok = false;

        director.run_scene(Box::new(scene));

        assert!(!director.has_scene());
        assert!(!director.is_running());
    }

    #[test]
    fn quit_before_start_runs_a_single_iteration() {
        let mut director = Director::default();
        let handle = director.handle();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        handle.post(ApplicationEvent::Quit);

        director.run_scene(Box::new(Recorder::new(&calls)));

        assert_eq!(take(&calls), vec![Call::Initialize]);
        assert!(!handle.is_running());
    }

    #[test]
    fn loop_driven_from_another_thread() {
        let mut director = Director::new(DirectorConfig {
            idle_sleep: Duration::from_millis(1),
            ..DirectorConfig::default()
        });
        let handle = director.handle();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let window = Arc::new(Window::new());
        let (context, _lifecycle) = TrackedContext::concrete(Size2u::new(800, 480));
        window.set_graphics_context(context.clone());

        let scene = Recorder::new(&calls);
        let runner = thread::spawn(move || {
            director.run_scene(Box::new(scene));
            director.frames_rendered()
        });

        handle.post(ApplicationEvent::Resume);
        handle.post(ApplicationEvent::WindowCreated(Arc::downgrade(&window)));
        window.push_event(WindowEvent::GotFocus);

        while context.frames_presented() < 3 {
            thread::yield_now();
        }

        // Surface loss from the platform thread while the loop renders.
        window.push_event(WindowEvent::LostGraphicsContext);
        window.invalidate_graphics_context();
        handle.post(ApplicationEvent::WindowDestroyed);
        window.release_graphics_context();
        handle.post(ApplicationEvent::Quit);

        let frames = runner.join().unwrap();
        assert!(frames >= 3);
        assert!(!handle.is_running());
        assert_eq!(take(&calls).first(), Some(&Call::Initialize));
    }
}
