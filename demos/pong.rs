//=========================================================================
// Pong
//=========================================================================
//
// Single-player pong on a 1280x720 virtual view.
//
// The right paddle follows the touch (or the mouse while the left button
// is held). The left paddle tracks the ball. A touch while serving
// launches the ball; a ball leaving the court returns to serving.
//
// The default renderer only records draw commands, so the window stays
// blank; follow the game through the `info` log.
//
// Run with:
//   RUST_LOG=debug cargo run --example pong
//
//=========================================================================

use basics_runtime::prelude::*;
use log::info;

//=== Constants ===========================================================

const VIEW: Size2u = Size2u::new(1280, 720);
const BALL_SIZE: f32 = 40.0;
const BALL_SPEED: f32 = 600.0;
const PADDLE_WIDTH: f32 = 30.0;
const PADDLE_HEIGHT: f32 = 180.0;
const PADDLE_MARGIN: f32 = 20.0;
const PADDLE_EASING: f32 = 8.0;
const MAX_STEP: f32 = 0.1;

//=== Court Objects =======================================================

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Serving,
    Playing { vx: f32, vy: f32 },
}

//=== PongScene ===========================================================

struct PongScene {
    phase: Phase,
    ball: Rect,
    ai: Rect,
    player: Rect,
    target_y: Option<f32>,
    paused: bool,
}

impl PongScene {
    fn new() -> Self {
        let height = VIEW.height as f32;
        let paddle_y = (height - PADDLE_HEIGHT) / 2.0;

        Self {
            phase: Phase::Serving,
            ball: Self::centered_ball(),
            ai: Rect {
                x: PADDLE_MARGIN,
                y: paddle_y,
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
            },
            player: Rect {
                x: VIEW.width as f32 - PADDLE_MARGIN - PADDLE_WIDTH,
                y: paddle_y,
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
            },
            target_y: None,
            paused: true,
        }
    }

    fn centered_ball() -> Rect {
        Rect {
            x: (VIEW.width as f32 - BALL_SIZE) / 2.0,
            y: (VIEW.height as f32 - BALL_SIZE) / 2.0,
            width: BALL_SIZE,
            height: BALL_SIZE,
        }
    }

    fn serve(&mut self, touch_y: f32) {
        // Launch angle follows where the player touched.
        let offset = (touch_y / VIEW.height as f32) - 0.5;
        self.phase = Phase::Playing {
            vx: -BALL_SPEED,
            vy: BALL_SPEED * offset,
        };
        info!("Serve");
    }

    fn reset(&mut self) {
        self.phase = Phase::Serving;
        self.ball = Self::centered_ball();
        self.target_y = None;
    }

    fn move_paddles(&mut self, step: f32) {
        let max_y = VIEW.height as f32 - PADDLE_HEIGHT;

        if let Some(target) = self.target_y {
            let desired = target - PADDLE_HEIGHT / 2.0;
            self.player.y += (desired - self.player.y) * (PADDLE_EASING * step).min(1.0);
        }
        self.player.y = self.player.y.clamp(0.0, max_y);

        self.ai.y = (self.ball.center_y() - PADDLE_HEIGHT / 2.0).clamp(0.0, max_y);
    }

    fn move_ball(&mut self, step: f32) {
        let Phase::Playing { mut vx, mut vy } = self.phase else {
            return;
        };

        self.ball.x += vx * step;
        self.ball.y += vy * step;

        let max_y = VIEW.height as f32 - BALL_SIZE;
        if self.ball.y <= 0.0 || self.ball.y >= max_y {
            self.ball.y = self.ball.y.clamp(0.0, max_y);
            vy = -vy;
        }

        if vx < 0.0 && self.ball.overlaps(&self.ai) {
            self.ball.x = self.ai.x + self.ai.width;
            vx = -vx;
        } else if vx > 0.0 && self.ball.overlaps(&self.player) {
            self.ball.x = self.player.x - BALL_SIZE;
            vx = -vx;
            vy += (self.ball.center_y() - self.player.center_y()) * 2.0;
        }

        if self.ball.x + BALL_SIZE < 0.0 || self.ball.x > VIEW.width as f32 {
            info!("Point over");
            self.reset();
            return;
        }

        self.phase = Phase::Playing { vx, vy };
    }
}

impl Scene for PongScene {
    fn view_size(&self) -> Size2u {
        VIEW
    }

    fn initialize(&mut self) -> bool {
        *self = Self::new();
        true
    }

    fn suspend(&mut self) {
        self.paused = true;
        info!("Paused");
    }

    fn resume(&mut self) {
        self.paused = false;
        info!("Resumed");
    }

    fn handle(&mut self, event: &Event) {
        if !event.is_touch() {
            return;
        }

        let Some((_, y)) = event.position() else {
            return;
        };

        if event.id == event_id::TOUCH_ENDED {
            self.target_y = None;
            return;
        }

        // View space has its origin at the bottom; the court uses the top.
        let court_y = VIEW.height as f32 - y;
        self.target_y = Some(court_y);

        if event.id == event_id::TOUCH_STARTED && self.phase == Phase::Serving {
            self.serve(court_y);
        }
    }

    fn update(&mut self, time: f32) {
        if self.paused {
            return;
        }

        let step = time.min(MAX_STEP);
        self.move_paddles(step);
        self.move_ball(step);
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let height = VIEW.height as f32;

        for rect in [self.ai, self.player, self.ball] {
            frame.draw_rectangle(rect.x, height - rect.y - rect.height, rect.width, rect.height);
        }
    }
}

//=== Entry Point =========================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    EngineBuilder::new()
        .with_title("Pong")
        .with_window_size(1280, 720)
        .with_target_fps(60.0)
        .build()
        .run(Box::new(PongScene::new()));
}
