use ggez::{self, conf, event, graphics, Context, ContextBuilder, GameResult};
use ggez::event::{KeyCode, KeyMods, MouseButton};
use log::{debug, info, warn};
use std::{env, path};

mod block;
mod color;
mod components;
mod config;
mod error;
mod flock;
mod globals;
mod grid;
mod neighborhood;
mod systems;
use color::ColorVectorExt;
use config::FlockConfig;
use flock::{Flock, Gains};
use globals::*;


struct Game {
    flock: Flock,
    paused: bool,
}

impl Game {
    fn new(_ctx: &mut Context, config: &FlockConfig) -> GameResult<Self> {
        let mut flock = Flock::new(config)?;
        flock.populate(&mut rand::thread_rng());
        info!(
            "starting with {} blocks, gains {:?}, {} worker threads",
            flock.live_count(),
            flock.gains(),
            config.worker_threads.map_or_else(|| "default".to_string(), |n| n.to_string()),
        );
        Ok(
            Self { flock, paused: false }
        )
    }

    fn nudge_gains(&mut self, keycode: KeyCode) {
        let current = self.flock.gains();
        let bump = |v: f32, up: bool| {
            let v = if up { v + GAIN_STEP } else { v - GAIN_STEP };
            v.max(GAIN_MIN).min(GAIN_MAX)
        };
        let next = match keycode {
            KeyCode::Q => Gains { separation: bump(current.separation, true), ..current },
            KeyCode::A => Gains { separation: bump(current.separation, false), ..current },
            KeyCode::W => Gains { alignment: bump(current.alignment, true), ..current },
            KeyCode::S => Gains { alignment: bump(current.alignment, false), ..current },
            KeyCode::E => Gains { cohesion: bump(current.cohesion, true), ..current },
            KeyCode::D => Gains { cohesion: bump(current.cohesion, false), ..current },
            KeyCode::R => Gains::default(),
            KeyCode::T => Gains::DENSE,
            _ => return,
        };
        if let Err(e) = self.flock.set_gains(next) {
            warn!("ignoring gain change: {}", e);
        }
    }

    fn hud(&self) -> String {
        let gains = self.flock.gains();
        format!(
            "sep {:.1} [Q/A]  ali {:.1} [W/S]  coh {:.1} [E/D]  presets [R/T]  {}",
            gains.separation,
            gains.alignment,
            gains.cohesion,
            if self.paused { "paused [Space]" } else { "running [Space]" },
        )
    }
}

impl event::EventHandler for Game {
    fn update(&mut self, _ctx: &mut Context) -> GameResult {
        if !self.paused {
            self.flock.step();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        graphics::clear(ctx, graphics::BLACK);
        self.flock.render(ctx)?;
        let text = graphics::Text::new(self.hud());
        graphics::draw(ctx, &text, (nalgebra::Point2::new(10.0, HUD_Y), graphics::WHITE))?;
        graphics::present(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods, _repeat: bool) {
        match keycode {
            KeyCode::Escape => event::quit(ctx),
            KeyCode::Space => {
                self.paused = !self.paused;
                debug!("paused: {}", self.paused);
            }
            _ => self.nudge_gains(keycode),
        }
    }

    fn mouse_button_down_event(&mut self, _ctx: &mut Context, button: MouseButton, x: f32, y: f32) {
        if button != MouseButton::Left {
            return;
        }
        if let Some(ent) = self.flock.block_at(x, y) {
            if let Some(block) = self.flock.block(ent) {
                debug!("clicked block colored {:?}", block.color.to_rgb8());
            }
            if let Err(e) = self.flock.toggle_dormant(ent) {
                warn!("could not toggle block: {}", e);
            }
        }
    }
}

fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let resource_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        let mut path = path::PathBuf::from(manifest_dir);
        path.push("resources");
        path
    } else {
        path::PathBuf::from("./resources")
    };

    let cb = ContextBuilder::new("color-flock", "ggez")
        .window_setup(
            conf::WindowSetup::default()
                .title("ggez + specs: color flock")
        )
        .window_mode(
            conf::WindowMode::default()
                .dimensions(SCREEN_W, SCREEN_H)
        )
        .add_resource_path(resource_dir);
    let (ctx, event_loop) = &mut cb.build()?;

    let state = &mut Game::new(ctx, &FlockConfig::default())?;
    event::run(ctx, event_loop, state)
}
