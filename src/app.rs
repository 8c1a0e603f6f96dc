use color_eyre::Result;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;

use crate::clock::{FramePacer, SystemClock};
use crate::entities::GameState;
use crate::font::Labels;
use crate::input::InputManager;
use crate::renderer::{GameRenderer, RenderView};
use crate::world::World;

/// The main application: drives a [`World`] from terminal input and draws it.
pub struct App {
    world: World<SystemClock, StdRng>,
    labels: Labels,
    fps: u32,
    /// internal components
    pacer: FramePacer,
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        world: World<SystemClock, StdRng>,
        labels: Labels,
        fps: u32,
        reports_release: bool,
    ) -> Self {
        Self {
            world,
            labels,
            fps: 0,
            pacer: FramePacer::new(fps),
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop until the game is terminated.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            match self.world.state() {
                GameState::Running => self.run_frame(terminal)?,
                GameState::GameOver => self.wait_for_decision(terminal)?,
                GameState::Terminated => break,
            }
        }
        Ok(())
    }

    /// One paced frame: input, simulation, drawing
    fn run_frame<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let frame_time = self.pacer.wait();
        self.fps = fps_from(frame_time);

        self.input_manager.poll_events()?;
        for &action in self.input_manager.actions() {
            self.world.handle(action);
        }
        self.world.step(self.input_manager.held());

        // A lethal collision or quit ends the frame without another gameplay draw
        if self.world.state() == GameState::Running {
            self.draw(terminal)?;
        }
        Ok(())
    }

    /// Shows the game over screen and blocks until restart or quit.
    /// Nothing advances while waiting.
    fn wait_for_decision<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.draw(terminal)?;

        while self.world.state() == GameState::GameOver {
            self.input_manager.wait_events()?;
            for &action in self.input_manager.actions() {
                self.world.handle(action);
            }
            if self.world.state() == GameState::GameOver && self.input_manager.resized() {
                self.draw(terminal)?;
            }
        }

        // Keys held before the crash must not steer the next session
        self.input_manager.clear();
        self.pacer.reset();
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            let view = RenderView {
                game_state: self.world.state(),
                player: self.world.player(),
                enemies: self.world.enemies(),
                projectiles: self.world.projectiles(),
                score: self.world.score(),
                arena: self.world.arena(),
                labels: &self.labels,
                fps: self.fps,
            };
            self.renderer.render(frame, &view);
        })?;
        Ok(())
    }
}

fn fps_from(frame_time: Duration) -> u32 {
    let micros = frame_time.as_micros();
    if micros > 0 {
        (1_000_000 / micros) as u32
    } else {
        0
    }
}
