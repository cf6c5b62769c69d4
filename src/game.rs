//! Frame driver
//!
//! Owns the session state and wires it to the injected input adapter,
//! scheduler and draw surface. Each scheduled tick runs collisions and steps,
//! draws, then does the room bookkeeping. When the game ends the driver stops
//! its scheduler and asks for a one-shot reset.

use crate::input::InputAdapter;
use crate::renderer::Surface;
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::sim::{self, GameState};

pub struct Game<S: Scheduler, D: Surface> {
    state: GameState,
    input: InputAdapter,
    scheduler: S,
    surface: D,
    running: bool,
    shut_down: bool,
}

impl<S: Scheduler, D: Surface> Game<S, D> {
    /// Build the session and subscribe to input. Call [`Game::run`] to start ticking.
    pub fn new(settings: Settings, input: InputAdapter, scheduler: S, surface: D) -> Self {
        input.subscribe();
        Self {
            state: GameState::new(settings),
            input,
            scheduler,
            surface,
            running: false,
            shut_down: false,
        }
    }

    /// Start the repeating tick
    pub fn run(&mut self) {
        let period = self.state.settings().tick_period();
        log::info!("running at {} fps", self.state.settings().fps);
        self.running = true;
        self.scheduler.start(period);
    }

    /// One scheduled tick. Does nothing while stopped.
    pub fn frame(&mut self) {
        if !self.running {
            return;
        }
        let buttons = self.input.buttons();
        sim::simulate(&mut self.state, buttons);
        sim::draw(&self.state, &mut self.surface);
        sim::finish_frame(&mut self.state);

        if self.state.is_over() {
            self.over();
        }
    }

    fn over(&mut self) {
        self.running = false;
        self.scheduler.stop();
        let delay = self.state.settings().reset_delay();
        log::info!("resetting in {:?}", delay);
        self.scheduler.schedule_reset(delay);
    }

    /// Fresh session from the first room, then resume ticking. Ignored after [`Game::shutdown`].
    pub fn reset(&mut self) {
        if self.shut_down {
            return;
        }
        log::info!("reset");
        self.state.reset();
        self.run();
    }

    /// Stop ticking for good: cancel any pending reset and stop listening for input
    pub fn shutdown(&mut self) {
        self.running = false;
        self.shut_down = true;
        self.scheduler.stop();
        self.scheduler.cancel_reset();
        self.input.unsubscribe();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputAdapter {
        &self.input
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::scheduler::ManualScheduler;
    use crate::sim::{Color, Entity, GamePhase, Placement, Room};
    use std::time::Duration;

    type TestGame = Game<ManualScheduler, RecordingSurface>;

    fn game_with(settings: Settings) -> TestGame {
        let surface = RecordingSurface::new(settings.width, settings.height);
        Game::new(settings, InputAdapter::new(), ManualScheduler::new(), surface)
    }

    fn one_room() -> Settings {
        Settings {
            rooms: vec![Room::new("only", vec![Placement::enemy(100.0, 100.0, 10.0, Color::Green, 5.0)])],
            ..Settings::default()
        }
    }

    #[test]
    fn test_frames_only_run_when_started() {
        let mut game = game_with(Settings::default());
        game.frame();
        assert_eq!(game.state().frames, 0);

        game.run();
        assert!(game.scheduler().is_running());
        assert!((game.scheduler().period().unwrap().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
        game.frame();
        assert_eq!(game.state().frames, 1);
        // Player and the first room's enemy were drawn
        assert_eq!(game.surface().commands.len(), 2);
    }

    #[test]
    fn test_input_drives_player() {
        let mut game = game_with(Settings::default());
        let keyboard = game.input().clone();
        game.run();

        let start = game.state().player_target().unwrap().pos;
        keyboard.press(Button::Right);
        for _ in 0..10 {
            game.frame();
        }
        assert!(game.state().player_target().unwrap().pos.x > start.x);
    }

    #[test]
    fn test_game_over_stops_and_resets() {
        let mut game = game_with(one_room());
        game.run();

        let player = game.state().player_target().unwrap();
        game.state_mut().add(Entity::enemy(player.pos, 10.0, Color::Green, 5.0, 60));
        game.frame();

        assert!(game.state().is_over());
        assert!(!game.is_running());
        assert!(!game.scheduler().is_running());
        assert_eq!(game.scheduler().pending_reset(), Some(Duration::from_millis(1000)));

        // Stopped immediately: further ticks are ignored
        let frames = game.state().frames;
        game.frame();
        assert_eq!(game.state().frames, frames);

        assert!(game.scheduler_mut().take_reset().is_some());
        game.reset();
        assert!(game.is_running());
        assert_eq!(game.state().phase, GamePhase::Active);
        assert_eq!(game.state().frames, 0);
        assert!(game.state().player_target().is_some());
    }

    #[test]
    fn test_campaign_end_triggers_reset() {
        let mut settings = one_room();
        settings.room_advance_ticks = 3;
        let mut game = game_with(settings);
        game.run();

        let enemy = game.state().entities.iter().find(|e| e.is_enemy()).unwrap().id;
        game.state_mut().kill(enemy);
        for _ in 0..3 {
            game.frame();
        }
        assert!(game.state().is_over());
        assert!(game.scheduler().pending_reset().is_some());
    }

    #[test]
    fn test_offscreen_player_gets_marker() {
        let mut settings = Settings::default();
        settings.player_start = crate::sim::Position::new(-100.0, 250.0);
        let mut game = game_with(settings);
        game.run();
        game.frame();

        assert!(game
            .surface()
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { color: Color::Red, .. })));
    }

    #[test]
    fn test_shutdown_unsubscribes() {
        let mut game = game_with(Settings::default());
        let keyboard = game.input().clone();
        game.run();
        assert!(keyboard.is_subscribed());

        game.shutdown();
        assert!(!keyboard.is_subscribed());
        assert!(!game.scheduler().is_running());
        assert!(!keyboard.press(Button::Up));
    }

    #[test]
    fn test_shutdown_during_reset_delay_stays_down() {
        let mut game = game_with(one_room());
        let keyboard = game.input().clone();
        game.run();

        let player = game.state().player_target().unwrap();
        game.state_mut().add(Entity::enemy(player.pos, 10.0, Color::Green, 5.0, 60));
        game.frame();
        assert!(game.scheduler().pending_reset().is_some());

        game.shutdown();
        assert_eq!(game.scheduler().pending_reset(), None);

        // A reset that slips through anyway must not restart the game
        game.reset();
        assert!(!game.is_running());
        assert!(!game.scheduler().is_running());
        assert!(game.state().is_over());
        assert!(!keyboard.is_subscribed());
    }
}
