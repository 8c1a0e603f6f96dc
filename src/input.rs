use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// How long the first press counts as held when the terminal never reports
/// releases. Covers the delay before keyboard auto-repeat kicks in.
const FIRST_PRESS_LATCH: Duration = Duration::from_millis(550);
/// Once auto-repeat is running, each repeat only has to bridge the repeat interval
const REPEAT_LATCH: Duration = Duration::from_millis(120);

/// Represents discrete game actions triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Fire,
    Restart,
    /// Esc: leaves the game over screen
    Escape,
    /// Q or Ctrl+C: closes the game from anywhere
    Quit,
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// A movement key that went down at `first` and was last seen at `last`
#[derive(Debug, Clone, Copy)]
struct Hold {
    first: Instant,
    last: Instant,
}

/// Each movement key is tracked on its own, cleared on release
#[derive(Debug, Default)]
struct KeyState {
    left: Option<Hold>,
    right: Option<Hold>,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    reports_release: bool,
    resized: bool,
}

impl InputManager {
    /// `reports_release` tells whether the terminal sends key release events
    /// (keyboard enhancement enabled)
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
            resized: false,
        }
    }

    /// Drains every pending event without blocking
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();
        self.resized = false;

        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, Instant::now());
        }

        Ok(())
    }

    /// Blocks until at least one event arrives, then drains the rest
    pub fn wait_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();
        self.resized = false;

        let event = event::read()?;
        self.handle_event(event, Instant::now());
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, Instant::now());
        }

        Ok(())
    }

    /// Actions collected by the last poll or wait, in arrival order
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Whether the terminal was resized since the last poll or wait
    pub fn resized(&self) -> bool {
        self.resized
    }

    pub fn held(&self) -> HeldKeys {
        self.held_at(Instant::now())
    }

    fn held_at(&self, now: Instant) -> HeldKeys {
        HeldKeys {
            left: self.is_held(self.key_state.left, now),
            right: self.is_held(self.key_state.right, now),
        }
    }

    fn is_held(&self, hold: Option<Hold>, now: Instant) -> bool {
        match hold {
            Some(_) if self.reports_release => true,
            Some(hold) => {
                let latch = if hold.last == hold.first {
                    FIRST_PRESS_LATCH
                } else {
                    REPEAT_LATCH
                };
                now.saturating_duration_since(hold.last) < latch
            }
            None => false,
        }
    }

    /// Starts a hold, or extends it when the key is still down (auto-repeat)
    fn refresh(&self, hold: Option<Hold>, now: Instant) -> Option<Hold> {
        match hold {
            Some(hold) if self.is_held(Some(hold), now) => Some(Hold { last: now, ..hold }),
            _ => Some(Hold {
                first: now,
                last: now,
            }),
        }
    }

    /// Forgets held keys, e.g. after a restart
    pub fn clear(&mut self) {
        self.key_state = KeyState::default();
        self.oneshot_actions.clear();
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, now),
            Event::Resize(_, _) => {
                self.resized = true;
            }
            _ => {}
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event);
                self.handle_key_hold(key_event.code, now);
            }
            KeyEventKind::Repeat => {
                self.handle_key_hold(key_event.code, now);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        let action = match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputAction::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputAction::Quit),
            KeyCode::Esc => Some(InputAction::Escape),
            KeyCode::Char(' ') => Some(InputAction::Fire),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Restart),
            _ => None,
        };

        if let Some(action) = action {
            self.oneshot_actions.push(action);
        }
    }

    fn handle_key_hold(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = self.refresh(self.key_state.left, now);
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = self.refresh(self.key_state.right, now);
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = None;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_press_maps_to_actions() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        input.handle_event(key(KeyCode::Char('r'), KeyEventKind::Press), now);
        input.handle_event(key(KeyCode::Esc, KeyEventKind::Press), now);
        input.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press), now);
        assert_eq!(
            input.actions(),
            &[
                InputAction::Fire,
                InputAction::Restart,
                InputAction::Escape,
                InputAction::Quit
            ]
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut input = InputManager::new(true);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        input.handle_event(event, Instant::now());
        assert_eq!(input.actions(), &[InputAction::Quit]);
    }

    #[test]
    fn test_fire_does_not_repeat() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Char(' '), KeyEventKind::Repeat), Instant::now());
        assert!(input.actions().is_empty());
    }

    #[test]
    fn test_held_until_release() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), now);
        assert!(input.held_at(now + Duration::from_secs(5)).left);

        input.handle_event(key(KeyCode::Left, KeyEventKind::Release), now);
        assert!(!input.held_at(now).left);
    }

    #[test]
    fn test_keys_are_held_independently() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), now);
        input.handle_event(key(KeyCode::Right, KeyEventKind::Press), now);
        assert_eq!(
            input.held_at(now),
            HeldKeys {
                left: true,
                right: true
            }
        );

        input.handle_event(key(KeyCode::Right, KeyEventKind::Release), now);
        assert_eq!(
            input.held_at(now),
            HeldKeys {
                left: true,
                right: false
            }
        );
    }

    #[test]
    fn test_first_press_latches_until_auto_repeat() {
        let mut input = InputManager::new(false);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Char('d'), KeyEventKind::Press), now);
        // Typical repeat delays are 250-500 ms
        assert!(input.held_at(now + Duration::from_millis(400)).right);
        assert!(!input.held_at(now + FIRST_PRESS_LATCH).right);
    }

    #[test]
    fn test_repeats_use_short_latch() {
        let mut input = InputManager::new(false);
        let start = Instant::now();
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), start);

        // Without enhancement, auto-repeat arrives as further presses
        let repeat = start + Duration::from_millis(400);
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), repeat);
        assert!(input.held_at(repeat + Duration::from_millis(50)).left);
        assert!(!input.held_at(repeat + REPEAT_LATCH).left);
    }

    #[test]
    fn test_new_press_after_latch_expires_starts_over() {
        let mut input = InputManager::new(false);
        let start = Instant::now();
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), start);
        let repeat = start + Duration::from_millis(400);
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), repeat);

        // Released, then tapped again a second later: full first-press latch again
        let tap = start + Duration::from_secs(2);
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), tap);
        assert!(input.held_at(tap + Duration::from_millis(400)).left);
    }

    #[test]
    fn test_resize_is_reported() {
        let mut input = InputManager::new(true);
        input.handle_event(Event::Resize(80, 24), Instant::now());
        assert!(input.resized());
        assert!(input.actions().is_empty());
    }

    #[test]
    fn test_clear_forgets_keys() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Left, KeyEventKind::Press), now);
        input.clear();
        assert_eq!(input.held_at(now), HeldKeys::default());
    }
}
