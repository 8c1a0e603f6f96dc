/// Where the game loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Entities advance every frame
    Running,
    /// Score frozen, waiting for restart or quit
    GameOver,
    /// Loop exits and the terminal is released
    Terminated,
}
