//! Player commands and the keyboard / button names that produce them.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateClockwise,
    RotateCounterClockwise,
}

impl Command {
    /// On-screen buttons, bound to both touch and click.
    pub const BUTTONS: [(&'static str, Command); 5] = [
        ("left", Command::MoveLeft),
        ("right", Command::MoveRight),
        ("down", Command::SoftDrop),
        ("rotateL", Command::RotateCounterClockwise),
        ("rotateR", Command::RotateClockwise),
    ];

    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Command::MoveLeft),
            "ArrowRight" => Some(Command::MoveRight),
            "ArrowDown" => Some(Command::SoftDrop),
            "q" => Some(Command::RotateCounterClockwise),
            "w" => Some(Command::RotateClockwise),
            _ => None,
        }
    }

    pub fn from_button_id(id: &str) -> Option<Self> {
        Self::BUTTONS.iter().find(|(bid, _)| *bid == id).map(|(_, cmd)| *cmd)
    }
}
