use crossterm::event::KeyCode;

use crate::model::horizon::Horizon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    Refresh,
    SelectHorizon(Horizon),
    NextHorizon,
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Tab => Some(UiCommand::NextHorizon),
        KeyCode::F(5) => Some(UiCommand::Refresh),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            'r' => Some(UiCommand::Refresh),
            '1' | 'd' => Some(UiCommand::SelectHorizon(Horizon::D1)),
            '5' | 'w' => Some(UiCommand::SelectHorizon(Horizon::D5)),
            '2' | 'm' => Some(UiCommand::SelectHorizon(Horizon::D20)),
            _ => None,
        },
        _ => None,
    }
}
