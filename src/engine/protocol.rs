//! Commands of the text protocol. Parsing is infallible: anything that is not
//! recognized becomes [`Command::Unknown`] and is reported by the engine.

#[derive(Debug, PartialEq)]
pub(super) enum Command {
    Identify,
    IsReady,
    SetOption { name: String, value: String },
    NewGame,
    /// `None` is the starting position of the current configuration.
    SetPosition { layout: Option<String> },
    Select(String),
    Deselect,
    To(String),
    Finish,
    Debug,
    Quit,
    Unknown(String),
}

fn parse_setoption(parts: &[&str]) -> Option<Command> {
    match parts {
        [_, "name", name, "value", value] => Some(Command::SetOption {
            name: (*name).to_string(),
            value: (*value).to_string(),
        }),
        _ => None,
    }
}

fn parse_setposition(parts: &[&str]) -> Option<Command> {
    match parts {
        [_, "startpos"] => Some(Command::SetPosition { layout: None }),
        [_, "layout", layout @ ..] if !layout.is_empty() => Some(Command::SetPosition {
            layout: Some(layout.join(" ")),
        }),
        _ => None,
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = match parts.as_slice() {
            ["identify"] => Some(Self::Identify),
            ["isready"] => Some(Self::IsReady),
            ["setoption", ..] => parse_setoption(&parts),
            ["newgame"] => Some(Self::NewGame),
            ["position", ..] => parse_setposition(&parts),
            ["select", position] => Some(Self::Select((*position).to_string())),
            ["deselect"] => Some(Self::Deselect),
            ["to", position] => Some(Self::To((*position).to_string())),
            ["finish"] => Some(Self::Finish),
            ["d"] => Some(Self::Debug),
            ["quit"] => Some(Self::Quit),
            _ => None,
        };
        command.unwrap_or_else(|| Self::Unknown(input.trim().to_string()))
    }
}
