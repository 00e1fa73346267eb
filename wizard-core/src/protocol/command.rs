#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Config,
    Translate,
    Judge,
    Select,
    Reset,
    State,
    ProxyResolve,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "config" => Command::Config,
            "translate" => Command::Translate,
            "judge" => Command::Judge,
            "select" | "select_translation" => Command::Select,
            "reset" => Command::Reset,
            "state" => Command::State,
            "proxy.resolve" => Command::ProxyResolve,
            _ => Command::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_unknown_names() {
        assert_eq!(Command::from("translate"), Command::Translate);
        assert_eq!(Command::from("select_translation"), Command::Select);
        assert_eq!(Command::from("proxy.resolve"), Command::ProxyResolve);
        assert_eq!(Command::from("project.open"), Command::Unknown);
    }
}
