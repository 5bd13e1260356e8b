//! Chat message types
//!
//! Commands and kinds travel as single-byte ordinals. Ordinals outside the
//! known range are kept as `Unknown` so that a peer speaking a newer
//! dialect still decodes; the room simply never dispatches them.

use std::fmt;
use std::str::FromStr;

use super::constants::SERVER_NICKNAME;

/// Chat command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Post,
    Get,
    Help,
    Quit,
    Stop,
    Subscribe,
    Unsubscribe,
    CreateRoom,
    ListRooms,
    /// Ordinal not in the table above
    ///
    /// Only [`Command::from_byte`] produces this with a meaningful value.
    /// A hand-built `Unknown` holding a known ordinal encodes to that
    /// ordinal and decodes as the known command.
    Unknown(u8),
}

impl Command {
    /// Every known command, in ordinal order
    pub const ALL: [Command; 9] = [
        Command::Post,
        Command::Get,
        Command::Help,
        Command::Quit,
        Command::Stop,
        Command::Subscribe,
        Command::Unsubscribe,
        Command::CreateRoom,
        Command::ListRooms,
    ];

    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Command::Post,
            1 => Command::Get,
            2 => Command::Help,
            3 => Command::Quit,
            4 => Command::Stop,
            5 => Command::Subscribe,
            6 => Command::Unsubscribe,
            7 => Command::CreateRoom,
            8 => Command::ListRooms,
            other => Command::Unknown(other),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Command::Post => 0,
            Command::Get => 1,
            Command::Help => 2,
            Command::Quit => 3,
            Command::Stop => 4,
            Command::Subscribe => 5,
            Command::Unsubscribe => 6,
            Command::CreateRoom => 7,
            Command::ListRooms => 8,
            Command::Unknown(byte) => byte,
        }
    }

    /// Protocol name of a known command
    pub fn name(self) -> Option<&'static str> {
        match self {
            Command::Post => Some("POST"),
            Command::Get => Some("GET"),
            Command::Help => Some("HELP"),
            Command::Quit => Some("QUIT"),
            Command::Stop => Some("STOP"),
            Command::Subscribe => Some("SUBSCRIBE"),
            Command::Unsubscribe => Some("UNSUBSCRIBE"),
            Command::CreateRoom => Some("CREATE_ROOM"),
            Command::ListRooms => Some("LIST_ROOMS"),
            Command::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.as_byte()),
        }
    }
}

/// Error returned when a command name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command: {}", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Accepts a command name (any case, underscore optional, `SUB`/`UNSUB`
    /// aliases) or a decimal ordinal. Any ordinal that fits in a byte is
    /// accepted, known or not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u8>() {
            return Ok(Command::from_byte(ordinal));
        }

        let normalized = trimmed.to_ascii_uppercase().replace('_', "");
        let command = match normalized.as_str() {
            "POST" => Command::Post,
            "GET" => Command::Get,
            "HELP" => Command::Help,
            "QUIT" => Command::Quit,
            "STOP" => Command::Stop,
            "SUBSCRIBE" | "SUB" => Command::Subscribe,
            "UNSUBSCRIBE" | "UNSUB" => Command::Unsubscribe,
            "CREATEROOM" => Command::CreateRoom,
            "LISTROOMS" => Command::ListRooms,
            _ => return Err(ParseCommandError(trimmed.to_string())),
        };
        Ok(command)
    }
}

/// Whether a message is client-originated or server-originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Request,
    Response,
    Unknown(u8),
}

impl Kind {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Kind::Request,
            1 => Kind::Response,
            other => Kind::Unknown(other),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Kind::Request => 0,
            Kind::Response => 1,
            Kind::Unknown(byte) => byte,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Request => f.write_str("REQUEST"),
            Kind::Response => f.write_str("RESPONSE"),
            Kind::Unknown(byte) => write!(f, "{}", byte),
        }
    }
}

/// A single chat message
///
/// Immutable once built. Field bounds are checked when the message is
/// encoded, not here, so a message decoded from the wire can always be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    command: Command,
    kind: Kind,
    nickname: String,
    data: String,
}

impl ChatMessage {
    pub fn new(
        command: Command,
        kind: Kind,
        nickname: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            command,
            kind,
            nickname: nickname.into(),
            data: data.into(),
        }
    }

    /// Build a client request
    pub fn request(command: Command, nickname: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(command, Kind::Request, nickname, data)
    }

    /// Build a response signed by the server
    pub fn server_response(command: Command, data: impl Into<String>) -> Self {
        Self::new(command, Kind::Response, SERVER_NICKNAME, data)
    }

    /// Same message, marked as a response
    pub fn into_response(self) -> Self {
        Self {
            kind: Kind::Response,
            ..self
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}][{}] {}: {}",
            self.kind,
            self.command,
            self.data.len(),
            self.nickname,
            self.data
        )
    }
}
