//! Line-oriented chat console
//!
//! Each input line is `COMMAND [text]`. `HELP` and `QUIT` never leave the
//! client; everything else becomes a request to the server. Messages from
//! the server are printed as they arrive.

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, Lines};

use super::chat::ChatClient;
use crate::error::{Error, Result};
use crate::protocol::constants::MAX_NICKNAME_SIZE;
use crate::protocol::message::ParseCommandError;
use crate::protocol::Command;

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Blank line
    Empty,
    /// Print the command list
    Help,
    /// Leave the console
    Quit,
    /// Send a request to the server
    Request { command: Command, data: String },
}

impl ConsoleInput {
    /// Parse `COMMAND [text]`
    ///
    /// Everything after the first run of whitespace is the message text,
    /// kept verbatim apart from trailing whitespace.
    pub fn parse(line: &str) -> std::result::Result<Self, ParseCommandError> {
        let line = line.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return Ok(ConsoleInput::Empty);
        }

        let (word, data) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (trimmed, ""),
        };

        let input = match word.parse::<Command>()? {
            Command::Help => ConsoleInput::Help,
            Command::Quit => ConsoleInput::Quit,
            command => ConsoleInput::Request {
                command,
                data: data.to_string(),
            },
        };
        Ok(input)
    }
}

/// Known commands, one `\tNAME (ordinal)` line each
pub fn command_list() -> String {
    Command::ALL
        .iter()
        .filter_map(|command| {
            command
                .name()
                .map(|name| format!("\t{} ({})", name, command.as_byte()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether `nickname` is usable as a message signature
pub fn is_valid_nickname(nickname: &str) -> bool {
    (1..=MAX_NICKNAME_SIZE).contains(&nickname.len())
        && nickname.bytes().all(|b| b.is_ascii() && b != 0)
}

/// Ask for a nickname until a valid one is entered
///
/// Returns `None` if input ends first.
pub async fn prompt_nickname<R, W>(lines: &mut Lines<R>, output: &mut W) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        output.write_all(b"Nickname: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };

        let nickname = line.trim();
        if is_valid_nickname(nickname) {
            return Ok(Some(nickname.to_string()));
        }

        let notice = format!(
            "Nickname must be 1 to {} ASCII characters\n",
            MAX_NICKNAME_SIZE
        );
        output.write_all(notice.as_bytes()).await?;
    }
}

/// Run the console until `QUIT`, end of input, or the client is closed
pub async fn run_console<R, W>(
    client: &ChatClient,
    lines: &mut Lines<R>,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(client, &line, output).await? {
                    break;
                }
            }
            received = client.recv() => match received {
                Ok(message) => write_line(output, &message.to_string()).await?,
                Err(Error::Transport(e)) if e.is_closed() => break,
                Err(e) => write_line(output, &format!("Warning: {}", e)).await?,
            },
        }
    }

    output.flush().await?;
    Ok(())
}

/// Returns `false` when the console should stop
async fn handle_line<W>(client: &ChatClient, line: &str, output: &mut W) -> Result<bool>
where
    W: AsyncWrite + Unpin,
{
    match ConsoleInput::parse(line) {
        Ok(ConsoleInput::Empty) => {}
        Ok(ConsoleInput::Help) => {
            write_line(output, &format!("Commands:\n{}", command_list())).await?;
        }
        Ok(ConsoleInput::Quit) => return Ok(false),
        Ok(ConsoleInput::Request { command, data }) => {
            let message = client.request(command, data);
            match client.send_message(&message).await {
                Ok(_) => write_line(output, &message.to_string()).await?,
                Err(e) => write_line(output, &format!("Not sent: {}", e)).await?,
            }
        }
        Err(e) => {
            write_line(output, &format!("{}. Type HELP for the command list", e)).await?;
        }
    }
    Ok(true)
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tokio::io::AsyncBufReadExt;
    use tokio::net::UdpSocket;

    use super::*;
    use crate::protocol;

    #[test]
    fn test_parse_request() {
        assert_eq!(
            ConsoleInput::parse("post Hello   world  "),
            Ok(ConsoleInput::Request {
                command: Command::Post,
                data: "Hello   world".to_string(),
            })
        );
        assert_eq!(
            ConsoleInput::parse("  SUB"),
            Ok(ConsoleInput::Request {
                command: Command::Subscribe,
                data: String::new(),
            })
        );
        assert_eq!(
            ConsoleInput::parse("8"),
            Ok(ConsoleInput::Request {
                command: Command::ListRooms,
                data: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_local_commands() {
        assert_eq!(ConsoleInput::parse("help"), Ok(ConsoleInput::Help));
        assert_eq!(ConsoleInput::parse("QUIT now"), Ok(ConsoleInput::Quit));
        assert_eq!(ConsoleInput::parse("   "), Ok(ConsoleInput::Empty));
    }

    #[test]
    fn test_parse_unknown_word() {
        assert_eq!(
            ConsoleInput::parse("shout hi"),
            Err(ParseCommandError("shout".to_string()))
        );
    }

    #[test]
    fn test_command_list() {
        let list = command_list();
        let lines: Vec<&str> = list.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "\tPOST (0)");
        assert_eq!(lines[6], "\tUNSUBSCRIBE (6)");
        assert_eq!(lines[8], "\tLIST_ROOMS (8)");
    }

    #[test]
    fn test_nickname_validation() {
        assert!(is_valid_nickname("bob"));
        assert!(is_valid_nickname(&"n".repeat(30)));
        assert!(!is_valid_nickname(""));
        assert!(!is_valid_nickname(&"n".repeat(31)));
        assert!(!is_valid_nickname("zoé"));
    }

    #[tokio::test]
    async fn test_prompt_nickname_retries() {
        let input: &[u8] = b"\nthis-nickname-is-far-too-long-to-use\n  alice  \n";
        let mut lines = input.lines();
        let mut output = Vec::new();

        let nickname = prompt_nickname(&mut lines, &mut output).await.unwrap();
        assert_eq!(nickname.as_deref(), Some("alice"));

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Nickname: ").count(), 3);
    }

    #[tokio::test]
    async fn test_prompt_nickname_end_of_input() {
        let input: &[u8] = b"";
        let mut lines = input.lines();
        let mut output = Vec::new();

        assert_eq!(prompt_nickname(&mut lines, &mut output).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_console_sends_requests() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr: SocketAddr = server.local_addr().unwrap();
        let client = ChatClient::connect(server_addr, "bob").await.unwrap();

        let input: &[u8] = b"help\nbogus\npost hello there\nsub\nquit\npost never sent\n";
        let mut lines = input.lines();
        let mut output = Vec::new();

        run_console(&client, &mut lines, &mut output).await.unwrap();

        let mut buf = [0u8; 128];
        let (len, _) = server.recv_from(&mut buf).await.unwrap();
        let first = protocol::decode(&buf[..len]).unwrap();
        assert_eq!(first.command(), Command::Post);
        assert_eq!(first.data(), "hello there");

        let (len, _) = server.recv_from(&mut buf).await.unwrap();
        assert_eq!(protocol::decode(&buf[..len]).unwrap().command(), Command::Subscribe);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("\tCREATE_ROOM (7)"));
        assert!(output.contains("Unknown command: bogus"));
        assert!(output.contains("[REQUEST][POST][11] bob: hello there"));
        assert!(!output.contains("never sent"));
    }
}
