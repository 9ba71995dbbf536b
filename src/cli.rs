//! Operator console for a running mock realm

use std::str::FromStr;
use std::sync::Arc;

use realm_auth::MockSecurityRealm;
use realm_interfaces::SecurityRealm;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// A single console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Login { username: String, credential: String },
    User(String),
    Group { name: String, members: bool },
    Outage(OutageAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutageAction {
    On,
    Off,
    Status,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["help"] => Ok(Command::Help),
            ["exit"] | ["quit"] => Ok(Command::Exit),
            ["login", username, credential] => Ok(Command::Login {
                username: username.to_string(),
                credential: credential.to_string(),
            }),
            ["login", ..] => Err("Usage: login <username> <credential>".to_string()),
            ["user", name] => Ok(Command::User(name.to_string())),
            ["user", ..] => Err("Usage: user <name>".to_string()),
            ["group", name] => Ok(Command::Group {
                name: name.to_string(),
                members: false,
            }),
            ["group", name, "members"] => Ok(Command::Group {
                name: name.to_string(),
                members: true,
            }),
            ["group", ..] => Err("Usage: group <name> [members]".to_string()),
            ["outage", "on"] => Ok(Command::Outage(OutageAction::On)),
            ["outage", "off"] => Ok(Command::Outage(OutageAction::Off)),
            ["outage"] | ["outage", "status"] => Ok(Command::Outage(OutageAction::Status)),
            ["outage", ..] => Err("Usage: outage on|off|status".to_string()),
            _ => Err("Unknown command. Type 'help' for available commands.".to_string()),
        }
    }
}

/// Console wrapper around a realm
pub struct RealmCli {
    realm: Arc<MockSecurityRealm>,
}

impl RealmCli {
    pub fn new(realm: Arc<MockSecurityRealm>) -> Self {
        Self { realm }
    }

    /// Execute one command and render its outcome. Realm failures are
    /// rendered, not returned.
    pub async fn execute(&self, command: Command) -> String {
        match command {
            Command::Help => HELP.to_string(),
            Command::Exit => "Goodbye!".to_string(),
            Command::Login { username, credential } => match self.realm.authenticate(&username, &credential).await {
                Ok(user) => format!("Authenticated as {}", user.username()),
                Err(e) => format!("Error: {}", e),
            },
            Command::User(name) => match self.realm.load_user_by_username(&name).await {
                Ok(user) => render(&user),
                Err(e) => format!("Error: {}", e),
            },
            Command::Group { name, members } => match self.realm.load_group_by_groupname(&name, members).await {
                Ok(group) => render(&group),
                Err(e) => format!("Error: {}", e),
            },
            Command::Outage(OutageAction::On) => {
                self.realm.set_outage(true);
                "Outage simulation enabled".to_string()
            }
            Command::Outage(OutageAction::Off) => {
                self.realm.set_outage(false);
                "Outage simulation disabled".to_string()
            }
            Command::Outage(OutageAction::Status) => {
                format!("Outage simulation {}", if self.realm.is_outage() { "enabled" } else { "disabled" })
            }
        }
    }

    /// Read commands line by line until `exit` or end of input
    pub async fn run<R, W>(&self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output
            .write_all(format!("Welcome to the {}\nType 'help' for available commands\n", self.realm.display_name()).as_bytes())
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (reply, done) = match line.parse::<Command>() {
                Ok(Command::Exit) => (self.execute(Command::Exit).await, true),
                Ok(command) => (self.execute(command).await, false),
                Err(usage) => (usage, false),
            };
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
            if done {
                break;
            }
        }

        output.flush().await
    }
}

fn render<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

const HELP: &str = "Available commands:
  help                          - Show this help message
  login <username> <credential> - Authenticate a user
  user <name>                   - Show a user and its groups
  group <name> [members]        - Show a group, optionally with its members
  outage on|off|status          - Simulate the identity backend going down
  exit, quit                    - Exit the console";
