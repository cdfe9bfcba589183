//! Line-oriented form: free text is an alert message, `:`-prefixed lines
//! edit the endpoint or run the other panels. Every failure is reported and
//! the loop keeps going until `:quit` or end of input.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::AlertClient;
use crate::commands::{generate, health, print_examples};
use crate::config::Session;
use crate::error::{AlertgenError, Result};
use crate::output;

const HELP: &str = "\
Type an alert description and press Enter to generate a configuration.
End a line with \\ to continue the message on the next line.

  :host <url>    set the API host
  :path <path>   set the API path
  :url           show the full API URL
  :test          test the connection to the API host
  :examples      show example messages
  :help          show this help
  :quit          exit";

#[derive(Debug, PartialEq, Eq)]
pub enum FormInput {
    Message(String),
    Continue,
    SetHost(String),
    SetPath(String),
    ShowUrl,
    TestConnection,
    Examples,
    Help,
    Quit,
    Unknown(String),
}

/// Turns input lines into form actions, joining continuation lines.
#[derive(Debug, Default)]
pub struct FormParser {
    pending: Vec<String>,
}

impl FormParser {
    pub fn is_continuing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn feed(&mut self, line: &str) -> FormInput {
        if let Some(part) = line.strip_suffix('\\') {
            self.pending.push(part.to_string());
            return FormInput::Continue;
        }
        if self.pending.is_empty() {
            if let Some(command) = line.trim_start().strip_prefix(':') {
                return parse_command(command);
            }
        }
        self.pending.push(line.to_string());
        FormInput::Message(std::mem::take(&mut self.pending).join("\n"))
    }

    /// Whatever was left hanging on a trailing `\` when input ran out.
    pub fn finish(&mut self) -> Option<String> {
        self.is_continuing()
            .then(|| std::mem::take(&mut self.pending).join("\n"))
    }
}

fn parse_command(command: &str) -> FormInput {
    let (name, arg) = match command.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };
    match name {
        "host" => FormInput::SetHost(arg.to_string()),
        "path" => FormInput::SetPath(arg.to_string()),
        "url" => FormInput::ShowUrl,
        "test" => FormInput::TestConnection,
        "examples" => FormInput::Examples,
        "help" | "h" | "?" => FormInput::Help,
        "quit" | "q" | "exit" => FormInput::Quit,
        other => FormInput::Unknown(other.to_string()),
    }
}

fn prompt(continuing: bool) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", if continuing { "... " } else { "> " })?;
    stdout.flush()?;
    Ok(())
}

fn show_url(session: &mut Session) {
    println!("Full API URL: {}", session.resolve_url());
    if let Some(last) = session.last_url() {
        println!("Last used:    {last}");
    }
}

async fn submit(
    message: &str,
    url_override: Option<&str>,
    client: &AlertClient,
    session: &mut Session,
    output_format: &str,
) {
    match generate::run(message, url_override, client, session, output_format).await {
        Ok(()) => {}
        Err(e @ (AlertgenError::EmptyInput | AlertgenError::NotSuccess { .. })) => {
            output::print_warning(&e.to_string());
        }
        Err(e) => output::print_error(&e.to_string()),
    }
}

pub async fn run<R>(
    reader: R,
    client: &AlertClient,
    session: &mut Session,
    url_override: Option<&str>,
    output_format: &str,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    output::print_heading("Alert Configuration Generator");
    println!("Convert natural language into alert configurations");
    show_url(session);
    println!("Type :help for commands.");

    let mut parser = FormParser::default();
    let mut lines = reader.lines();
    prompt(false)?;

    while let Some(line) = lines.next_line().await? {
        match parser.feed(&line) {
            FormInput::Message(message) => {
                submit(&message, url_override, client, session, output_format).await;
            }
            FormInput::Continue => {}
            FormInput::SetHost(host) => {
                session.set_host(host);
                show_url(session);
            }
            FormInput::SetPath(path) => {
                session.set_path(path);
                show_url(session);
            }
            FormInput::ShowUrl => show_url(session),
            FormInput::TestConnection => {
                health::run(client, session).await;
            }
            FormInput::Examples => print_examples(),
            FormInput::Help => println!("{HELP}"),
            FormInput::Quit => break,
            FormInput::Unknown(name) => {
                output::print_warning(&format!("Unknown command ':{name}'. Type :help for commands."));
            }
        }
        prompt(parser.is_continuing())?;
    }
    println!();
    if let Some(message) = parser.finish() {
        submit(&message, url_override, client, session, output_format).await;
    }
    Ok(())
}
