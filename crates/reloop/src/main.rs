//! A simple program demonstrates how to use `reloop` as a library.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::pin::pin;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use reloop::{
    Client, Completion, CompletionRequestPayload, DEFAULT_MAX_ITERATIONS,
    Error, Message, tools,
};
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::time::sleep;

const BAR_CHAR: &str = "▎";

/// Chat with an OpenAI-compatible model that can call local tools.
///
/// The endpoint is configured with `OPENAI_BASE_URL`, `OPENAI_API_KEY` and
/// `OPENAI_MODEL`. Without a prompt, an interactive session is started.
#[derive(Parser)]
#[command(name = "reloop", version)]
struct Cli {
    /// System prompt to start the conversation with
    #[arg(short, long)]
    system: Option<String>,

    /// Maximum number of completion requests per answer
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// The prompt to send
    prompt: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = Client::from_env().with_max_iterations(cli.max_iterations);
    debug!("using model {}", client.model());

    let mut initial = Vec::new();
    if let Some(system) = cli.system {
        initial.push(Message::system(system));
    }
    let mut payload = CompletionRequestPayload::new(initial)
        .with_tools(tools::demo_tools());

    if !cli.prompt.is_empty() {
        payload.add_message(Message::user(cli.prompt.join(" ")));
        return if ask(&client, &mut payload).await {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        payload.add_message(Message::user(line));
        // Errors are reported, the session goes on.
        ask(&client, &mut payload).await;
    }
    ExitCode::SUCCESS
}

/// Prints the answer to the newest question, returns `false` on failure.
async fn ask(client: &Client, payload: &mut CompletionRequestPayload) -> bool {
    match run_with_spinner(client, payload).await {
        Ok(completion) => {
            if let Some(usage) = completion.usage {
                debug!(
                    "{} iteration(s), {} token(s)",
                    completion.iterations, usage.total_tokens
                );
            }
            println!(
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                completion.message.content.bright_white()
            );
            true
        }
        Err(err) => {
            eprintln!("{}{}", BAR_CHAR.bright_red(), err.bright_red());
            false
        }
    }
}

async fn run_with_spinner(
    client: &Client,
    payload: &mut CompletionRequestPayload,
) -> Result<Completion, Error> {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style);
    progress_bar.set_message("🤔 Thinking...");

    let mut run = pin!(client.run(payload));
    loop {
        select! {
            result = &mut run => {
                // Finish the progress bar before printing anything else.
                progress_bar.finish_and_clear();
                return result;
            }
            _ = sleep(Duration::from_millis(100)) => {
                progress_bar.inc(1);
            }
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
