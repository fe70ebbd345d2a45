use chatkit::chat::StreamEvent;
use chatkit::cli::{parse_args, usage, CliCommand, VERSION};
use chatkit::{logging, ApiClient, ApiError};

use color_eyre::eyre::Report;
use color_eyre::{Result, Section};
use futures::StreamExt;
use std::io::Write;

/// Attach the category's recovery hint to a client error.
fn report(err: ApiError) -> Report {
    let hint = err.category().recovery_hint();
    Report::new(err).suggestion(hint)
}

/// Print streamed fragments as they arrive.
async fn run_stream(client: &ApiClient, prompt: &str) -> Result<()> {
    let mut stream = client
        .send_stream_message(prompt)
        .await
        .map_err(report)?;
    let mut stdout = std::io::stdout();

    while let Some(event) = stream.next().await {
        match event {
            StreamEvent::Partial(fragment) => {
                print!("{}", fragment);
                stdout.flush()?;
            }
            StreamEvent::DecodeError(err) => {
                tracing::warn!("Skipped a malformed frame: {}", err);
            }
            StreamEvent::Completed(_) => {
                println!();
                break;
            }
            StreamEvent::Failed(err) => {
                println!();
                return Err(report(err));
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    match command {
        CliCommand::Version => {
            println!("chatkit {}", VERSION);
            return Ok(());
        }
        CliCommand::Usage => {
            eprintln!("{}", usage());
            std::process::exit(2);
        }
        _ => {}
    }

    color_eyre::install()?;
    logging::init();

    let client = ApiClient::from_env()
        .map_err(|e| report(e).wrap_err("Failed to configure client"))?;

    match command {
        CliCommand::Send(prompt) => {
            let answer = client.send_message(&prompt).await.map_err(report)?;
            println!("{}", answer);
        }
        CliCommand::Stream(prompt) => run_stream(&client, &prompt).await?,
        CliCommand::Image(prompt) => match client
            .generate_image(&prompt, "en")
            .await
            .map_err(report)?
        {
            Some(url) => println!("{}", url),
            None => eprintln!("No image was produced"),
        },
        CliCommand::Version | CliCommand::Usage => {}
    }

    Ok(())
}
