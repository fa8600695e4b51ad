use std::io::Write;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::chat::stream_chat;
use crate::core::AppConfig;

pub async fn run(model: Option<String>, config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let model = model.unwrap_or_else(|| config.chat_model.clone());
    let ollama_host = config.ollama_host;

    // Prior exchanges as (user, assistant) pairs so every turn replays
    // the conversation so far
    let mut history: Vec<(String, String)> = Vec::new();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let (tx, mut rx) = mpsc::unbounded_channel();

                let host = ollama_host.clone();
                let model = model.clone();
                let message = line.clone();
                let prior = history.clone();
                let handle = tokio::spawn(async move {
                    stream_chat(tx, &host, &model, &message, &prior, true).await
                });

                // Emissions are cumulative so only print the suffix
                // that hasn't been shown yet
                let mut printed = 0;
                while let Some(partial) = rx.recv().await {
                    print!("{}", &partial[printed..]);
                    std::io::stdout().flush()?;
                    printed = partial.len();
                }
                println!();

                let reply = handle.await??;
                history.push((line, reply));
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
