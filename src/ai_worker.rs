use crate::ai::client::{CompletionClient, ModelConfig};
use crate::ai::generator::generate_questions;
use crate::input::normalize_source;
use crate::logger;
use crate::models::{GenRequest, GenResponse};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Runs the whole generation pipeline off the UI thread: normalization
/// (including the URL fetch), prompt build, completion call, and
/// validation. One request at a time; the UI keeps its own in-flight
/// flag and never sends a second request while one is outstanding.
pub fn spawn_gen_worker(
    tx: Sender<GenResponse>,
    rx: Receiver<GenRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("mcq-generator::gen_worker".to_string())
        .spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            let http = reqwest::Client::new();

            loop {
                match rx.recv() {
                    Ok(GenRequest::Generate { source, settings }) => {
                        logger::log(&format!("Worker received request for {}", source.label()));

                        let client = match CompletionClient::new(ModelConfig::default()) {
                            Ok(client) => client,
                            Err(e) => {
                                let _ = tx.send(GenResponse::Error(e));
                                continue;
                            }
                        };

                        let result = rt.block_on(async {
                            let text = normalize_source(&http, &source).await?;
                            generate_questions(&client, &text, &settings).await
                        });

                        match result {
                            Ok(questions) => {
                                logger::log(&format!(
                                    "Worker produced {} questions",
                                    questions.len()
                                ));
                                let _ = tx.send(GenResponse::Questions(questions));
                            }
                            Err(e) => {
                                logger::log(&format!("Worker error: {}", e));
                                let _ = tx.send(GenResponse::Error(e));
                            }
                        }
                    }
                    Err(_) => {
                        // Channel disconnected, exit worker
                        logger::log("Worker channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn generation worker thread")
}
