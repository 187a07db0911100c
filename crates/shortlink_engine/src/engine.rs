use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use shortlink_logging::shortlink_debug;

use crate::{EngineEvent, RequestId, ShortenClient};

enum EngineCommand {
    Shorten { request_id: RequestId, url: String },
}

/// Runs shorten requests on a background tokio runtime so the caller's
/// thread never blocks. Completions arrive on the sender given to
/// [`EngineHandle::spawn`]; dropping every handle stops the worker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        client: Arc<dyn ShortenClient>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("shortlink-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, event_tx).await;
                    });
                }
                shortlink_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn shorten(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Shorten {
            request_id,
            url: url.into(),
        });
    }
}

async fn handle_command(
    client: &dyn ShortenClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Shorten { request_id, url } => {
            let result = client.shorten(&url).await;
            let _ = event_tx.send(EngineEvent::ShortenCompleted { request_id, result });
        }
    }
}
