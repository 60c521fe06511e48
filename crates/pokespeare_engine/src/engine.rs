use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use pokespeare_core::RequestId;

use crate::{EngineEvent, Orchestrator};

enum EngineCommand {
    Compose { request_id: RequestId, name: String },
}

/// Runs lookups on a background tokio runtime and reports completions as events.
///
/// Commands are accepted in order; completions arrive in whatever order the
/// lookups finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(orchestrator: Orchestrator) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let orchestrator = orchestrator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&orchestrator, command, event_tx).await;
                });
            }
            engine_debug!("Engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues a lookup. Returns `false` if the engine thread is gone and no
    /// completion will ever arrive for `request_id`.
    pub fn compose(&self, request_id: RequestId, name: impl Into<String>) -> bool {
        let command = EngineCommand::Compose {
            request_id,
            name: name.into(),
        };
        match self.cmd_tx.send(command) {
            Ok(()) => true,
            Err(_) => {
                engine_error!("Engine stopped, dropping compose request_id={}", request_id);
                false
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    orchestrator: &Orchestrator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Compose { request_id, name } => {
            let result = orchestrator.compose(&name).await;
            if event_tx
                .send(EngineEvent::Composed { request_id, result })
                .is_err()
            {
                engine_error!("Engine handle dropped, losing result of request_id={}", request_id);
            }
        }
    }
}
