use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use pokespeare_core::{update, Action, AppState, AppViewModel, Effect, ErrorKind};
use pokespeare_engine::{EngineEvent, EngineHandle, Orchestrator, TransportError};

use crate::persistence::{load_favorites, save_favorites, FileStorage, Storage};
use crate::AppConfig;

const ENGINE_STOPPED: &str = "lookup engine stopped";

/// Owns the application state and applies actions one at a time.
///
/// Lookups run on the engine; their completions only reach the state through
/// [`Store::pump`] or [`Store::wait_for_result`], which dispatch them as
/// `Action::ResultReceived`.
pub struct Store {
    state: AppState,
    storage: Arc<dyn Storage>,
    engine: EngineHandle,
}

impl Store {
    /// Hydrates favorites from `storage` and starts the lookup engine.
    pub fn new(storage: Arc<dyn Storage>, orchestrator: Orchestrator) -> Self {
        let favorites = load_favorites(storage.as_ref());
        Self {
            state: AppState::with_favorites(favorites),
            storage,
            engine: EngineHandle::new(orchestrator),
        }
    }

    /// Production wiring: logger, file storage under `storage_dir`, live HTTP clients.
    pub fn start(config: &AppConfig) -> Result<Self, TransportError> {
        engine_logging::initialize(&config.log_destination, config.log_level);
        let orchestrator = Orchestrator::live(&config.client)?;
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        engine_info!("Store starting with storage at {:?}", config.storage_dir);
        Ok(Self::new(storage, orchestrator))
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, action);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    /// Dispatches every completion that is already available. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Waits up to `timeout` for the next completion and dispatches it.
    pub fn wait_for_result(&mut self, timeout: Duration) -> bool {
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    fn apply_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Composed { request_id, result } => {
                self.dispatch(Action::ResultReceived { request_id, result });
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Compose { request_id, name } => {
                engine_debug!("Compose request_id={} name={}", request_id, name);
                if !self.engine.compose(request_id, name) {
                    self.dispatch(Action::ResultReceived {
                        request_id,
                        result: Err(ErrorKind::Network(ENGINE_STOPPED.to_string())),
                    });
                }
            }
            Effect::Persist { favorites } => {
                save_favorites(self.storage.as_ref(), &favorites);
            }
        }
    }
}
