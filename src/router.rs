//! Headless router
//!
//! In-memory location plus history stack for hosts without a UI navigator.
//! The gate only ever replaces the top entry; `push` exists so a host (or a
//! test) can simulate the user navigating.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use gate_core::ports::RouterPort;
use gate_core::NavigationError;
use tokio::sync::watch;
use tracing::debug;

pub struct HeadlessRouter {
    location: watch::Sender<String>,
    history: Mutex<Vec<String>>,
}

impl HeadlessRouter {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let initial_path = initial_path.into();
        let (location, _) = watch::channel(initial_path.clone());
        Self {
            location,
            history: Mutex::new(vec![initial_path]),
        }
    }

    /// Navigate forward, growing the history.
    pub fn push(&self, path: &str) -> Result<(), NavigationError> {
        validate(path)?;
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
        self.location.send_replace(path.to_string());
        debug!(path, "router push");
        Ok(())
    }

    /// Snapshot of the history stack, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn validate(path: &str) -> Result<(), NavigationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(NavigationError::Rejected {
            path: path.to_string(),
            reason: "path must be absolute".to_string(),
        })
    }
}

#[async_trait]
impl RouterPort for HeadlessRouter {
    fn current_path(&self) -> String {
        self.location.borrow().clone()
    }

    async fn replace(&self, path: &str) -> Result<(), NavigationError> {
        validate(path)?;
        {
            let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
            match history.last_mut() {
                Some(top) => *top = path.to_string(),
                None => history.push(path.to_string()),
            }
        }
        self.location.send_replace(path.to_string());
        debug!(path, "router replace");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }
}
