use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::NavigationError;
use crate::navigation::RouteGroup;

/// Host router as seen by the navigation gate.
///
/// The gate only ever calls [`RouterPort::replace`]; redirects never grow
/// the navigation history.
#[async_trait]
pub trait RouterPort: Send + Sync {
    fn current_path(&self) -> String;

    fn current_group(&self) -> RouteGroup {
        RouteGroup::from_path(&self.current_path())
    }

    /// Replace the current history entry with `path`.
    async fn replace(&self, path: &str) -> Result<(), NavigationError>;

    /// Receiver that observes every location change.
    fn subscribe(&self) -> watch::Receiver<String>;
}
