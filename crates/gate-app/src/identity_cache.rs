//! Identity cache.
//!
//! The single shared mutable record of the current session. Mutations go
//! through atomic transition methods and are published on a watch channel,
//! so a subscriber observes every change as soon as the call returns.

use std::sync::atomic::{AtomicBool, Ordering};

use gate_core::{AccessToken, Identity, SessionEpoch, SessionSnapshot};
use tokio::sync::watch;
use tracing::{debug, info};

/// Captured at the start of credential restoration.
///
/// A restoration result is applied only while the ticket's epoch is still
/// the cache's epoch; any `reset()` in between invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestorationTicket {
    epoch: SessionEpoch,
}

impl RestorationTicket {
    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }
}

pub struct IdentityCache {
    state: watch::Sender<SessionSnapshot>,
    /// Set once loading has been cleared since the last reset.
    settled: AtomicBool,
}

impl IdentityCache {
    /// Cold-start cache: no identity, loading.
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionSnapshot::loading());
        Self {
            state,
            settled: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Overwrite identity and token, and end the loading window.
    pub fn set_auth(&self, identity: Identity, token: AccessToken) {
        self.settled.store(true, Ordering::SeqCst);
        let identity_id = identity.id.clone();
        let kind = identity.kind;
        let changed = self.state.send_if_modified(|state| {
            let next_identity = Some(identity);
            let next_token = Some(token);
            if state.identity == next_identity
                && state.access_token == next_token
                && !state.is_loading
            {
                return false;
            }
            state.identity = next_identity;
            state.access_token = next_token;
            state.is_loading = false;
            true
        });
        if changed {
            info!(identity_id = %identity_id, kind = %kind, "session authenticated");
        }
    }

    /// Set the loading flag only.
    ///
    /// Returns whether the flag was applied. Raising the flag again after the
    /// loading window closed is refused until the next `reset()`.
    pub fn set_loading(&self, loading: bool) -> bool {
        if loading && self.settled.load(Ordering::SeqCst) {
            debug!("ignoring set_loading(true) after loading settled");
            return false;
        }
        if !loading {
            self.settled.store(true, Ordering::SeqCst);
        }
        self.state.send_if_modified(|state| {
            if state.is_loading == loading {
                return false;
            }
            state.is_loading = loading;
            true
        });
        debug!(loading, "session loading flag set");
        true
    }

    /// Clear identity and token, end loading, and advance the epoch.
    pub fn reset(&self) {
        self.settled.store(false, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.identity = None;
            state.access_token = None;
            state.is_loading = false;
            state.epoch = state.epoch.next();
        });
        info!(epoch = self.state.borrow().epoch.0, "session reset");
    }

    pub fn begin_restoration(&self) -> RestorationTicket {
        RestorationTicket {
            epoch: self.state.borrow().epoch,
        }
    }

    pub fn is_current(&self, ticket: &RestorationTicket) -> bool {
        self.state.borrow().epoch == ticket.epoch
    }

    /// Apply a restored session unless a reset superseded the ticket.
    pub fn apply_restoration(
        &self,
        ticket: &RestorationTicket,
        identity: Identity,
        token: AccessToken,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket_epoch = ticket.epoch.0,
                "dropping restoration result from a superseded epoch"
            );
            return false;
        }
        self.set_auth(identity, token);
        true
    }

    /// End the loading window for a restoration that found no session.
    pub fn settle_restoration(&self, ticket: &RestorationTicket) {
        if self.is_current(ticket) {
            self.set_loading(false);
        }
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::IdentityKind;

    fn identity(id: &str, kind: IdentityKind) -> Identity {
        Identity::restored(id.into(), kind)
    }

    #[test]
    fn set_auth_ends_loading_and_derives_flags() {
        let cache = IdentityCache::new();
        assert!(cache.snapshot().is_loading);

        cache.set_auth(identity("u1", IdentityKind::Full), AccessToken::new("t"));

        let snapshot = cache.snapshot();
        assert!(!snapshot.is_loading);
        assert!(snapshot.is_authenticated());
        assert!(!snapshot.is_anonymous());
        assert_eq!(snapshot.identity_id().map(|id| id.as_str()), Some("u1"));
    }

    #[test]
    fn set_auth_is_idempotent_for_subscribers() {
        let cache = IdentityCache::new();
        let mut rx = cache.subscribe();

        cache.set_auth(identity("u1", IdentityKind::Anonymous), AccessToken::new("t"));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        cache.set_auth(identity("u1", IdentityKind::Anonymous), AccessToken::new("t"));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn mutation_is_visible_to_subscribers_immediately() {
        let cache = IdentityCache::new();
        let rx = cache.subscribe();

        cache.set_loading(false);

        assert!(!rx.borrow().is_loading);
    }

    #[test]
    fn set_loading_does_not_touch_identity() {
        let cache = IdentityCache::new();
        cache.set_auth(identity("u1", IdentityKind::Full), AccessToken::new("t"));

        cache.set_loading(false);

        assert!(cache.snapshot().has_identity());
    }

    #[test]
    fn loading_cannot_be_raised_again_until_reset() {
        let cache = IdentityCache::new();
        assert!(cache.set_loading(false));

        assert!(!cache.set_loading(true));
        assert!(!cache.snapshot().is_loading);

        cache.reset();
        assert!(cache.set_loading(true));
        assert!(cache.snapshot().is_loading);
    }

    #[test]
    fn reset_clears_identity_and_advances_epoch() {
        let cache = IdentityCache::new();
        cache.set_auth(identity("u1", IdentityKind::Full), AccessToken::new("t"));
        let before = cache.snapshot().epoch;

        cache.reset();

        let snapshot = cache.snapshot();
        assert!(!snapshot.has_identity());
        assert!(snapshot.access_token.is_none());
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.epoch, before.next());
    }

    #[test]
    fn restoration_after_reset_is_dropped() {
        let cache = IdentityCache::new();
        let ticket = cache.begin_restoration();

        cache.reset();

        let applied = cache.apply_restoration(
            &ticket,
            identity("u1", IdentityKind::Anonymous),
            AccessToken::new("t"),
        );
        assert!(!applied);
        assert!(!cache.snapshot().has_identity());
    }

    #[test]
    fn current_restoration_is_applied() {
        let cache = IdentityCache::new();
        let ticket = cache.begin_restoration();

        assert!(cache.apply_restoration(
            &ticket,
            identity("u1", IdentityKind::Anonymous),
            AccessToken::new("t"),
        ));
        assert!(cache.snapshot().is_anonymous());
    }

    #[test]
    fn settle_restoration_only_for_current_ticket() {
        let cache = IdentityCache::new();
        let stale = cache.begin_restoration();
        cache.reset();
        cache.set_loading(true);

        cache.settle_restoration(&stale);
        assert!(cache.snapshot().is_loading);

        let current = cache.begin_restoration();
        cache.settle_restoration(&current);
        assert!(!cache.snapshot().is_loading);
    }
}
