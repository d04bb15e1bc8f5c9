//! Mount-time loading of the reservation form's option lists.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    error::GatewayError,
    gateway::CourtApi,
    models::{OptionLists, ReservationField},
};

/// Which lookup list a fetch fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionKind {
    /// `GET /court/courts`.
    Courts,
    /// `GET /turn/turns`.
    Turns,
    /// `GET /register/names`.
    Players,
}

impl OptionKind {
    /// The three lists loaded at mount.
    pub const ALL: [Self; 3] = [Self::Courts, Self::Turns, Self::Players];

    /// List backing a reservation field; the date has none.
    pub fn for_field(field: ReservationField) -> Option<Self> {
        match field {
            ReservationField::Court => Some(Self::Courts),
            ReservationField::Player1 | ReservationField::Player2 => Some(Self::Players),
            ReservationField::Turn => Some(Self::Turns),
            ReservationField::PlayDate => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Courts => "courts",
            Self::Turns => "turns",
            Self::Players => "players",
        }
    }

    async fn fetch(self, api: &dyn CourtApi) -> Result<Vec<String>, GatewayError> {
        match self {
            Self::Courts => api.list_courts().await,
            Self::Turns => api.list_turn_slots().await,
            Self::Players => api.list_player_names().await,
        }
    }
}

/// Option lists shared between a form and the tasks that fill them.
#[derive(Debug, Clone, Default)]
pub struct SharedOptions {
    inner: Arc<RwLock<OptionLists>>,
}

impl SharedOptions {
    /// Empty lists; nothing has resolved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of whatever has resolved so far.
    pub fn snapshot(&self) -> OptionLists {
        self.inner.read().clone()
    }

    /// Store one resolved list, leaving the others untouched.
    pub fn store(&self, kind: OptionKind, values: Vec<String>) {
        let mut lists = self.inner.write();
        let slot = match kind {
            OptionKind::Courts => &mut lists.courts,
            OptionKind::Turns => &mut lists.turns,
            OptionKind::Players => &mut lists.players,
        };
        *slot = Some(values);
        lists.failed.retain(|failed| *failed != kind);
    }

    /// Record that a list could not be loaded.
    pub fn mark_failed(&self, kind: OptionKind) {
        let mut lists = self.inner.write();
        if !lists.failed.contains(&kind) {
            lists.failed.push(kind);
        }
    }
}

/// Start the three independent lookups. They resolve in any order.
///
/// A failed lookup is logged, leaves its list empty and is marked failed. The tasks keep
/// their own handle on `options`, so they may safely finish after the
/// form that started them is gone.
pub fn spawn_option_fetches(
    api: Arc<dyn CourtApi>,
    options: &SharedOptions,
) -> Vec<JoinHandle<()>> {
    OptionKind::ALL
        .into_iter()
        .map(|kind| {
            let api = Arc::clone(&api);
            let options = options.clone();
            tokio::spawn(async move {
                match kind.fetch(api.as_ref()).await {
                    Ok(values) => {
                        info!(list = kind.label(), count = values.len(), "Option list loaded");
                        options.store(kind, values);
                    }
                    Err(err) => {
                        warn!(list = kind.label(), %err, "Failed to load option list");
                        options.mark_failed(kind);
                    }
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{FakeCourtApi, Script};
    use tokio::sync::Notify;

    async fn join_all(handles: Vec<JoinHandle<()>>) {
        for handle in handles {
            handle.await.expect("fetch task panicked");
        }
    }

    #[test]
    fn a_later_store_clears_the_failure() {
        let options = SharedOptions::new();
        options.mark_failed(OptionKind::Courts);
        options.mark_failed(OptionKind::Courts);
        assert_eq!(options.snapshot().failed, vec![OptionKind::Courts]);

        options.store(OptionKind::Courts, vec!["1".to_string()]);
        let lists = options.snapshot();
        assert!(lists.failed.is_empty());
        assert!(!lists.is_unavailable(ReservationField::Court));
    }

    #[tokio::test]
    async fn all_lists_arrive() {
        let api: Arc<dyn CourtApi> = Arc::new(FakeCourtApi::new(Script::Accept));
        let options = SharedOptions::new();
        join_all(spawn_option_fetches(api, &options)).await;

        let lists = options.snapshot();
        assert!(lists.is_complete());
        assert_eq!(lists.courts.as_deref(), Some(&["1".to_string(), "2".to_string()][..]));
        assert_eq!(lists.players.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn lists_resolve_in_any_order_with_partial_state_in_between() {
        let courts = Arc::new(Notify::new());
        let turns = Arc::new(Notify::new());
        let players = Arc::new(Notify::new());
        let mut fake = FakeCourtApi::new(Script::Accept);
        fake.courts_gate = Some(Arc::clone(&courts));
        fake.turns_gate = Some(Arc::clone(&turns));
        fake.players_gate = Some(Arc::clone(&players));
        let api: Arc<dyn CourtApi> = Arc::new(fake);

        let options = SharedOptions::new();
        let mut handles = spawn_option_fetches(api, &options);
        assert_eq!(options.snapshot(), OptionLists::default());

        // Release players first, then turns, courts last.
        players.notify_one();
        handles.remove(2).await.expect("players task panicked");
        let partial = options.snapshot();
        assert!(partial.players.is_some());
        assert!(partial.courts.is_none());
        assert!(partial.turns.is_none());

        turns.notify_one();
        handles.remove(1).await.expect("turns task panicked");
        assert!(options.snapshot().turns.is_some());
        assert!(options.snapshot().courts.is_none());

        courts.notify_one();
        join_all(handles).await;
        assert!(options.snapshot().is_complete());
    }

    #[tokio::test]
    async fn failed_lookup_leaves_its_list_empty() {
        let mut fake = FakeCourtApi::new(Script::Accept);
        fake.fail_turns = true;
        let api: Arc<dyn CourtApi> = Arc::new(fake);
        let options = SharedOptions::new();
        join_all(spawn_option_fetches(api, &options)).await;

        let lists = options.snapshot();
        assert!(lists.turns.is_none());
        assert!(lists.courts.is_some());
        assert!(lists.players.is_some());
        assert!(lists.is_unavailable(ReservationField::Turn));
        assert!(!lists.is_unavailable(ReservationField::Court));
        assert!(!lists.is_unavailable(ReservationField::PlayDate));
    }
}
