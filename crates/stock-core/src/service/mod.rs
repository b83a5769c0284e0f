//! # Inventory Service
//!
//! Wires the state store, audit log, change broadcaster, and snapshot
//! store into a single-writer engine.
//!
//! ## Mutation critical section
//!
//! Each accepted mutation runs validate → apply → audit → broadcast →
//! persist as one critical section with respect to other mutations: an
//! async mutex (`write_gate`) serializes the full sequence, while the
//! state `RwLock` write guard is held only for the in-memory
//! validate/apply/audit step. Readers take the state read lock and
//! never wait on the broadcast or the disk flush.
//!
//! A rejected mutation returns before the audit append, so the log, the
//! bus, and the snapshot file stay untouched. A failed snapshot write
//! after the in-memory commit surfaces as `InventoryError::Persistence`;
//! memory and disk may diverge until the next successful save, which is
//! a documented limitation rather than a hidden one.

use crate::domain::audit::{AuditLog, AuditQuery};
use crate::domain::bins::{compute_bins, top_utilized};
use crate::domain::errors::InventoryError;
use crate::domain::search::{search, SearchResults};
use crate::domain::seed::seed_snapshot;
use crate::domain::store::StateStore;
use crate::ports::inbound::InventoryApi;
use crate::ports::outbound::SnapshotStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use stock_bus::{AuditPublisher, BusMessage, EventFilter, InMemoryAuditBus, Subscription};
use stock_types::{
    AuditAction, AuditEntry, AuditKind, EntitySnapshot, Good, Mutation, Share, SnapshotDoc,
    StorageBin,
};
use tracing::{debug, info};

/// The authoritative in-memory document: current collections plus the
/// bounded audit history.
struct CoreState {
    store: StateStore,
    audit: AuditLog,
}

impl CoreState {
    fn snapshot_doc(&self) -> SnapshotDoc {
        SnapshotDoc {
            goods: self.store.goods().to_vec(),
            shares: self.store.shares().to_vec(),
            capacities: self.store.capacities().clone(),
            audit: self.audit.to_vec(),
        }
    }
}

/// Single-writer inventory engine.
pub struct InventoryService {
    state: RwLock<CoreState>,
    /// Serializes whole mutation critical sections, including the
    /// publish and the snapshot flush, without blocking readers.
    write_gate: tokio::sync::Mutex<()>,
    bus: Arc<InMemoryAuditBus>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl InventoryService {
    /// Construct the engine from the persisted snapshot, falling back
    /// to the seed dataset when none can be loaded.
    pub fn load(snapshots: Arc<dyn SnapshotStore>, bus: Arc<InMemoryAuditBus>) -> Self {
        let doc = snapshots.load().unwrap_or_else(|| {
            info!("No usable snapshot, starting from seed dataset");
            seed_snapshot()
        });

        info!(
            goods = doc.goods.len(),
            shares = doc.shares.len(),
            audit = doc.audit.len(),
            "Inventory state loaded"
        );

        Self {
            state: RwLock::new(CoreState {
                store: StateStore::from_parts(doc.goods, doc.shares, doc.capacities),
                audit: AuditLog::from_entries(doc.audit),
            }),
            write_gate: tokio::sync::Mutex::new(()),
            bus,
            snapshots,
        }
    }

    /// Apply a mutation attributed to an actor.
    ///
    /// Same contract as [`InventoryApi::apply`], with the actor stamped
    /// onto the audit entry for the `user` query filter.
    pub async fn apply_as(
        &self,
        mutation: Mutation,
        user: Option<String>,
    ) -> Result<AuditEntry, InventoryError> {
        let _gate = self.write_gate.lock().await;

        let (entry, doc) = {
            let mut state = self.state.write();
            let (kind, action, before, after) = Self::dispatch(&mut state.store, mutation)?;
            let entry = state.audit.append(kind, action, user, before, after);
            (entry, state.snapshot_doc())
        };

        let receivers = self
            .bus
            .publish(BusMessage::Audit {
                entry: entry.clone(),
            })
            .await;
        debug!(
            id = %entry.id,
            kind = ?entry.kind,
            action = ?entry.action,
            receivers,
            "Mutation accepted"
        );

        self.snapshots.save(&doc)?;
        Ok(entry)
    }

    /// Validate and apply one intent against the store, mapping it to
    /// its audit coordinates. No side effects on rejection.
    fn dispatch(
        store: &mut StateStore,
        mutation: Mutation,
    ) -> Result<
        (
            AuditKind,
            AuditAction,
            Option<EntitySnapshot>,
            Option<EntitySnapshot>,
        ),
        InventoryError,
    > {
        match mutation {
            Mutation::CreateGood(input) => {
                let record = store.create_good(input)?;
                Ok((
                    AuditKind::Goods,
                    AuditAction::Create,
                    None,
                    Some(EntitySnapshot::Good(record)),
                ))
            }
            Mutation::UpdateGood { id, patch } => {
                let (before, after) = store.update_good(&id, patch)?;
                Ok((
                    AuditKind::Goods,
                    AuditAction::Update,
                    Some(EntitySnapshot::Good(before)),
                    Some(EntitySnapshot::Good(after)),
                ))
            }
            Mutation::DeleteGood { id } => {
                let removed = store.delete_good(&id)?;
                Ok((
                    AuditKind::Goods,
                    AuditAction::Delete,
                    Some(EntitySnapshot::Good(removed)),
                    None,
                ))
            }
            Mutation::SetCapacity { location, capacity } => {
                let cap = store.set_capacity(&location, capacity)?;
                Ok((
                    AuditKind::Storage,
                    AuditAction::Capacity,
                    None,
                    Some(EntitySnapshot::Capacity(cap)),
                ))
            }
            Mutation::CreateShare(input) => {
                let record = store.create_share(input)?;
                Ok((
                    AuditKind::Share,
                    AuditAction::Create,
                    None,
                    Some(EntitySnapshot::Share(record)),
                ))
            }
            Mutation::DeleteShare { id } => {
                let removed = store.delete_share(&id)?;
                Ok((
                    AuditKind::Share,
                    AuditAction::Delete,
                    Some(EntitySnapshot::Share(removed)),
                    None,
                ))
            }
        }
    }

    /// Register a live observer. The subscription only sees mutations
    /// accepted after this call.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// The broadcaster this service publishes to.
    #[must_use]
    pub fn bus(&self) -> &Arc<InMemoryAuditBus> {
        &self.bus
    }
}

#[async_trait]
impl InventoryApi for InventoryService {
    async fn apply(&self, mutation: Mutation) -> Result<AuditEntry, InventoryError> {
        self.apply_as(mutation, None).await
    }

    fn list_goods(&self) -> Vec<Good> {
        self.state.read().store.goods().to_vec()
    }

    fn list_bins(&self) -> Vec<StorageBin> {
        let state = self.state.read();
        compute_bins(state.store.goods(), state.store.capacities())
    }

    fn top_bins(&self, n: usize) -> Vec<StorageBin> {
        top_utilized(self.list_bins(), n)
    }

    fn list_shares(&self) -> Vec<Share> {
        self.state.read().store.shares().to_vec()
    }

    fn query_audit(&self, query: &AuditQuery, limit: Option<usize>) -> Vec<AuditEntry> {
        self.state.read().audit.query(query, limit)
    }

    fn search(&self, query: &str) -> SearchResults {
        let state = self.state.read();
        let bins = compute_bins(state.store.goods(), state.store.capacities());
        search(state.store.goods(), &bins, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::snapshot::memory::InMemorySnapshotStore;
    use stock_types::{CreateGood, GoodPatch};

    fn service_with(
        doc: Option<SnapshotDoc>,
    ) -> (Arc<InventoryService>, Arc<InMemorySnapshotStore>) {
        let snapshots = Arc::new(match doc {
            Some(doc) => InMemorySnapshotStore::with_doc(doc),
            None => InMemorySnapshotStore::new(),
        });
        let bus = Arc::new(InMemoryAuditBus::new());
        let service = Arc::new(InventoryService::load(snapshots.clone(), bus));
        (service, snapshots)
    }

    fn create_good(id: &str, stock: u64, location: &str) -> Mutation {
        Mutation::CreateGood(CreateGood {
            id: id.to_string(),
            name: format!("{id} name"),
            stock: Some(stock),
            location: Some(location.to_string()),
        })
    }

    #[tokio::test]
    async fn test_missing_snapshot_boots_from_seed() {
        let (service, _) = service_with(None);
        let goods = service.list_goods();
        assert_eq!(goods.len(), 3);
        assert_eq!(goods[0].id, "SKU-AX12");
        assert_eq!(service.list_shares().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_snapshot_wins_over_seed() {
        let (service, _) = service_with(Some(SnapshotDoc::default()));
        assert!(service.list_goods().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_mutation_audits_broadcasts_persists() {
        let (service, snapshots) = service_with(Some(SnapshotDoc::default()));
        let mut sub = service.subscribe(EventFilter::all());

        let entry = service
            .apply(create_good("SKU-1", 10, "A-1"))
            .await
            .expect("create");

        assert_eq!(entry.kind, AuditKind::Goods);
        assert_eq!(entry.action, AuditAction::Create);

        // Broadcast carries the same entry
        let message = sub.try_recv().expect("open").expect("message");
        assert_eq!(message.entry().id, entry.id);

        // Snapshot was rewritten with the new good and the audit entry
        let saved = snapshots.saved().expect("saved");
        assert_eq!(saved.goods.len(), 1);
        assert_eq!(saved.audit.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_mutation_touches_nothing() {
        let (service, snapshots) = service_with(Some(SnapshotDoc::default()));
        service
            .apply(create_good("SKU-1", 10, "A-1"))
            .await
            .expect("create");
        let saves_before = snapshots.save_count();
        let mut sub = service.subscribe(EventFilter::all());

        // Duplicate create
        let err = service
            .apply(create_good("SKU-1", 99, "B-2"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Conflict { .. }));

        // Update of unknown id
        let err = service
            .apply(Mutation::UpdateGood {
                id: "SKU-404".to_string(),
                patch: GoodPatch::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotFound { .. }));

        // Zero audit entries, zero broadcasts, zero saves
        assert_eq!(service.query_audit(&AuditQuery::default(), None).len(), 1);
        assert!(matches!(sub.try_recv(), Ok(None)));
        assert_eq!(snapshots.save_count(), saves_before);
        assert_eq!(service.bus().events_published(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_surfaces_as_persistence_error() {
        let (service, snapshots) = service_with(Some(SnapshotDoc::default()));
        snapshots.set_fail_saves(true);

        let err = service
            .apply(create_good("SKU-1", 10, "A-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Persistence(_)));

        // The in-memory commit already happened; the divergence is
        // reported, not rolled back.
        assert_eq!(service.list_goods().len(), 1);
        assert_eq!(service.query_audit(&AuditQuery::default(), None).len(), 1);
    }

    #[tokio::test]
    async fn test_update_entry_carries_both_snapshots() {
        let (service, _) = service_with(Some(SnapshotDoc::default()));
        service
            .apply(create_good("SKU-1", 64, "B-9"))
            .await
            .expect("create");

        let entry = service
            .apply(Mutation::UpdateGood {
                id: "SKU-1".to_string(),
                patch: GoodPatch {
                    stock: Some(40),
                    ..GoodPatch::default()
                },
            })
            .await
            .expect("update");

        match (&entry.before, &entry.after) {
            (Some(EntitySnapshot::Good(before)), Some(EntitySnapshot::Good(after))) => {
                assert_eq!(before.stock, 64);
                assert_eq!(after.stock, 40);
            }
            other => panic!("unexpected snapshots: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bins_recomputed_after_each_mutation() {
        let (service, _) = service_with(Some(SnapshotDoc::default()));
        service
            .apply(create_good("SKU-1", 64, "B-9"))
            .await
            .expect("create");
        assert_eq!(service.list_bins()[0].used, 64);

        service
            .apply(Mutation::UpdateGood {
                id: "SKU-1".to_string(),
                patch: GoodPatch {
                    stock: Some(40),
                    ..GoodPatch::default()
                },
            })
            .await
            .expect("update");

        // No staleness window: the very next read reflects the update
        assert_eq!(service.list_bins()[0].used, 40);
    }

    #[tokio::test]
    async fn test_search_spans_goods_and_bins() {
        let (service, _) = service_with(None);
        let results = service.search("a-14");
        assert_eq!(results.goods.len(), 1);
        assert_eq!(results.bins.len(), 1);
        assert_eq!(results.goods[0].id, "SKU-AX12");
    }

    #[tokio::test]
    async fn test_apply_as_stamps_actor() {
        let (service, _) = service_with(Some(SnapshotDoc::default()));
        service
            .apply_as(create_good("SKU-1", 1, "A-1"), Some("mira".to_string()))
            .await
            .expect("create");

        let query = AuditQuery {
            user: Some("mira".to_string()),
            ..AuditQuery::default()
        };
        assert_eq!(service.query_audit(&query, None).len(), 1);
    }
}
