use railbook_catalog::FareTable;
use railbook_core::TrainRepository;
use railbook_order::{OrderRepository, OrderSubmitter, PassengerRegistry, TicketComposer};
use railbook_store::{Config, InMemoryOrderStore, InMemoryTrainRepository, StoreError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// One in-progress order: the ticket composer plus its own submitter, so a
/// double submit of the same draft is rejected while other drafts proceed.
pub struct Draft {
    pub composer: Mutex<TicketComposer>,
    pub submitter: OrderSubmitter,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fares: FareTable,
    pub train_repo: Arc<dyn TrainRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub passengers: Arc<RwLock<PassengerRegistry>>,
    pub drafts: Arc<RwLock<HashMap<Uuid, Arc<Draft>>>>,
}

impl AppState {
    /// In-memory state, seeded with the development timetable and demo
    /// passengers when `seed.enabled` is set.
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let fares = config.fares.to_fare_table()?;
        let (trains, passengers) = if config.seed.enabled {
            (
                InMemoryTrainRepository::seeded(fares.clone()),
                PassengerRegistry::with_demo_passengers(),
            )
        } else {
            (InMemoryTrainRepository::new(Vec::new(), fares.clone()), PassengerRegistry::new())
        };

        Ok(Self::with_repositories(
            config,
            fares,
            Arc::new(trains),
            Arc::new(InMemoryOrderStore::new()),
            passengers,
        ))
    }

    pub fn with_repositories(
        config: Config,
        fares: FareTable,
        train_repo: Arc<dyn TrainRepository>,
        order_repo: Arc<dyn OrderRepository>,
        passengers: PassengerRegistry,
    ) -> Self {
        Self {
            config: Arc::new(config),
            fares,
            train_repo,
            order_repo,
            passengers: Arc::new(RwLock::new(passengers)),
            drafts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn new_draft(&self, composer: TicketComposer) -> Draft {
        Draft {
            composer: Mutex::new(composer),
            submitter: OrderSubmitter::with_timeout(self.order_repo.clone(), self.config.submission.timeout()),
        }
    }
}
