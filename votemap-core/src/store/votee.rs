use votemap_entities::votee::{ClaimVotee, NewVotee, Votee};

use super::prelude::*;
use crate::gateways::backend::VoteeGateway;

pub struct VoteeStore {
    gateway: Rc<dyn VoteeGateway>,
    client: QueryClient,
    list: QueryCache<Vec<Votee>>,
    single: QueryCache<Votee>,
    notify: Rc<dyn Notify>,
    votees: Collection<Votee>,
}

impl VoteeStore {
    pub fn new(gateway: Rc<dyn VoteeGateway>, client: &QueryClient, notify: Rc<dyn Notify>) -> Self {
        Self {
            gateway,
            client: client.clone(),
            list: client.cache(),
            single: client.cache(),
            notify,
            votees: Collection::default(),
        }
    }

    /// The votees of the last successful [`fetch_votees`](Self::fetch_votees).
    pub fn votees(&self) -> Vec<Votee> {
        self.votees.get()
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&[Votee]) + 'static,
    {
        self.votees.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.votees.unsubscribe(id);
    }

    pub async fn fetch_votees(&self) -> Result<Vec<Votee>> {
        let gateway = Rc::clone(&self.gateway);
        let result = self
            .list
            .load(QueryKey::Votees, move || async move { gateway.votees().await })
            .await;
        match result {
            Ok(loaded) => Ok(self.votees.replace_loaded(loaded)),
            Err(err) => {
                log::warn!("Unable to load votees: {err}");
                self.notify.error("Failed to load votees.");
                Err(err.into())
            }
        }
    }

    pub async fn fetch_votee(&self, id: &Id) -> Result<Votee> {
        let gateway = Rc::clone(&self.gateway);
        let votee_id = id.clone();
        self.single
            .fetch(QueryKey::Votee(id.clone()), move || async move {
                gateway.votee(&votee_id).await
            })
            .await
            .map_err(|err| {
                log::warn!("Unable to load votee {id}: {err}");
                self.notify.error("Failed to load votees.");
                Error::from(err)
            })
    }

    pub async fn create_votee(&self, votee: &NewVotee) -> Result<Votee> {
        const FAILED: &str = "Failed to create votee.";
        check(&*self.notify, votee, FAILED)?;
        let created = self.gateway.create_votee(votee).await.map_err(|err| {
            log::warn!("Unable to create votee: {err}");
            self.notify.error(FAILED);
            Error::from(err)
        })?;
        log::debug!("Created votee {}", created.id);
        self.client.invalidate(&QueryScope::Votees);
        Ok(created)
    }

    pub async fn claim_votee(&self, claim: &ClaimVotee) -> Result<()> {
        const FAILED: &str = "Failed to claim votee.";
        check(&*self.notify, claim, FAILED)?;
        if let Err(err) = self.gateway.claim_votee(claim).await {
            log::warn!("Unable to claim votee {}: {err}", claim.votee_id);
            self.notify.error(FAILED);
            return Err(err.into());
        }
        self.client.invalidate(&QueryScope::Votees);
        self.notify.success("Votee claimed successfully!");
        Ok(())
    }
}
