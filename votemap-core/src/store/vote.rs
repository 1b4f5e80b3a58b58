use std::cell::Cell;

use votemap_entities::vote::{NewVote, NewVoteSupport, RadiusQuery, Vote};

use super::prelude::*;
use crate::gateways::backend::VoteGateway;

pub struct VoteStore {
    gateway: Rc<dyn VoteGateway>,
    client: QueryClient,
    cache: QueryCache<Vec<Vote>>,
    notify: Rc<dyn Notify>,
    votes: Collection<Vote>,
    // The radius query whose votes are shown.
    active: Cell<Option<RadiusQuery>>,
}

impl VoteStore {
    pub fn new(gateway: Rc<dyn VoteGateway>, client: &QueryClient, notify: Rc<dyn Notify>) -> Self {
        Self {
            gateway,
            client: client.clone(),
            cache: client.cache(),
            notify,
            votes: Collection::default(),
            active: Cell::new(None),
        }
    }

    /// The votes of the last successful radius query.
    pub fn votes(&self) -> Vec<Vote> {
        self.votes.get()
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&[Vote]) + 'static,
    {
        self.votes.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.votes.unsubscribe(id);
    }

    /// The radius query of the last [`fetch_votes`](Self::fetch_votes).
    pub fn active_query(&self) -> Option<RadiusQuery> {
        self.active.get()
    }

    pub async fn fetch_votes(&self, query: RadiusQuery) -> Result<Vec<Vote>> {
        self.active.set(Some(query));
        let gateway = Rc::clone(&self.gateway);
        let result = self
            .cache
            .load(QueryKey::votes(&query), move || async move {
                gateway.votes(&query).await
            })
            .await;
        match result {
            Ok(loaded) => {
                log::debug!("Loaded {} votes within {} km", loaded.value.len(), query.radius);
                if self.active.get() != Some(query) {
                    log::debug!("Keep the votes of the newer query");
                    return Ok(loaded.value);
                }
                Ok(self.votes.replace_loaded(loaded))
            }
            Err(err) => {
                log::warn!("Unable to load votes: {err}");
                self.notify.error("Failed to load votes.");
                Err(err.into())
            }
        }
    }

    pub async fn create_vote(&self, vote: &NewVote) -> Result<()> {
        const FAILED: &str = "Failed to create vote.";
        check(&*self.notify, vote, FAILED)?;
        if let Err(err) = self.gateway.create_vote(vote).await {
            log::warn!("Unable to create vote: {err}");
            self.notify.error(FAILED);
            return Err(err.into());
        }
        // The backend creates a new votee along with the vote
        // if no existing votee was referenced.
        self.client.invalidate(&QueryScope::Votes);
        self.client.invalidate(&QueryScope::Votees);
        self.notify.success("Vote submitted successfully!");
        self.reload_active().await;
        Ok(())
    }

    pub async fn support_vote(&self, support: &NewVoteSupport) -> Result<()> {
        const FAILED: &str = "Failed to support vote.";
        check(&*self.notify, support, FAILED)?;
        if let Err(err) = self.gateway.support_vote(support).await {
            log::warn!("Unable to support vote {}: {err}", support.vote_id);
            self.notify.error(FAILED);
            return Err(err.into());
        }
        self.client.invalidate(&QueryScope::Votes);
        self.reload_active().await;
        Ok(())
    }

    /// Loads the shown votes again after they have been invalidated.
    ///
    /// A failure has already been reported by `fetch_votes`
    /// and does not fail the preceding mutation.
    async fn reload_active(&self) {
        let Some(query) = self.active.get() else {
            return;
        };
        if let Err(err) = self.fetch_votes(query).await {
            log::debug!("Keep the outdated votes: {err}");
        }
    }
}
