use votemap_entities::invitation::{Invitation, InviteVotee, InviteVoters};

use super::prelude::*;
use crate::gateways::backend::InvitationGateway;

const SEND_FAILED: &str = "Failed to send invitation.";

pub struct InvitationStore {
    gateway: Rc<dyn InvitationGateway>,
    client: QueryClient,
    cache: QueryCache<Vec<Invitation>>,
    notify: Rc<dyn Notify>,
    invitations: Collection<Invitation>,
}

impl InvitationStore {
    pub fn new(
        gateway: Rc<dyn InvitationGateway>,
        client: &QueryClient,
        notify: Rc<dyn Notify>,
    ) -> Self {
        Self {
            gateway,
            client: client.clone(),
            cache: client.cache(),
            notify,
            invitations: Collection::default(),
        }
    }

    pub fn invitations(&self) -> Vec<Invitation> {
        self.invitations.get()
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&[Invitation]) + 'static,
    {
        self.invitations.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.invitations.unsubscribe(id);
    }

    /// Loads the invitations of a votee.
    ///
    /// Nothing is requested without a votee and the
    /// current collection is returned unchanged.
    pub async fn fetch_invitations(&self, votee_id: &Id) -> Result<Vec<Invitation>> {
        if !votee_id.is_valid() {
            log::debug!("No votee selected: skip loading invitations");
            return Ok(self.invitations());
        }
        let gateway = Rc::clone(&self.gateway);
        let id = votee_id.clone();
        let result = self
            .cache
            .load(QueryKey::Invitations(votee_id.clone()), move || async move {
                gateway.invitations(&id).await
            })
            .await;
        match result {
            Ok(loaded) => Ok(self.invitations.replace_loaded(loaded)),
            Err(err) => {
                log::warn!("Unable to load invitations of {votee_id}: {err}");
                self.notify.error("Failed to load invitations.");
                Err(err.into())
            }
        }
    }

    pub async fn invite_votee(&self, invitation: &InviteVotee) -> Result<()> {
        check(&*self.notify, invitation, SEND_FAILED)?;
        if let Err(err) = self.gateway.invite_votee(invitation).await {
            log::warn!("Unable to invite votee {}: {err}", invitation.votee_id);
            self.notify.error(SEND_FAILED);
            return Err(err.into());
        }
        self.client
            .invalidate(&QueryScope::Invitations(invitation.votee_id.clone()));
        Ok(())
    }

    pub async fn invite_voters(&self, invitation: &InviteVoters) -> Result<()> {
        check(&*self.notify, invitation, SEND_FAILED)?;
        if let Err(err) = self.gateway.invite_voters(invitation).await {
            log::warn!(
                "Unable to invite {} voters for {}: {err}",
                invitation.recipient_emails.len(),
                invitation.votee_id
            );
            self.notify.error(SEND_FAILED);
            return Err(err.into());
        }
        self.client
            .invalidate(&QueryScope::Invitations(invitation.votee_id.clone()));
        Ok(())
    }
}
