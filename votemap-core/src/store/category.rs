use votemap_entities::category::Category;

use super::prelude::*;
use crate::gateways::backend::CategoryGateway;

pub struct CategoryStore {
    gateway: Rc<dyn CategoryGateway>,
    cache: QueryCache<Vec<Category>>,
    notify: Rc<dyn Notify>,
    categories: Collection<Category>,
}

impl CategoryStore {
    pub fn new(
        gateway: Rc<dyn CategoryGateway>,
        client: &QueryClient,
        notify: Rc<dyn Notify>,
    ) -> Self {
        Self {
            gateway,
            cache: client.cache(),
            notify,
            categories: Collection::default(),
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.get()
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&[Category]) + 'static,
    {
        self.categories.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.categories.unsubscribe(id);
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let gateway = Rc::clone(&self.gateway);
        let result = self
            .cache
            .load(QueryKey::Categories, move || async move {
                gateway.categories().await
            })
            .await;
        match result {
            Ok(loaded) => Ok(self.categories.replace_loaded(loaded)),
            Err(err) => {
                log::warn!("Unable to load categories: {err}");
                self.notify.error("Failed to load categories.");
                Err(err.into())
            }
        }
    }
}
