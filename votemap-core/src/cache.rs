//! Request cache keyed by query parameters.
//!
//! Each [`QueryCache`] holds the successfully loaded values of one resource
//! type together with a map of in-flight requests. Concurrent reads of the
//! same key share one request. All caches created by the same [`QueryClient`]
//! can be invalidated together, so a mutation in one store can discard the
//! cached data of another.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    future::Future,
    rc::{Rc, Weak},
};

use futures::future::{FutureExt as _, LocalBoxFuture, Shared};

use votemap_entities::{id::Id, vote::RadiusQuery};

use crate::gateways::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Votees,
    Votee(Id),
    Votes {
        // Bit patterns of the requested coordinates and radius.
        lat: u64,
        lng: u64,
        radius: u64,
    },
    Invitations(Id),
    Categories,
}

impl QueryKey {
    pub fn votes(query: &RadiusQuery) -> Self {
        let (lat, lng) = query.center.to_lat_lng_deg();
        Self::Votes {
            lat: lat.to_bits(),
            lng: lng.to_bits(),
            radius: query.radius.to_bits(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Votees => f.write_str("votees"),
            Self::Votee(id) => write!(f, "votees/{id}"),
            Self::Votes { lat, lng, radius } => write!(
                f,
                "votes?lat={}&lng={}&radius={}",
                f64::from_bits(*lat),
                f64::from_bits(*lng),
                f64::from_bits(*radius)
            ),
            Self::Invitations(id) => write!(f, "invitations?voteeId={id}"),
            Self::Categories => f.write_str("categories"),
        }
    }
}

/// A group of query keys that is invalidated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryScope {
    /// The votee list and all single votees.
    Votees,
    /// All radius queries.
    Votes,
    Invitations(Id),
    Categories,
    All,
}

impl QueryScope {
    pub fn matches(&self, key: &QueryKey) -> bool {
        match (self, key) {
            (Self::All, _)
            | (Self::Votees, QueryKey::Votees | QueryKey::Votee(_))
            | (Self::Votes, QueryKey::Votes { .. })
            | (Self::Categories, QueryKey::Categories) => true,
            (Self::Invitations(scope), QueryKey::Invitations(id)) => scope == id,
            _ => false,
        }
    }
}

trait Invalidate {
    fn invalidate(&self, scope: &QueryScope);
}

/// Creates caches and invalidates them across resource types.
#[derive(Clone, Default)]
pub struct QueryClient {
    caches: Rc<RefCell<Vec<Weak<dyn Invalidate>>>>,
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("caches", &self.caches.borrow().len())
            .finish()
    }
}

impl QueryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cache<T>(&self) -> QueryCache<T>
    where
        T: Clone + 'static,
    {
        let inner = Rc::new(CacheInner::<T>::default());
        let invalidate: Rc<dyn Invalidate> = Rc::clone(&inner) as _;
        let weak = Rc::downgrade(&invalidate);
        let mut caches = self.caches.borrow_mut();
        caches.retain(|c| c.strong_count() > 0);
        caches.push(weak);
        QueryCache { inner }
    }

    pub fn invalidate(&self, scope: &QueryScope) {
        log::debug!("Invalidate queries: {scope:?}");
        let caches: Vec<_> = self
            .caches
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for cache in caches {
            cache.invalidate(scope);
        }
    }
}

/// A value returned by [`QueryCache::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub value: T,
    /// `false` if the key was invalidated while the request was
    /// in flight. The value has then not been cached and may
    /// predate a mutation.
    pub is_current: bool,
}

type SharedRequest<T> = Shared<LocalBoxFuture<'static, Result<Loaded<T>>>>;

struct Pending<T> {
    generation: u64,
    request: SharedRequest<T>,
}

struct State<T> {
    entries: HashMap<QueryKey, T>,
    pending: HashMap<QueryKey, Pending<T>>,
    last_generation: u64,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            pending: HashMap::new(),
            last_generation: 0,
        }
    }
}

struct CacheInner<T> {
    state: RefCell<State<T>>,
}

impl<T> Default for CacheInner<T> {
    fn default() -> Self {
        Self {
            state: RefCell::new(State::default()),
        }
    }
}

impl<T: Clone> CacheInner<T> {
    /// Stores a successful result unless it has been superseded.
    ///
    /// Returns whether the request was still the current one.
    fn settle(&self, key: &QueryKey, generation: u64, result: &Result<T>) -> bool {
        let mut state = self.state.borrow_mut();
        let current = state.pending.get(key).map(|p| p.generation);
        if current != Some(generation) {
            log::debug!("Discard superseded response for {key}");
            return false;
        }
        state.pending.remove(key);
        if let Ok(value) = result {
            state.entries.insert(key.clone(), value.clone());
        }
        true
    }
}

impl<T> Invalidate for CacheInner<T> {
    fn invalidate(&self, scope: &QueryScope) {
        let mut state = self.state.borrow_mut();
        state.entries.retain(|key, _| !scope.matches(key));
        // In-flight requests still resolve for their callers
        // but their results are no longer stored.
        state.pending.retain(|key, _| !scope.matches(key));
    }
}

/// Cached values of one resource type.
pub struct QueryCache<T> {
    inner: Rc<CacheInner<T>>,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("QueryCache")
            .field("entries", &state.entries.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl<T> QueryCache<T>
where
    T: Clone + 'static,
{
    /// Returns the cached value for `key` or loads it.
    ///
    /// While a request for `key` is in flight, all further calls
    /// wait for that request instead of issuing their own.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + 'static,
    {
        self.load(key, load).await.map(|loaded| loaded.value)
    }

    /// Like [`fetch`](Self::fetch), but also tells whether the
    /// value is current.
    ///
    /// Values served from the cache are always current.
    pub async fn load<F, Fut>(&self, key: QueryKey, load: F) -> Result<Loaded<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + 'static,
    {
        let in_flight = {
            let state = self.inner.state.borrow();
            if let Some(value) = state.entries.get(&key) {
                log::debug!("Serve {key} from cache");
                return Ok(Loaded {
                    value: value.clone(),
                    is_current: true,
                });
            }
            state.pending.get(&key).map(|p| p.request.clone())
        };
        let request = match in_flight {
            Some(request) => {
                log::debug!("Join in-flight request for {key}");
                request
            }
            None => self.start(key, load()),
        };
        request.await
    }

    /// Discards the cached value for `key` and loads it again.
    pub async fn refetch<F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + 'static,
    {
        self.remove(&key);
        self.fetch(key, load).await
    }

    fn start<Fut>(&self, key: QueryKey, load: Fut) -> SharedRequest<T>
    where
        Fut: Future<Output = Result<T>> + 'static,
    {
        let mut state = self.inner.state.borrow_mut();
        state.last_generation += 1;
        let generation = state.last_generation;
        let cache = Rc::downgrade(&self.inner);
        let settle_key = key.clone();
        let request = async move {
            let result = load.await;
            let is_current = cache
                .upgrade()
                .is_some_and(|cache| cache.settle(&settle_key, generation, &result));
            result.map(|value| Loaded { value, is_current })
        }
        .boxed_local()
        .shared();
        log::debug!("Request {key}");
        state.pending.insert(
            key,
            Pending {
                generation,
                request: request.clone(),
            },
        );
        request
    }

    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<T> {
        self.inner.state.borrow().entries.get(key).cloned()
    }

    #[must_use]
    pub fn is_loading(&self, key: &QueryKey) -> bool {
        self.inner.state.borrow().pending.contains_key(key)
    }

    pub fn remove(&self, key: &QueryKey) {
        let mut state = self.inner.state.borrow_mut();
        state.entries.remove(key);
        state.pending.remove(key);
    }

    pub fn invalidate(&self, scope: &QueryScope) {
        self.inner.invalidate(scope);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::{channel::oneshot, executor::LocalPool, task::LocalSpawnExt as _};

    use super::*;

    async fn receive(rx: oneshot::Receiver<String>) -> Result<String> {
        rx.await.map_err(|_| Error::Fetch("canceled".into()))
    }

    fn counting_loader(
        calls: &Rc<Cell<usize>>,
        value: &'static str,
    ) -> impl FnOnce() -> LocalBoxFuture<'static, Result<String>> {
        let calls = Rc::clone(calls);
        move || {
            calls.set(calls.get() + 1);
            async move { Ok(value.to_string()) }.boxed_local()
        }
    }

    #[test]
    fn serve_second_read_from_cache() {
        let client = QueryClient::new();
        let cache = client.cache::<String>();
        let calls = Rc::new(Cell::new(0));
        futures::executor::block_on(async {
            let a = cache
                .fetch(QueryKey::Categories, counting_loader(&calls, "a"))
                .await;
            let b = cache
                .fetch(QueryKey::Categories, counting_loader(&calls, "b"))
                .await;
            assert_eq!(a.unwrap(), "a");
            assert_eq!(b.unwrap(), "a");
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn coalesce_concurrent_reads_of_the_same_key() {
        let client = QueryClient::new();
        let cache = client.cache::<String>();
        let calls = Rc::new(Cell::new(0));
        let (tx, rx) = oneshot::channel::<String>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..3 {
            let cache = cache.clone();
            let calls = Rc::clone(&calls);
            let rx = Rc::clone(&rx);
            let results = Rc::clone(&results);
            spawner
                .spawn_local(async move {
                    let result = cache
                        .fetch(QueryKey::Votees, move || {
                            calls.set(calls.get() + 1);
                            let rx = rx.borrow_mut().take().expect("single request");
                            receive(rx)
                        })
                        .await;
                    results.borrow_mut().push(result);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(calls.get(), 1);
        assert!(cache.is_loading(&QueryKey::Votees));

        tx.send("done".to_string()).unwrap();
        pool.run_until_stalled();
        assert_eq!(
            *results.borrow(),
            vec![Ok("done".to_string()), Ok("done".to_string()), Ok("done".to_string())]
        );
        assert_eq!(cache.get(&QueryKey::Votees), Some("done".to_string()));
        assert!(!cache.is_loading(&QueryKey::Votees));
    }

    #[test]
    fn do_not_cache_failures() {
        let client = QueryClient::new();
        let cache = client.cache::<String>();
        futures::executor::block_on(async {
            let err = cache
                .fetch(QueryKey::Categories, || async {
                    Err(Error::Fetch("offline".into()))
                })
                .await;
            assert!(err.is_err());
            assert_eq!(cache.get(&QueryKey::Categories), None);
            let ok = cache
                .fetch(QueryKey::Categories, || async { Ok("x".to_string()) })
                .await;
            assert_eq!(ok.unwrap(), "x");
        });
    }

    #[test]
    fn invalidate_across_caches_by_scope() {
        let client = QueryClient::new();
        let votees = client.cache::<String>();
        let invitations = client.cache::<String>();
        futures::executor::block_on(async {
            votees
                .fetch(QueryKey::Votees, || async { Ok("list".to_string()) })
                .await
                .unwrap();
            votees
                .fetch(QueryKey::Votee("v1".into()), || async { Ok("one".to_string()) })
                .await
                .unwrap();
            invitations
                .fetch(QueryKey::Invitations("v1".into()), || async {
                    Ok("i1".to_string())
                })
                .await
                .unwrap();
            invitations
                .fetch(QueryKey::Invitations("v2".into()), || async {
                    Ok("i2".to_string())
                })
                .await
                .unwrap();
        });

        client.invalidate(&QueryScope::Votees);
        assert_eq!(votees.get(&QueryKey::Votees), None);
        assert_eq!(votees.get(&QueryKey::Votee("v1".into())), None);

        client.invalidate(&QueryScope::Invitations("v1".into()));
        assert_eq!(invitations.get(&QueryKey::Invitations("v1".into())), None);
        assert_eq!(
            invitations.get(&QueryKey::Invitations("v2".into())),
            Some("i2".to_string())
        );
    }

    #[test]
    fn drop_result_of_request_invalidated_in_flight() {
        let client = QueryClient::new();
        let cache = client.cache::<String>();
        let (tx, rx) = oneshot::channel::<String>();
        let result = Rc::new(RefCell::new(None));

        let mut pool = LocalPool::new();
        {
            let cache = cache.clone();
            let result = Rc::clone(&result);
            pool.spawner()
                .spawn_local(async move {
                    let r = cache
                        .fetch(QueryKey::Votees, move || receive(rx))
                        .await;
                    *result.borrow_mut() = Some(r);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        client.invalidate(&QueryScope::Votees);
        tx.send("old".to_string()).unwrap();
        pool.run_until_stalled();

        assert_eq!(*result.borrow(), Some(Ok("old".to_string())));
        assert_eq!(cache.get(&QueryKey::Votees), None);
    }

    #[test]
    fn report_whether_a_loaded_value_is_current() {
        let client = QueryClient::new();
        let cache = client.cache::<String>();
        let (tx, rx) = oneshot::channel::<String>();
        let result = Rc::new(RefCell::new(None));

        let mut pool = LocalPool::new();
        {
            let cache = cache.clone();
            let result = Rc::clone(&result);
            pool.spawner()
                .spawn_local(async move {
                    let loaded = cache.load(QueryKey::Votees, move || receive(rx)).await;
                    *result.borrow_mut() = Some(loaded);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        client.invalidate(&QueryScope::Votees);
        tx.send("old".to_string()).unwrap();
        pool.run_until_stalled();
        assert_eq!(
            *result.borrow(),
            Some(Ok(Loaded {
                value: "old".to_string(),
                is_current: false
            }))
        );

        futures::executor::block_on(async {
            let fresh = cache
                .load(QueryKey::Votees, || async { Ok("new".to_string()) })
                .await
                .unwrap();
            assert!(fresh.is_current);
            let cached = cache
                .load(QueryKey::Votees, || async { Ok("unused".to_string()) })
                .await
                .unwrap();
            assert_eq!(
                cached,
                Loaded {
                    value: "new".to_string(),
                    is_current: true
                }
            );
        });
    }

    #[test]
    fn equal_radius_queries_share_a_key() {
        use votemap_entities::geo::MapPoint;
        let q = RadiusQuery {
            center: MapPoint::from_lat_lng_deg(28.6139, 77.209),
            radius: 5.0,
        };
        assert_eq!(QueryKey::votes(&q), QueryKey::votes(&q.clone()));
        let other = RadiusQuery { radius: 6.0, ..q };
        assert_ne!(QueryKey::votes(&q), QueryKey::votes(&other));
        assert!(QueryScope::Votes.matches(&QueryKey::votes(&q)));
        assert!(!QueryScope::Votees.matches(&QueryKey::votes(&q)));
    }
}
