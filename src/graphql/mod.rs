//! GraphQL Client
//!
//! Typed queries and mutations over a pluggable transport, backed by a
//! normalized in-memory cache.

mod cache;
mod operations;
mod transport;

use async_trait::async_trait;
use graphql_client::{GraphQLQuery, QueryBody, Response};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use cache::{InMemoryCache, QueryKey};
pub use operations::*;
pub use transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("graphql error: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("response carried no data")]
    MissingData,
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Sends one GraphQL request and returns the raw response envelope.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, body: &QueryBody<Value>) -> Result<Response<Value>, ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve from the cache when present, otherwise hit the network
    #[default]
    CacheFirst,
    /// Always hit the network and replace the cached result
    NetworkOnly,
}

/// Long-lived client: one transport, one cache
pub struct GraphqlClient<T> {
    transport: T,
    cache: Mutex<InMemoryCache>,
}

impl<T: Transport> GraphqlClient<T> {
    pub fn new(transport: T, cache: InMemoryCache) -> Self {
        Self {
            transport,
            cache: Mutex::new(cache),
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Denormalized cached entity by `Type:id` key
    #[cfg(test)]
    pub fn entity(&self, key: &str) -> Option<Value> {
        self.cache.lock().entity(key)
    }

    /// Run a query, caching its result under operation + variables.
    pub async fn query<Q>(&self, variables: Q::Variables, policy: FetchPolicy) -> Result<Q::ResponseData, ClientError>
    where
        Q: GraphQLQuery,
        Q::ResponseData: DeserializeOwned,
    {
        let body = encode::<Q>(variables)?;
        let key = QueryKey::new(body.operation_name, &body.variables);

        if policy == FetchPolicy::CacheFirst {
            if let Some(cached) = self.cache.lock().read_query(&key) {
                log::debug!("[GRAPHQL] {} served from cache", body.operation_name);
                return Ok(serde_json::from_value(cached)?);
            }
        }

        let data = self.send(&body).await?;
        self.cache.lock().write_query(key, &data);
        Ok(serde_json::from_value(data)?)
    }

    /// Run a mutation. Identifiable objects in the result are merged into
    /// the cache, patching every cached query that links to them.
    pub async fn mutate<Q>(&self, variables: Q::Variables) -> Result<Q::ResponseData, ClientError>
    where
        Q: GraphQLQuery,
        Q::ResponseData: DeserializeOwned,
    {
        let body = encode::<Q>(variables)?;
        let data = self.send(&body).await?;
        self.cache.lock().write_result(&data);
        Ok(serde_json::from_value(data)?)
    }

    /// Cached result of a query, without touching the network
    pub fn read_query<Q>(&self, variables: &Q::Variables) -> Result<Option<Q::ResponseData>, ClientError>
    where
        Q: GraphQLQuery,
        Q::Variables: Clone,
        Q::ResponseData: DeserializeOwned,
    {
        let key = query_key::<Q>(variables)?;
        match self.cache.lock().read_query(&key) {
            Some(cached) => Ok(Some(serde_json::from_value(cached)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the cached result of a query
    pub fn write_query<Q>(&self, variables: &Q::Variables, data: &Q::ResponseData) -> Result<(), ClientError>
    where
        Q: GraphQLQuery,
        Q::Variables: Clone,
        Q::ResponseData: Serialize,
    {
        let key = query_key::<Q>(variables)?;
        let data = serde_json::to_value(data)?;
        self.cache.lock().write_query(key, &data);
        Ok(())
    }

    /// Read, modify and write back one cached query. Returns `false` when
    /// the query is not cached.
    pub fn update_query<Q, F>(&self, variables: &Q::Variables, update: F) -> Result<bool, ClientError>
    where
        Q: GraphQLQuery,
        Q::Variables: Clone,
        Q::ResponseData: Serialize + DeserializeOwned,
        F: FnOnce(&mut Q::ResponseData),
    {
        let Some(mut data) = self.read_query::<Q>(variables)? else {
            return Ok(false);
        };
        update(&mut data);
        self.write_query::<Q>(variables, &data)?;
        Ok(true)
    }

    /// Drop one normalized entity by `Type:id` key.
    pub fn evict(&self, key: &str) -> bool {
        self.cache.lock().evict(key)
    }

    async fn send(&self, body: &QueryBody<Value>) -> Result<Value, ClientError> {
        log::debug!("[GRAPHQL] -> {} {}", body.operation_name, body.variables);
        let response = self.transport.execute(body).await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            return Err(ClientError::Graphql(errors.into_iter().map(|e| e.message).collect()));
        }
        match response.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(ClientError::MissingData),
        }
    }
}

fn encode<Q: GraphQLQuery>(variables: Q::Variables) -> Result<QueryBody<Value>, ClientError> {
    let body = Q::build_query(variables);
    Ok(QueryBody {
        variables: serde_json::to_value(&body.variables)?,
        query: body.query,
        operation_name: body.operation_name,
    })
}

fn query_key<Q: GraphQLQuery>(variables: &Q::Variables) -> Result<QueryKey, ClientError>
where
    Q::Variables: Clone,
{
    let body = encode::<Q>(variables.clone())?;
    Ok(QueryKey::new(body.operation_name, &body.variables))
}
