//! Boundary to the OLAP engine.
//!
//! The engine that stores cubes, computes aggregates and caches segments is
//! reached only through the [`Engine`] trait. Implementations may talk to a
//! server, drive an embedded process or call a native binding; this crate
//! only renders queries and scopes cache flushes for it.

use crate::builder::QueryBuilder;
use crate::error::Error;
use crate::region::{CacheFlushRequest, Region};

/// Operations an OLAP engine must provide.
///
/// Calls are synchronous and may block. Errors are returned to callers as
/// produced; nothing here retries.
pub trait Engine {
    /// Result of executing a query (see [`CellSet`](crate::CellSet) for a
    /// ready-made shape)
    type ResultSet;

    type Error: std::error::Error + 'static;

    /// Execute MDX text against a cube.
    fn execute(&self, mdx: &str, cube: &str) -> Result<Self::ResultSet, Self::Error>;

    /// Drop cached segments covered by the request's region. Flushing a
    /// region with nothing cached is not an error.
    fn flush_cache_region(&self, request: &CacheFlushRequest) -> Result<(), Self::Error>;

    /// Invalidate compiled schema caches.
    fn flush_schema_cache(&self) -> Result<(), Self::Error>;
}

/// Connection facade over an engine handle.
#[derive(Debug, Clone)]
pub struct Connection<E> {
    engine: E,
}

impl<E: Engine> Connection<E> {
    pub fn new(engine: E) -> Self {
        Connection { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Start a query against `cube`.
    pub fn from(&self, cube: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(cube)
    }

    /// Execute raw MDX text.
    ///
    /// The cube context is not known for raw text, so it is passed empty.
    pub fn execute(&self, mdx: &str) -> Result<E::ResultSet, E::Error> {
        tracing::info!("executing raw MDX");
        self.engine.execute(mdx, "")
    }

    pub fn execute_query(&self, query: &QueryBuilder) -> Result<E::ResultSet, E::Error> {
        query.execute(&self.engine)
    }

    pub fn flush_schema_cache(&self) -> Result<(), E::Error> {
        tracing::info!("flushing schema cache");
        self.engine.flush_schema_cache()
    }

    pub fn cube(&self, name: impl Into<String>) -> Cube<'_, E> {
        Cube {
            connection: self,
            name: name.into(),
        }
    }
}

/// Handle to one cube of a connection, used for cache maintenance.
#[derive(Debug)]
pub struct Cube<'c, E> {
    connection: &'c Connection<E>,
    name: String,
}

impl<E: Engine> Cube<'_, E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(self.name.clone())
    }

    /// Flush the region given as tuples of hierarchy then path segments,
    /// e.g. `[["Time", "2010", "Q1"], ["Customers", "USA", "CA"]]`.
    pub fn flush_region_cache_with_segments<T, S>(&self, tuples: &[T]) -> Result<(), Error<E::Error>>
    where
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        let region = Region::from_segments(tuples)?;
        self.flush_region(region)
    }

    /// Flush the region given as fully-qualified names,
    /// e.g. `["[Time].[2010].[Q1]", "[Customers].[USA].[CA]"]`.
    pub fn flush_region_cache_with_full_names<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<(), Error<E::Error>> {
        let region = Region::from_full_names(names)?;
        self.flush_region(region)
    }

    pub fn flush_region(&self, region: Region) -> Result<(), Error<E::Error>> {
        let request = CacheFlushRequest::new(self.name.clone(), region);
        tracing::debug!(scope = %request.to_json(), "resolved cache region");
        tracing::info!(cube = %self.name, "flushing cache region");
        self.connection
            .engine
            .flush_cache_region(&request)
            .map_err(Error::Engine)
    }
}
