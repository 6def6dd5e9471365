//! Foreign-key closure and insertion ordering.
//!
//! Resolution runs in two phases:
//!
//! 1. **Closure** - starting from the requested tables, describe every table
//!    not yet seen and queue the tables its foreign keys point at (and, with
//!    [`Closure::ReferencesAndDependents`], the tables pointing at it) until a
//!    pass discovers nothing new. Each table is described exactly once.
//! 2. **Ordering** - repeated passes over the closed set; a table is placed
//!    once every table it references is placed. Tables that become eligible in
//!    the same pass are placed alphabetically. A pass that places nothing while
//!    tables remain means a cycle or a reference outside the closed set.
//!
//! A foreign key from a table to itself counts as satisfied, so
//! self-referential tables never block ordering.

use crate::{ColumnDescriptor, ForeignKeyRef};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Catalog access needed to build a [`TableGraph`].
///
/// Implemented once per dialect on top of a live connection.
#[async_trait]
pub trait Catalog: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every user table in the current database.
    async fn show_tables(&mut self) -> Result<Vec<String>, Self::Error>;

    /// Columns of `table` in ordinal order, with outgoing foreign keys attached.
    async fn describe(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, Self::Error>;

    /// Tables holding a foreign key that points at `table`.
    async fn referencing_tables(&mut self, table: &str) -> Result<Vec<String>, Self::Error>;

    /// Describe several tables. Fails on the first table that cannot be described.
    async fn multi_describe(&mut self, tables: &[String]) -> Result<TableGraph, Self::Error> {
        let mut graph = TableGraph::new();
        for table in tables {
            let columns = self.describe(table).await?;
            graph.insert(table.clone(), columns);
        }
        Ok(graph)
    }
}

/// Which edges the closure phase follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Closure {
    /// Follow outgoing foreign keys only (parents of the requested tables).
    #[default]
    References,
    /// Also follow incoming foreign keys (children of every known table).
    ReferencesAndDependents,
}

/// Table name to column list, for every table in a closed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableGraph {
    tables: BTreeMap<String, Vec<ColumnDescriptor>>,
}

impl TableGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: impl Into<String>, columns: Vec<ColumnDescriptor>) {
        self.tables.insert(table.into(), columns);
    }

    /// Add every table of `other`, replacing tables already present.
    pub fn merge(&mut self, other: TableGraph) {
        self.tables.extend(other.tables);
    }

    pub fn columns(&self, table: &str) -> Option<&[ColumnDescriptor]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables in alphabetical order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ColumnDescriptor])> {
        self.tables.iter().map(|(t, c)| (t.as_str(), c.as_slice()))
    }

    /// Outgoing foreign keys of `table`.
    pub fn foreign_keys<'a>(&'a self, table: &str) -> impl Iterator<Item = &'a ForeignKeyRef> {
        self.tables
            .get(table)
            .into_iter()
            .flatten()
            .filter_map(|c| c.foreign_key.as_ref())
    }

    /// True when any table in the graph has a foreign key.
    pub fn has_foreign_keys(&self) -> bool {
        self.tables
            .values()
            .flatten()
            .any(|c| c.foreign_key.is_some())
    }
}

/// Table names in an order where every referenced table precedes its referrers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InsertionPlan(Vec<String>);

impl InsertionPlan {
    pub fn tables(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Position of `table` in the plan.
    pub fn position(&self, table: &str) -> Option<usize> {
        self.0.iter().position(|t| t == table)
    }
}

/// The closed table set has a cycle or a reference to a table outside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insertion order cannot be determined; unresolved tables: {}", .remaining.join(", "))]
pub struct OrderError {
    /// Tables that could not be placed, alphabetically.
    pub remaining: Vec<String>,
}

/// Errors from [`resolve`].
#[derive(Debug, Error)]
pub enum ResolveError<E: std::error::Error + 'static> {
    /// Listing tables failed.
    #[error("failed to list tables: {0}")]
    ShowTables(#[source] E),

    /// Describing one of `tables` failed.
    #[error("failed to describe tables [{}]: {source}", .tables.join(", "))]
    Describe {
        tables: Vec<String>,
        #[source]
        source: E,
    },

    /// Looking up the tables that reference a table failed.
    #[error("failed to look up tables referencing '{table}': {source}")]
    Dependents {
        table: String,
        #[source]
        source: E,
    },

    /// The graph cannot be ordered.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Describe the requested tables and close the set over foreign keys, then order it.
///
/// An empty `seeds` slice means every table returned by
/// [`Catalog::show_tables`].
pub async fn resolve<C: Catalog>(
    catalog: &mut C,
    seeds: &[String],
    closure: Closure,
) -> Result<(TableGraph, InsertionPlan), ResolveError<C::Error>> {
    let seeds = if seeds.is_empty() {
        catalog
            .show_tables()
            .await
            .map_err(ResolveError::ShowTables)?
    } else {
        seeds.to_vec()
    };

    let graph = describe_closure(catalog, &seeds, closure).await?;
    let plan = insertion_order(&graph)?;
    Ok((graph, plan))
}

/// Closure phase of [`resolve`].
pub async fn describe_closure<C: Catalog>(
    catalog: &mut C,
    seeds: &[String],
    closure: Closure,
) -> Result<TableGraph, ResolveError<C::Error>> {
    let mut graph = TableGraph::new();
    let mut known: HashSet<String> = HashSet::new();
    let mut frontier: Vec<String> = seeds
        .iter()
        .filter(|t| known.insert((*t).clone()))
        .cloned()
        .collect();

    while !frontier.is_empty() {
        let described = catalog
            .multi_describe(&frontier)
            .await
            .map_err(|source| ResolveError::Describe {
                tables: frontier.clone(),
                source,
            })?;

        let mut next = Vec::new();
        for (_, columns) in described.iter() {
            for fk in columns.iter().filter_map(|c| c.foreign_key.as_ref()) {
                if known.insert(fk.referenced_table.clone()) {
                    next.push(fk.referenced_table.clone());
                }
            }
        }

        if closure == Closure::ReferencesAndDependents {
            for table in &frontier {
                let dependents = catalog.referencing_tables(table).await.map_err(|source| {
                    ResolveError::Dependents {
                        table: table.clone(),
                        source,
                    }
                })?;
                for dependent in dependents {
                    if known.insert(dependent.clone()) {
                        next.push(dependent);
                    }
                }
            }
        }

        graph.merge(described);
        frontier = next;
    }

    Ok(graph)
}

/// Ordering phase of [`resolve`].
pub fn insertion_order(graph: &TableGraph) -> Result<InsertionPlan, OrderError> {
    let mut placed: HashSet<&str> = HashSet::with_capacity(graph.len());
    let mut order: Vec<String> = Vec::with_capacity(graph.len());

    while order.len() < graph.len() {
        // BTreeMap iteration keeps each pass alphabetical.
        let eligible: Vec<&str> = graph
            .iter()
            .filter(|(table, _)| !placed.contains(table))
            .filter(|(table, _)| {
                graph.foreign_keys(table).all(|fk| {
                    fk.referenced_table == *table || placed.contains(fk.referenced_table.as_str())
                })
            })
            .map(|(table, _)| table)
            .collect();

        if eligible.is_empty() {
            let remaining = graph
                .table_names()
                .filter(|t| !placed.contains(t))
                .map(str::to_string)
                .collect();
            return Err(OrderError { remaining });
        }

        for table in eligible {
            placed.insert(table);
            order.push(table.to_string());
        }
    }

    Ok(InsertionPlan(order))
}
