//! Cassandra/Scylla executor built on the `scylla` driver.
//!
//! Session creation happens once at startup; failure there is fatal for the
//! run. Each `execute` issues the scan query with the sub-range bounds bound
//! as its two positional parameters and walks the result pages lazily.

use crate::{
    error::FetchError,
    executor::{QueryExecutor, RowStream},
};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use model::{
    core::value::Value,
    execution::consistency::ConsistencyLevel,
    records::row::{FieldValue, Row},
};
use scylla::{
    client::{PoolSize, session::Session, session_builder::SessionBuilder},
    statement::{Consistency, unprepared::Statement},
    value::{CqlValue, Row as CqlRow},
};
use std::{fmt, num::NonZeroUsize, pin::Pin};
use tracing::{debug, info};

/// Connection parameters for one cluster.
#[derive(Clone)]
pub struct CassandraOptions {
    pub hosts: Vec<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keyspace: String,
    pub connections: usize,
    pub page_size: usize,
    pub consistency: ConsistencyLevel,
}

impl fmt::Debug for CassandraOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CassandraOptions")
            .field("hosts", &self.hosts)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("keyspace", &self.keyspace)
            .field("connections", &self.connections)
            .field("page_size", &self.page_size)
            .field("consistency", &self.consistency)
            .finish()
    }
}

pub struct CassandraExecutor {
    name: String,
    session: Session,
    page_size: i32,
    consistency: Consistency,
}

impl fmt::Debug for CassandraExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CassandraExecutor")
            .field("name", &self.name)
            .field("page_size", &self.page_size)
            .field("consistency", &self.consistency)
            .finish()
    }
}

impl CassandraExecutor {
    pub async fn connect(name: &str, options: &CassandraOptions) -> Result<Self, FetchError> {
        let nodes: Vec<String> = options
            .hosts
            .iter()
            .map(|host| format!("{}:{}", host.trim(), options.port))
            .collect();

        let mut builder = SessionBuilder::new().known_nodes(&nodes);
        if let Some(username) = options.username.as_deref().filter(|u| !u.is_empty()) {
            let password = options.password.clone().unwrap_or_default();
            builder = builder.user(username, password);
        }
        if !options.keyspace.is_empty() {
            builder = builder.use_keyspace(&options.keyspace, false);
        }
        if let Some(per_host) = NonZeroUsize::new(options.connections) {
            builder = builder.pool_size(PoolSize::PerHost(per_host));
        }

        let session = builder
            .build()
            .await
            .map_err(|err| FetchError::Connection {
                cluster: name.to_string(),
                message: err.to_string(),
            })?;

        info!(cluster = name, nodes = ?nodes, keyspace = %options.keyspace, "Connected");

        Ok(Self {
            name: name.to_string(),
            session,
            page_size: i32::try_from(options.page_size.max(1)).unwrap_or(i32::MAX),
            consistency: to_driver_consistency(options.consistency),
        })
    }
}

#[async_trait]
impl QueryExecutor for CassandraExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        query: &str,
        min: i64,
        max: i64,
    ) -> Result<Box<dyn RowStream>, FetchError> {
        let mut statement = Statement::new(query);
        statement.set_page_size(self.page_size);
        statement.set_consistency(self.consistency);

        let pager = self
            .session
            .query_iter(statement, (min, max))
            .await
            .map_err(|err| FetchError::Query {
                cluster: self.name.clone(),
                message: err.to_string(),
            })?;

        let columns: Vec<String> = pager
            .column_specs()
            .iter()
            .map(|spec| spec.name().to_string())
            .collect();
        debug!(cluster = %self.name, min, max, columns = columns.len(), "Query started");

        let rows = pager
            .rows_stream::<CqlRow>()
            .map_err(|err| FetchError::Decode {
                cluster: self.name.clone(),
                message: err.to_string(),
            })?
            .map(|row| row.map_err(|err| err.to_string()));

        Ok(Box::new(CassandraRowStream {
            cluster: self.name.clone(),
            columns,
            rows: Box::pin(rows),
            rows_read: 0,
        }))
    }
}

type CqlRowStream = Pin<Box<dyn Stream<Item = Result<CqlRow, String>> + Send>>;

struct CassandraRowStream {
    cluster: String,
    columns: Vec<String>,
    rows: CqlRowStream,
    rows_read: u64,
}

#[async_trait]
impl RowStream for CassandraRowStream {
    async fn next_row(&mut self) -> Result<Option<Row>, FetchError> {
        match self.rows.next().await {
            None => Ok(None),
            Some(Err(message)) => Err(FetchError::Page {
                cluster: self.cluster.clone(),
                rows_read: self.rows_read,
                message,
            }),
            Some(Ok(row)) => {
                self.rows_read += 1;
                let field_values = self
                    .columns
                    .iter()
                    .zip(row.columns)
                    .map(|(name, value)| FieldValue {
                        name: name.clone(),
                        value: value.map(to_value).unwrap_or(Value::Null),
                    })
                    .collect();
                Ok(Some(Row::new(field_values)))
            }
        }
    }
}

fn to_driver_consistency(level: ConsistencyLevel) -> Consistency {
    match level {
        ConsistencyLevel::Any => Consistency::Any,
        ConsistencyLevel::One => Consistency::One,
        ConsistencyLevel::Two => Consistency::Two,
        ConsistencyLevel::Three => Consistency::Three,
        ConsistencyLevel::Quorum => Consistency::Quorum,
        ConsistencyLevel::All => Consistency::All,
        ConsistencyLevel::LocalQuorum => Consistency::LocalQuorum,
        ConsistencyLevel::EachQuorum => Consistency::EachQuorum,
        ConsistencyLevel::LocalOne => Consistency::LocalOne,
        ConsistencyLevel::Serial => Consistency::Serial,
        ConsistencyLevel::LocalSerial => Consistency::LocalSerial,
    }
}

fn to_value(value: CqlValue) -> Value {
    match value {
        CqlValue::Ascii(s) | CqlValue::Text(s) => Value::String(s),
        CqlValue::Boolean(b) => Value::Boolean(b),
        CqlValue::TinyInt(v) => Value::Int(v as i64),
        CqlValue::SmallInt(v) => Value::Int(v as i64),
        CqlValue::Int(v) => Value::Int(v as i64),
        CqlValue::BigInt(v) => Value::Int(v),
        CqlValue::Counter(c) => Value::Int(c.0),
        CqlValue::Float(v) => Value::Float(v as f64),
        CqlValue::Double(v) => Value::Float(v),
        CqlValue::Uuid(u) => Value::Uuid(u),
        CqlValue::Blob(b) => Value::Bytes(b),
        CqlValue::Inet(addr) => Value::String(addr.to_string()),
        CqlValue::Timestamp(ts) => chrono::DateTime::from_timestamp_millis(ts.0)
            .map(Value::Timestamp)
            .unwrap_or(Value::Int(ts.0)),
        CqlValue::List(items) | CqlValue::Set(items) => {
            Value::List(items.into_iter().map(to_value).collect())
        }
        CqlValue::Empty => Value::Null,
        other => Value::String(format!("{other:?}")),
    }
}
