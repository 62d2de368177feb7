// src/checker/sanity.rs
use std::time::Instant;

use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::results::CollectionType;
use mongodb::{Client, Database, IndexModel};
use tracing::debug;

use crate::checker::CheckError;
use crate::report::{Reporter, ReportSummary};

/// Runs the fixed checklist against one cluster connection, publishing each
/// outcome through the reporter.
pub struct ClusterChecker {
    reporter: Reporter,
}

impl ClusterChecker {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    /// Execute the checklist against `endpoint` and return the run summary.
    ///
    /// Every failure becomes a report line rather than an `Err`; whenever a
    /// session was constructed it is shut down on the way out, whether the
    /// checklist completed or aborted.
    pub async fn run(&self, endpoint: &str) -> ReportSummary {
        // Construction is lazy: only a malformed URI fails here, the server
        // is first reached by the ping below.
        match Client::with_uri_str(endpoint).await {
            Ok(client) => {
                self.reporter.info("✅ Connected to MongoDB");

                if let Err(err) = self.run_checklist(&client).await {
                    self.reporter.error(format!("❌ Sanity checks aborted: {err}"));
                }

                client.shutdown().await;
                self.reporter.info("🔒 Connection closed");
            }
            Err(err) => {
                self.reporter
                    .error(format!("❌ Failed to connect to MongoDB: {err}"));
            }
        }

        self.reporter.summary()
    }

    async fn run_checklist(&self, client: &Client) -> Result<(), CheckError> {
        // Ping failure is fatal for the run; teardown still happens in run().
        if !self.ping(client).await {
            return Ok(());
        }

        self.replica_set_status(client).await?;

        let databases = client.list_database_names().await?;
        self.reporter.info(format!("✅ Databases: {databases:?}"));

        for db_name in &databases {
            if let Err(err) = self.validate_database(client, db_name).await {
                if err.is_operation_failure() {
                    self.reporter
                        .error(format!("❌ Failed to inspect database {db_name}: {err}"));
                } else {
                    return Err(err);
                }
            }
        }

        self.sample_document(client, &databases).await
    }

    async fn ping(&self, client: &Client) -> bool {
        let started = Instant::now();
        match client.database("admin").run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "ping round trip"
                );
                self.reporter
                    .info("✅ MongoDB is responsive (ping check passed)");
                true
            }
            Err(err) => {
                self.reporter.error(format!("❌ Ping check failed: {err}"));
                false
            }
        }
    }

    async fn replica_set_status(&self, client: &Client) -> Result<(), CheckError> {
        match client
            .database("admin")
            .run_command(doc! { "replSetGetStatus": 1 })
            .await
        {
            Ok(status) => {
                let my_state = status.get_i32("myState").unwrap_or(-1);
                let primary = primary_member_name(&status).unwrap_or("<unknown>");
                self.reporter.info(format!(
                    "✅ Replica Set Status: {my_state} (Primary node: {primary})"
                ));
                Ok(())
            }
            // Standalone deployments reject the command; not fatal.
            Err(err) => match CheckError::from(err) {
                CheckError::Operation(err) => {
                    self.reporter.warning(format!(
                        "⚠️ Unable to fetch replica set status (may not be a replica set): {err}"
                    ));
                    Ok(())
                }
                err => Err(err),
            },
        }
    }

    async fn validate_database(&self, client: &Client, db_name: &str) -> Result<(), CheckError> {
        let db = client.database(db_name);
        let collections = db.list_collection_names().await?;
        debug!(db = db_name, collections = collections.len(), "listed collections");

        self.reporter
            .info(format!("🔍 Validating collections in database: {db_name}"));

        for collection_name in &collections {
            if let Err(err) = self.check_collection(&db, collection_name).await {
                if err.is_operation_failure() {
                    self.reporter
                        .error(format!("❌ Failed to validate {collection_name}: {err}"));
                } else {
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    async fn check_collection(&self, db: &Database, name: &str) -> Result<(), CheckError> {
        // Views support neither validate nor listIndexes.
        if self.is_view(db, name).await? {
            self.reporter.warning(format!(
                "⚠️ Skipping index check on {name}: it is a view, not a collection."
            ));
            return Ok(());
        }

        self.validate_collection(db, name).await?;
        self.list_indexes(db, name).await
    }

    async fn is_view(&self, db: &Database, name: &str) -> Result<bool, CheckError> {
        let mut specs = db.list_collections().filter(doc! { "name": name }).await?;
        let spec = specs.try_next().await?;
        Ok(spec.is_some_and(|spec| matches!(spec.collection_type, CollectionType::View)))
    }

    async fn validate_collection(&self, db: &Database, name: &str) -> Result<(), CheckError> {
        let verdict = db.run_command(doc! { "validate": name }).await?;
        if verdict.get_bool("valid").unwrap_or(false) {
            self.reporter.info(format!("✅ {name} collection is valid."));
        } else {
            self.reporter
                .error(format!("❌ {name} collection validation failed: {verdict}"));
        }
        Ok(())
    }

    async fn list_indexes(&self, db: &Database, name: &str) -> Result<(), CheckError> {
        let indexes: Vec<IndexModel> = db
            .collection::<Document>(name)
            .list_indexes()
            .await?
            .try_collect()
            .await?;
        self.reporter
            .info(format!("✅ Indexes for {name}: {}", describe_indexes(&indexes)));
        Ok(())
    }

    /// Sample one document from the first collection of the first database.
    /// Missing databases or collections degrade to warnings.
    async fn sample_document(
        &self,
        client: &Client,
        databases: &[String],
    ) -> Result<(), CheckError> {
        self.reporter
            .info("🔍 Checking data from one collection for sanity");

        let Some(db_name) = databases.first() else {
            self.reporter
                .warning("⚠️ No databases available for data sampling");
            return Ok(());
        };

        let db = client.database(db_name);
        let collections = db.list_collection_names().await?;
        let Some(collection_name) = collections.first() else {
            self.reporter
                .warning(format!("⚠️ No collections in {db_name} available for data sampling"));
            return Ok(());
        };

        match db
            .collection::<Document>(collection_name)
            .find_one(doc! {})
            .await?
        {
            Some(sample) => self.reporter.info(format!(
                "✅ Sample document from {collection_name}: {}",
                render_document(&sample)
            )),
            None => self.reporter.warning(format!(
                "⚠️ No documents found in {collection_name} for sampling"
            )),
        }

        Ok(())
    }
}

/// Name of the PRIMARY member, falling back to the first listed member when
/// no member reports a PRIMARY state.
fn primary_member_name(status: &Document) -> Option<&str> {
    let members = status.get_array("members").ok()?;
    members
        .iter()
        .filter_map(|member| member.as_document())
        .find(|member| member.get_str("stateStr").map_or(false, |s| s == "PRIMARY"))
        .or_else(|| members.first().and_then(|member| member.as_document()))
        .and_then(|member| member.get_str("name").ok())
}

/// `name: keys` listing for the report, one entry per index.
fn describe_indexes(indexes: &[IndexModel]) -> String {
    let entries: Vec<String> = indexes
        .iter()
        .map(|index| {
            let name = index
                .options
                .as_ref()
                .and_then(|options| options.name.as_deref())
                .unwrap_or("<unnamed>");
            format!("{name}: {}", index.keys)
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn render_document(document: &Document) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
}
