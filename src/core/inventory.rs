//! Local entity lists and the result-merge operations over them

use crate::core::entity::{
    Application, ApplicationOutcome, Server, TestAllEntry, TestOutcome,
};

/// Status rollup across the loaded server list
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServerStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub issues: usize,
    pub pending: usize,
}

/// The locally loaded entity lists.
///
/// This is the only shared mutable state in the toolkit. Derived views
/// (search filtering, per-application server lists, stats) are recomputed
/// from the raw lists on every read; merge operations mutate in place only
/// after a response has been fully parsed, so a failed request never leaves
/// a partial merge behind.
#[derive(Debug, Default)]
pub struct Inventory {
    pub servers: Vec<Server>,
    pub applications: Vec<Application>,
}

impl Inventory {
    pub fn new(servers: Vec<Server>, applications: Vec<Application>) -> Self {
        Self { servers, applications }
    }

    /// Case-insensitive substring filter over name, hostname, type, owner,
    /// and the grouping application's name. An empty query matches all.
    pub fn filter_servers(&self, query: &str) -> Vec<&Server> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.servers.iter().collect();
        }
        self.servers
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&query)
                    || s.hostname.to_lowercase().contains(&query)
                    || s.server_type.to_lowercase().contains(&query)
                    || s.owner_name
                        .as_deref()
                        .is_some_and(|o| o.to_lowercase().contains(&query))
                    || self
                        .application_name(s.application_id)
                        .to_lowercase()
                        .contains(&query)
            })
            .collect()
    }

    /// Filter applications by name or description
    pub fn filter_applications(&self, query: &str) -> Vec<&Application> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.applications.iter().collect();
        }
        self.applications
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&query)
                    || a.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Servers grouped under an application; `None` selects ungrouped servers
    pub fn servers_in_application(&self, app_id: Option<i64>) -> Vec<&Server> {
        self.servers
            .iter()
            .filter(|s| s.application_id == app_id)
            .collect()
    }

    /// Display name for a grouping application
    pub fn application_name(&self, app_id: Option<i64>) -> String {
        match app_id {
            None => "No Application".to_string(),
            Some(id) => self
                .applications
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    pub fn server_stats(&self) -> ServerStats {
        let mut stats = ServerStats {
            total: self.servers.len(),
            ..Default::default()
        };
        for server in &self.servers {
            match server.status.to_lowercase().as_str() {
                "online" => stats.online += 1,
                "offline" => stats.offline += 1,
                "error" => stats.issues += 1,
                "pending" => stats.pending += 1,
                _ => {}
            }
        }
        stats
    }

    pub fn server(&self, id: i64) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == id)
    }

    pub fn server_mut(&mut self, id: i64) -> Option<&mut Server> {
        self.servers.iter_mut().find(|s| s.id == id)
    }

    pub fn application(&self, id: i64) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn application_mut(&mut self, id: i64) -> Option<&mut Application> {
        self.applications.iter_mut().find(|a| a.id == id)
    }

    /// Merge a single server probe outcome in place. Returns false if the
    /// server is no longer loaded (stale id, tolerated).
    pub fn apply_server_outcome(&mut self, id: i64, outcome: &TestOutcome) -> bool {
        match self.server_mut(id) {
            Some(server) => {
                server.status = outcome.status.clone();
                server.test_response = Some(outcome.message.clone());
                true
            }
            None => false,
        }
    }

    /// Merge an application probe outcome, including its child-server
    /// results. Children tagged with a server id merge by lookup; untagged
    /// children are applied positionally over the application's current
    /// servers in ascending-id order. Returns the number of child servers
    /// updated, or None if the application is no longer loaded.
    pub fn apply_application_outcome(
        &mut self,
        id: i64,
        outcome: &ApplicationOutcome,
    ) -> Option<usize> {
        let app = self.application_mut(id)?;
        app.status = outcome.status.clone();
        app.test_response = Some(outcome.message.clone());

        let mut child_ids: Vec<i64> = self
            .servers
            .iter()
            .filter(|s| s.application_id == Some(id))
            .map(|s| s.id)
            .collect();
        child_ids.sort_unstable();

        let mut updated = 0;
        for (idx, child) in outcome.server_results.iter().enumerate() {
            let target = child.id.or_else(|| child_ids.get(idx).copied());
            let Some(target) = target else { continue };
            if let Some(server) = self.server_mut(target) {
                server.status = child.status.clone();
                server.test_response = Some(child.message.clone());
                updated += 1;
            }
        }
        Some(updated)
    }

    /// Merge a servers `test-all` response by id lookup. Entries whose id is
    /// no longer present are silently skipped. Returns the merged count.
    pub fn apply_server_results(&mut self, entries: &[TestAllEntry]) -> usize {
        let mut merged = 0;
        for entry in entries {
            if self.apply_server_outcome(entry.id, &entry.result) {
                merged += 1;
            }
        }
        merged
    }

    /// Merge an applications `test-all` response by id lookup
    pub fn apply_application_results(&mut self, entries: &[TestAllEntry]) -> usize {
        let mut merged = 0;
        for entry in entries {
            if let Some(app) = self.application_mut(entry.id) {
                app.status = entry.result.status.clone();
                app.test_response = Some(entry.result.message.clone());
                merged += 1;
            }
        }
        merged
    }

    pub fn remove_server(&mut self, id: i64) {
        self.servers.retain(|s| s.id != id);
    }

    pub fn remove_application(&mut self, id: i64) {
        self.applications.retain(|a| a.id != id);
    }
}
