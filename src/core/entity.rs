//! Entity kinds and the wire shapes owned by the inventory service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two record types the import/bulk engine operates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Server,
    Application,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Server => "server",
            EntityKind::Application => "application",
        }
    }

    /// Capitalized singular label for messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Server => "Server",
            EntityKind::Application => "Application",
        }
    }

    /// Collection segment used in storage API paths
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Server => "servers",
            EntityKind::Application => "applications",
        }
    }

    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Server, EntityKind::Application]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "server" | "servers" | "srv" => Ok(EntityKind::Server),
            "application" | "applications" | "app" | "apps" => Ok(EntityKind::Application),
            _ => Err(KindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unsupported entity kind: '{0}'. Supported: server, application")]
pub struct KindParseError(String);

fn default_status() -> String {
    "unknown".to_string()
}

/// A server row as returned by `GET /servers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub port: i64,
    #[serde(rename = "type", default)]
    pub server_type: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub application_id: Option<i64>,
    #[serde(default)]
    pub shutdown_status: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub test_response: Option<String>,
}

/// An application row as returned by `GET /applications`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub test_response: Option<String>,
}

/// Outcome of a single connectivity probe
#[derive(Debug, Clone, Deserialize)]
pub struct TestOutcome {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Per-server child result inside an application probe.
///
/// The collaborator is expected to tag each child with its server id; an
/// untagged child is applied positionally against the application's
/// id-ordered server list.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildResult {
    #[serde(default)]
    pub id: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Outcome of `POST /applications/{id}/test`
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationOutcome {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub server_results: Vec<ChildResult>,
}

/// One entry of a `test-all` response
#[derive(Debug, Clone, Deserialize)]
pub struct TestAllEntry {
    pub id: i64,
    pub result: TestOutcome,
}

/// Known server types with display names and conventional default ports
pub struct ServerType {
    pub key: &'static str,
    pub name: &'static str,
    pub default_port: u16,
}

pub const SERVER_TYPES: &[ServerType] = &[
    ServerType { key: "http", name: "HTTP", default_port: 80 },
    ServerType { key: "https", name: "HTTPS", default_port: 443 },
    ServerType { key: "mysql", name: "MySQL", default_port: 3306 },
    ServerType { key: "postgresql", name: "PostgreSQL", default_port: 5432 },
    ServerType { key: "mongodb", name: "MongoDB", default_port: 27017 },
    ServerType { key: "redis", name: "Redis", default_port: 6379 },
    ServerType { key: "tomcat", name: "Tomcat", default_port: 8080 },
    ServerType { key: "nodejs", name: "Node.js", default_port: 3000 },
    ServerType { key: "python", name: "Python", default_port: 8000 },
    ServerType { key: "mail", name: "Mail", default_port: 25 },
    ServerType { key: "ftp", name: "FTP", default_port: 21 },
    ServerType { key: "ssh", name: "SSH", default_port: 22 },
    ServerType { key: "dns", name: "DNS", default_port: 53 },
    ServerType { key: "tcp", name: "TCP", default_port: 1234 },
];

/// Look up a server type by key
pub fn server_type(key: &str) -> Option<&'static ServerType> {
    SERVER_TYPES.iter().find(|t| t.key == key)
}

/// Display name for a type key, falling back to the raw key
pub fn type_name(key: &str) -> &str {
    server_type(key).map(|t| t.name).unwrap_or(key)
}
