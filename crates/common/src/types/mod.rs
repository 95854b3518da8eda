use serde::{Deserialize, Serialize};

/// Liveness body shared by the services; callers flatten it next to their own counters.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok", database: "connected" }
    }

    pub fn degraded() -> Self {
        Self { status: "degraded", database: "unreachable" }
    }
}

/// Service banner returned from the cafe API root.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub version: String,
}
