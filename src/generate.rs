//! Generate synthetic inventory records for demos and tests.
//!
//! Deterministic reproducibility via seed: the same seed and count always
//! produce the same records, so generated fixtures are stable across runs.

use crate::range;
use crate::record::Record;
use chrono::DateTime;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Default RNG seed for reproducible output.
pub const DEFAULT_SEED: u64 = 42;

// Timestamps start at 2026-01-01T00:00:00Z
const EPOCH_BASE_SECS: i64 = 1_767_225_600;

const REGIONS: &[&str] = &["eu-west", "eu-central", "us-east", "ap-south"];
const ZONES: &[&str] = &["a", "b", "c"];
const OWNERS: &[&str] = &["platform", "data", "ml", "edge"];
const UNIT_STATUSES: &[&str] = &["free", "allocated", "allocating", "decommissioned"];
const SERVER_STATUSES: &[&str] = &["ready", "initializing", "decommissioned"];

/// Which record collection to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    ComputeUnits,
    Servers,
}

impl RecordKind {
    /// Parse kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compute-units" | "compute_units" | "compute" => Some(Self::ComputeUnits),
            "servers" | "server" => Some(Self::Servers),
            _ => None,
        }
    }
}

/// Seeded generator for synthetic inventory records.
#[derive(Debug)]
pub struct RecordGenerator {
    rng: SmallRng,
}

impl RecordGenerator {
    /// Create a generator from an explicit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` records of the given kind.
    pub fn records(&mut self, kind: RecordKind, count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| match kind {
                RecordKind::ComputeUnits => self.compute_unit(i),
                RecordKind::Servers => self.server(i),
            })
            .collect()
    }

    /// One synthetic compute unit.
    pub fn compute_unit(&mut self, index: usize) -> Record {
        let hostname = format!("node-{:03}", index / 4);
        let cpu_count = 1u64 << self.rng.gen_range(1..5);
        let slot = (index % 4) as u64;
        let cpu_start = slot * cpu_count;
        let cpu_range = format!("{}-{}", cpu_start, cpu_start + cpu_count - 1);
        let port_base = 30_000 + slot * 1_000;

        let value = json!({
            "compute_id": format!("{}_{}", hostname, cpu_range),
            "hostname": hostname,
            "ip": self.ip(),
            "region": self.pick(REGIONS),
            "zone": self.pick(ZONES),
            "cpu_count": cpu_count,
            "cpu_range": cpu_range,
            "ports_range": format!("{}-{}", port_base, port_base + 999),
            "started_at": self.timestamp(),
            "status": self.pick(UNIT_STATUSES),
            "tags": {
                "deployment_id": format!("deploy-{:02}", self.rng.gen_range(0..20)),
                "owner": self.pick(OWNERS),
            },
        });
        into_record(value)
    }

    /// One synthetic physical server.
    pub fn server(&mut self, index: usize) -> Record {
        let cpu_count = 1u64 << self.rng.gen_range(4..8);
        let cpu_ranges =
            range::chunk(cpu_count as i64 - 1, 4).expect("cpu_count is always positive");

        let value = json!({
            "hostname": format!("node-{:03}", index),
            "ip": self.ip(),
            "user_id": "ubuntu",
            "region": self.pick(REGIONS),
            "zone": self.pick(ZONES),
            "cpu_count": cpu_count,
            "mem_gb": cpu_count * 4,
            "disk_count": self.rng.gen_range(1..5),
            "disk_size_gb": 480 * self.rng.gen_range(1u64..5),
            "cpu_ranges": cpu_ranges,
            "tags": {
                "owner": self.pick(OWNERS),
                "env": if index % 3 == 0 { "staging" } else { "production" },
            },
            "status": self.pick(SERVER_STATUSES),
        });
        into_record(value)
    }

    fn pick<'a>(&mut self, options: &'a [&str]) -> &'a str {
        options[self.rng.gen_range(0..options.len())]
    }

    fn ip(&mut self) -> String {
        format!(
            "10.{}.{}.{}",
            self.rng.gen_range(0..4),
            self.rng.gen_range(0..256),
            self.rng.gen_range(1..255)
        )
    }

    fn timestamp(&mut self) -> String {
        let offset = self.rng.gen_range(0..180 * 24 * 3600);
        let at = DateTime::from_timestamp(EPOCH_BASE_SECS + offset, 0)
            .expect("generated timestamps are in range");
        at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

fn into_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("generator templates are objects"),
    }
}
