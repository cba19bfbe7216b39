//! In-memory Directory for engine tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Map;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use zonekeeper_core::{
    Directory, ListPage, NewRecord, QueryFilter, Record, RecordPatch, RecordType, Result, Ttl,
    Zone, ZoneError, ZoneFilter, ZoneStatus,
};

pub const ZONE: &str = "zone-1";

/// Zones and records held in memory, with a log of every call
#[derive(Default)]
pub struct MemoryDirectory {
    zones: Vec<Zone>,
    records: Mutex<HashMap<String, Vec<Record>>>,
    rejected_names: HashSet<String>,
    calls: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
    /// When set, `list_records` ignores every filter except the type
    pub partial_filtering: bool,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        let mut dir = Self::default();
        dir.zones.push(zone(ZONE, "example.com"));
        dir.records.lock().unwrap().insert(ZONE.to_string(), Vec::new());
        dir
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let dir = Self::new();
        dir.records.lock().unwrap().insert(ZONE.to_string(), records);
        dir
    }

    /// Creates of this name fail with a conflict
    pub fn reject_name(mut self, name: &str) -> Self {
        self.rejected_names.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("list") && !c.starts_with("get"))
            .collect()
    }

    pub fn stored(&self) -> Vec<Record> {
        self.records.lock().unwrap().get(ZONE).cloned().unwrap_or_default()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found(what: &str) -> ZoneError {
        ZoneError::NotFound {
            resource: what.to_string(),
        }
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn list_zones(
        &self,
        filter: &ZoneFilter,
        page: u32,
        per_page: u32,
    ) -> Result<ListPage<Zone>> {
        self.log(format!("list_zones {page}"));
        let matching: Vec<Zone> = self
            .zones
            .iter()
            .filter(|z| filter.name.as_ref().map_or(true, |n| &z.name == n))
            .cloned()
            .collect();
        Ok(window(matching, page, per_page))
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        self.log(format!("get_zone {zone_id}"));
        self.zones
            .iter()
            .find(|z| z.id == zone_id)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("zone {zone_id}")))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        filter: &QueryFilter,
        page: u32,
        per_page: u32,
    ) -> Result<ListPage<Record>> {
        self.log(format!("list_records {zone_id} {page}"));
        let records = self.records.lock().unwrap();
        let all = records
            .get(zone_id)
            .ok_or_else(|| Self::not_found(&format!("zone {zone_id}")))?;

        let matching: Vec<Record> = all
            .iter()
            .filter(|r| {
                if self.partial_filtering {
                    filter.record_type.as_ref().map_or(true, |t| &r.record_type == t)
                } else {
                    filter.matches(r)
                }
            })
            .cloned()
            .collect();
        Ok(window(matching, page, per_page))
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<Record> {
        self.log(format!("get_record {record_id}"));
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .and_then(|rs| rs.iter().find(|r| r.id == record_id).cloned())
            .ok_or_else(|| Self::not_found(&format!("record {record_id}")))
    }

    async fn create_record(&self, zone_id: &str, new: &NewRecord) -> Result<Record> {
        self.log(format!("create {}", new.name));
        if self.rejected_names.contains(&new.name) {
            return Err(ZoneError::Conflict {
                message: format!("record {} already exists", new.name),
            });
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{next}")
        };
        let created = Record {
            id,
            record_type: new.record_type.clone(),
            name: new.name.clone(),
            content: new.content.clone(),
            ttl: new.ttl,
            proxied: new.proxied,
            comment: new.comment.clone(),
            tags: new.tags.clone(),
            created_on: None,
            modified_on: None,
            priority: new.priority,
            data: new.data.clone(),
            extra: Map::new(),
        };

        self.records
            .lock()
            .unwrap()
            .get_mut(zone_id)
            .ok_or_else(|| Self::not_found(&format!("zone {zone_id}")))?
            .push(created.clone());
        Ok(created)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<Record> {
        self.log(format!("update {record_id}"));
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(zone_id)
            .and_then(|rs| rs.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| Self::not_found(&format!("record {record_id}")))?;

        if let Some(ref content) = patch.content {
            record.content.clone_from(content);
        }
        if let Some(ttl) = patch.ttl {
            record.ttl = ttl;
        }
        if let Some(proxied) = patch.proxied {
            record.proxied = Some(proxied);
        }
        if let Some(ref comment) = patch.comment {
            record.comment = Some(comment.clone());
        }
        Ok(record.clone())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.log(format!("delete {record_id}"));
        let mut records = self.records.lock().unwrap();
        let rs = records
            .get_mut(zone_id)
            .ok_or_else(|| Self::not_found(&format!("zone {zone_id}")))?;
        let before = rs.len();
        rs.retain(|r| r.id != record_id);
        if rs.len() == before {
            return Err(Self::not_found(&format!("record {record_id}")));
        }
        Ok(())
    }

    async fn export_zone(&self, zone_id: &str) -> Result<String> {
        self.log(format!("export {zone_id}"));
        let records = self.records.lock().unwrap();
        let rs = records
            .get(zone_id)
            .ok_or_else(|| Self::not_found(&format!("zone {zone_id}")))?;
        Ok(rs
            .iter()
            .map(|r| format!("{}.\t{}\tIN\t{}\t{}\n", r.name, r.ttl.as_secs(), r.record_type, r.content))
            .collect())
    }
}

fn window<T>(items: Vec<T>, page: u32, per_page: u32) -> ListPage<T> {
    let total = items.len();
    let start = ((page - 1) * per_page) as usize;
    ListPage {
        items: items.into_iter().skip(start).take(per_page as usize).collect(),
        page,
        per_page,
        total_count: Some(total),
    }
}

pub fn zone(id: &str, name: &str) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
        status: ZoneStatus::Active,
        paused: false,
        name_servers: vec!["ns1.example.net".into(), "ns2.example.net".into()],
        created_on: None,
        modified_on: None,
    }
}

pub fn record(id: &str, record_type: RecordType, name: &str, content: &str) -> Record {
    Record {
        id: id.to_string(),
        record_type,
        name: name.to_string(),
        content: content.to_string(),
        ttl: Ttl::Auto,
        proxied: None,
        comment: None,
        tags: Vec::new(),
        created_on: None,
        modified_on: None,
        priority: None,
        data: None,
        extra: Map::new(),
    }
}

/// 47 records: 12 A, 18 CNAME, 2 MX, 15 TXT
pub fn mixed_zone() -> Vec<Record> {
    let mut out = Vec::new();
    for i in 0..12 {
        let mut r = record(&format!("a-{i}"), RecordType::A, &format!("host{i}.example.com"), &format!("192.0.2.{i}"));
        r.proxied = Some(i % 2 == 0);
        out.push(r);
    }
    for i in 0..18 {
        let mut r = record(&format!("cname-{i}"), RecordType::CNAME, &format!("alias{i}.example.com"), "host0.example.com");
        r.proxied = Some(i < 3);
        out.push(r);
    }
    for i in 0..2 {
        let mut r = record(&format!("mx-{i}"), RecordType::MX, "example.com", &format!("mx{i}.example.com"));
        r.priority = Some(10 * (i + 1));
        out.push(r);
    }
    for i in 0..15 {
        out.push(record(&format!("txt-{i}"), RecordType::TXT, &format!("_txt{i}.example.com"), "v=spf1 -all"));
    }
    out
}
