// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Registration tables for the SkyWalking v2 string-interning protocol.
//!
//! Agents register service names, instance UUIDs, endpoint names and peer
//! network addresses ahead of trace data and then reference them by numeric
//! id. The store is injected into the v2 receiver at construction so
//! concurrent receiver instances never share ambient state. Entries live for
//! the process lifetime; nothing is ever evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::RwLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryTable {
    Service,
    ServiceInstance,
    Endpoint,
    NetAddress,
}

pub trait RegistrationStore: Send + Sync {
    /// Returns the id already interned for `name`, or assigns a fresh one.
    /// Concurrent registrations of the same name must agree on the id.
    fn get_or_register(&self, table: RegistryTable, name: &str) -> i32;

    fn lookup_name(&self, table: RegistryTable, id: i32) -> Option<String>;

    fn lookup_id(&self, table: RegistryTable, name: &str) -> Option<i32>;
}

#[derive(Debug, Default)]
struct BiMap {
    by_name: HashMap<String, i32>,
    by_id: HashMap<i32, String>,
}

/// Process-lifetime in-memory store. Ids come from a single monotonic
/// counter shared by all four tables.
#[derive(Debug)]
pub struct InMemoryRegistry {
    services: RwLock<BiMap>,
    instances: RwLock<BiMap>,
    endpoints: RwLock<BiMap>,
    addresses: RwLock<BiMap>,
    next_id: AtomicI32,
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        InMemoryRegistry {
            services: RwLock::default(),
            instances: RwLock::default(),
            endpoints: RwLock::default(),
            addresses: RwLock::default(),
            next_id: AtomicI32::new(1),
        }
    }
}

impl InMemoryRegistry {
    fn table(&self, table: RegistryTable) -> &RwLock<BiMap> {
        match table {
            RegistryTable::Service => &self.services,
            RegistryTable::ServiceInstance => &self.instances,
            RegistryTable::Endpoint => &self.endpoints,
            RegistryTable::NetAddress => &self.addresses,
        }
    }
}

impl RegistrationStore for InMemoryRegistry {
    fn get_or_register(&self, table: RegistryTable, name: &str) -> i32 {
        let map = self.table(table);
        if let Ok(guard) = map.read() {
            if let Some(&id) = guard.by_name.get(name) {
                return id;
            }
        }
        let Ok(mut guard) = map.write() else {
            // A poisoned table means a panic mid-insert; fall back to a
            // fresh id rather than propagating the poison to the stream.
            return self.next_id.fetch_add(1, Ordering::SeqCst);
        };
        // Double-checked: another stream may have registered the name while
        // we waited for the write lock.
        if let Some(&id) = guard.by_name.get(name) {
            return id;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        guard.by_name.insert(name.to_string(), id);
        guard.by_id.insert(id, name.to_string());
        id
    }

    fn lookup_name(&self, table: RegistryTable, id: i32) -> Option<String> {
        self.table(table)
            .read()
            .ok()
            .and_then(|guard| guard.by_id.get(&id).cloned())
    }

    fn lookup_id(&self, table: RegistryTable, name: &str) -> Option<i32> {
        self.table(table)
            .read()
            .ok()
            .and_then(|guard| guard.by_name.get(name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn registration_is_idempotent() {
        let registry = InMemoryRegistry::default();
        let first = registry.get_or_register(RegistryTable::Service, "billing");
        let second = registry.get_or_register(RegistryTable::Service, "billing");
        assert_eq!(first, second);
        assert_eq!(
            registry.lookup_name(RegistryTable::Service, first).as_deref(),
            Some("billing")
        );
        assert_eq!(
            registry.lookup_id(RegistryTable::Service, "billing"),
            Some(first)
        );
    }

    #[test]
    fn tables_are_independent() {
        let registry = InMemoryRegistry::default();
        let service = registry.get_or_register(RegistryTable::Service, "billing");
        assert!(registry.lookup_name(RegistryTable::Endpoint, service).is_none());
    }

    #[test]
    fn lookup_miss_returns_none() {
        let registry = InMemoryRegistry::default();
        assert!(registry.lookup_name(RegistryTable::Service, 404).is_none());
    }

    #[test]
    fn concurrent_registrations_never_duplicate_ids() {
        let registry = Arc::new(InMemoryRegistry::default());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let mut ids = Vec::new();
                for i in 0..50 {
                    // Half the names collide across workers.
                    let name = format!("svc-{}", (worker * 50 + i) % 100);
                    let id = registry.get_or_register(RegistryTable::Service, &name);
                    ids.push((name, id));
                }
                ids
            }));
        }
        let mut name_to_id: HashMap<String, i32> = HashMap::new();
        let mut seen_ids = HashSet::new();
        for handle in handles {
            for (name, id) in handle.join().unwrap() {
                if let Some(&existing) = name_to_id.get(&name) {
                    assert_eq!(existing, id, "same name must intern to same id");
                } else {
                    name_to_id.insert(name, id);
                }
            }
        }
        for id in name_to_id.values() {
            assert!(seen_ids.insert(*id), "distinct names must get distinct ids");
        }
    }
}
