//! Bounded in-memory store for HTTP quiz sessions.
//!
//! Every access stamps the entry with a logical tick and a wall-clock offset.
//! Inserts first drop entries idle for longer than the configured limit, then,
//! if the store is still full, evict one entry: completed sessions go first,
//! least recently used among equals.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use uuid::Uuid;

use crate::session::QuizSession;

struct StoredSession {
    session: QuizSession,
    last_tick: AtomicU64,
    last_seen_ms: AtomicU64,
}

pub struct SessionStore {
    entries: HashMap<Uuid, StoredSession>,
    capacity: usize,
    idle_limit: Duration,
    epoch: Instant,
    clock: AtomicU64,
}

impl SessionStore {
    pub fn new(capacity: usize, idle_limit: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            idle_limit,
            epoch: Instant::now(),
            clock: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.entries.contains_key(id)
    }

    /// Store `session` under `id`, returning the ids dropped to make room.
    pub fn insert(&mut self, id: Uuid, session: QuizSession) -> Vec<Uuid> {
        let mut dropped = self.drop_idle();
        while self.entries.len() >= self.capacity {
            match self.eviction_candidate() {
                Some(victim) => {
                    self.entries.remove(&victim);
                    dropped.push(victim);
                }
                None => break,
            }
        }
        let entry = StoredSession {
            session,
            last_tick: AtomicU64::new(0),
            last_seen_ms: AtomicU64::new(0),
        };
        self.stamp(&entry);
        self.entries.insert(id, entry);
        dropped
    }

    /// Shared access; still counts as use for eviction purposes.
    pub fn get(&self, id: &Uuid) -> Option<&QuizSession> {
        let entry = self.entries.get(id)?;
        self.stamp(entry);
        Some(&entry.session)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut QuizSession> {
        let tick = self.next_tick();
        let now = self.now_ms();
        let entry = self.entries.get_mut(id)?;
        *entry.last_tick.get_mut() = tick;
        *entry.last_seen_ms.get_mut() = now;
        Some(&mut entry.session)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<QuizSession> {
        self.entries.remove(id).map(|e| e.session)
    }

    fn drop_idle(&mut self) -> Vec<Uuid> {
        let now = self.now_ms();
        let limit = u64::try_from(self.idle_limit.as_millis()).unwrap_or(u64::MAX);
        let idle: Vec<Uuid> = self
            .entries
            .iter()
            .filter(|(_, e)| now.saturating_sub(e.last_seen_ms.load(Ordering::Relaxed)) >= limit)
            .map(|(id, _)| *id)
            .collect();
        for id in &idle {
            self.entries.remove(id);
        }
        idle
    }

    fn eviction_candidate(&self) -> Option<Uuid> {
        self.entries
            .iter()
            .min_by_key(|(_, e)| (!e.session.is_completed(), e.last_tick.load(Ordering::Relaxed)))
            .map(|(id, _)| *id)
    }

    fn stamp(&self, entry: &StoredSession) {
        entry.last_tick.store(self.next_tick(), Ordering::Relaxed);
        entry.last_seen_ms.store(self.now_ms(), Ordering::Relaxed);
    }

    fn next_tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
