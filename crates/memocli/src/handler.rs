//! Command handler: runs parsed commands against a cache

use memocache::SharedCache;
use serde::Serialize;
use tracing::debug;

use crate::command::Command;
use crate::reply::Reply;

/// Executes commands against one shared cache
pub struct CommandHandler {
    cache: SharedCache<String>,
    json: bool,
}

/// Body of the `INFO` reply
#[derive(Debug, Serialize)]
struct InfoReport {
    policy: String,
    len: usize,
    capacity: usize,
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    hit_ratio: f64,
}

impl CommandHandler {
    pub fn new(cache: SharedCache<String>, json: bool) -> Self {
        Self { cache, json }
    }

    pub fn handle(&self, cmd: Command) -> Reply {
        match cmd {
            Command::Set { key, value } => self.handle_set(key, value),
            Command::Get(key) => self.handle_get(&key),
            Command::Peek(key) => self.handle_peek(&key),
            Command::Del(key) => self.handle_del(&key),
            Command::Exists(key) => Reply::Integer(self.cache.contains(&key) as i64),
            Command::Keys => Reply::List(self.cache.keys()),
            Command::Dump => self.handle_dump(),
            Command::Len => Reply::Integer(self.cache.len() as i64),
            Command::Info => self.handle_info(),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
        }
    }

    fn handle_set(&self, key: String, value: String) -> Reply {
        if let Some(previous) = self.cache.set(key.as_str(), value) {
            debug!(key = %key, previous = %previous, "value replaced");
        }
        Reply::Ok
    }

    fn handle_get(&self, key: &str) -> Reply {
        match self.cache.get(key) {
            Ok(value) => Reply::Bulk(value),
            Err(e) if e.is_miss() => Reply::Nil,
            Err(e) => Reply::Error(format!("ERR {}", e)),
        }
    }

    fn handle_peek(&self, key: &str) -> Reply {
        match self.cache.peek(key) {
            Some(value) => Reply::Bulk(value),
            None => Reply::Nil,
        }
    }

    fn handle_del(&self, key: &str) -> Reply {
        Reply::Integer(self.cache.remove(key).is_some() as i64)
    }

    fn handle_dump(&self) -> Reply {
        let order = self.cache.with(|cache| {
            if cache.is_empty() {
                "(empty)".to_string()
            } else {
                cache.to_string()
            }
        });
        Reply::Text(order)
    }

    fn handle_info(&self) -> Reply {
        let (policy, len, capacity) = self
            .cache
            .with(|cache| (cache.policy().to_string(), cache.len(), cache.capacity()));
        let stats = self.cache.stats();

        let report = InfoReport {
            policy,
            len,
            capacity,
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            updates: stats.updates,
            evictions: stats.evictions,
            hit_ratio: stats.hit_ratio,
        };

        if self.json {
            return match serde_json::to_string(&report) {
                Ok(json) => Reply::Text(json),
                Err(e) => Reply::Error(format!("ERR {}", e)),
            };
        }

        Reply::Text(format!(
            "# Cache\n\
             policy:{}\n\
             len:{}\n\
             capacity:{}\n\
             \n\
             # Stats\n\
             hits:{}\n\
             misses:{}\n\
             inserts:{}\n\
             updates:{}\n\
             evictions:{}\n\
             hit_ratio:{:.2}",
            report.policy,
            report.len,
            report.capacity,
            report.hits,
            report.misses,
            report.inserts,
            report.updates,
            report.evictions,
            report.hit_ratio,
        ))
    }
}
