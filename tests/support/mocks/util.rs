// tests/support/mocks/util.rs
use inkpost_core::application::ports::util::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("art{:04}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
