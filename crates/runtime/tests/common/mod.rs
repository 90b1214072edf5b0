#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use hexalchemy_core::{Input, InputError, Output, Prompt, Shown};
use hexalchemy_runtime::{HistoryEntry, Runtime, RuntimeConfig, Snapshot};
use tracing_subscriber::EnvFilter;

pub const SEED: u64 = 0x5eed;

/// Routes runtime logs to the test harness. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn runtime() -> Runtime {
    init_tracing();
    Runtime::new(RuntimeConfig {
        seed: Some(SEED),
        event_buffer_size: 4096,
        question_buffer_size: 4,
    })
}

/// Walks through options with a fixed stride and abandons the prompt once
/// `limit` answers were given. Never gives an invalid answer, so the number
/// of answers it gave always matches the recorded history.
pub struct StridePlayer {
    counter: AtomicU32,
    limit: u32,
}

impl StridePlayer {
    pub fn new(limit: u32) -> Arc<Self> {
        Self::starting_at(0, limit)
    }

    /// Continues the stride of a player that already answered `start` times.
    pub fn starting_at(start: u32, limit: u32) -> Arc<Self> {
        Arc::new(Self {
            counter: AtomicU32::new(start),
            limit,
        })
    }
}

#[async_trait]
impl Input for StridePlayer {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        if n >= self.limit {
            return Err(InputError::Cancelled {
                key: prompt.key.clone(),
            });
        }
        let span = u64::from(hi - lo) + 1;
        Ok(lo + (u64::from(n) * 7 % span) as u32)
    }
}

impl Output for StridePlayer {
    fn show(&self, _prompt: &Prompt, _value: &Shown) {}
}

pub fn answers_in(snapshot: &Snapshot) -> u32 {
    snapshot
        .history
        .iter()
        .filter(|entry| matches!(entry, HistoryEntry::Answered { .. }))
        .count() as u32
}

/// Plays a stride game to its end and returns the last committed snapshot.
pub async fn play_stride(seed: u64, limit: u32) -> Snapshot {
    let mut runtime = runtime();
    runtime
        .start_new_game_with(seed, StridePlayer::new(limit))
        .await
        .expect("game starts");
    let ended = runtime.join().await;
    assert!(
        ended.as_ref().is_ok() || ended.as_ref().is_err_and(|e| e.is_cancelled()),
        "unexpected end: {ended:?}"
    );
    runtime.snapshot().expect("at least the start was committed")
}
