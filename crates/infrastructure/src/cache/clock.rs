use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::SystemTime;

static PROCESS_START: LazyLock<SystemTime> = LazyLock::new(SystemTime::now);

/// Pins the process-start epoch. Called once during startup; later calls
/// are no-ops.
pub fn init() {
    LazyLock::force(&PROCESS_START);
}

/// Whole seconds between process start and `time`, clamped to zero.
pub fn secs_since_start(time: SystemTime) -> u64 {
    time.duration_since(*PROCESS_START)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Time base used for cache ages.
///
/// `Process` counts seconds since process start. `Manual` is advanced by
/// hand and lets tests age entries without sleeping.
#[derive(Debug, Clone, Default)]
pub enum CacheClock {
    #[default]
    Process,
    Manual(Arc<AtomicU64>),
}

impl CacheClock {
    pub fn manual(start_secs: u64) -> Self {
        Self::Manual(Arc::new(AtomicU64::new(start_secs)))
    }

    #[inline]
    pub fn now_secs(&self) -> u64 {
        match self {
            Self::Process => secs_since_start(SystemTime::now()),
            Self::Manual(now) => now.load(Ordering::Relaxed),
        }
    }

    /// Moves a manual clock forward. No effect on the process clock.
    pub fn advance(&self, secs: u64) {
        if let Self::Manual(now) = self {
            now.fetch_add(secs, Ordering::Relaxed);
        }
    }
}
