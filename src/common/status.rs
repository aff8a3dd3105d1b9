//! 状态栏
//!
//! 单行状态文本。`show` 的消息在延迟后自动清空，新消息到达时会取消并替换旧的定时器。

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

struct StatusInner {
    tx: watch::Sender<String>,
    /// Bumped on every message; a timer only clears the line it was armed for
    generation: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl StatusInner {
    fn publish(&self, msg: String) -> u64 {
        let mut timer = self.timer.lock();
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(target: "status", "{msg}");
        self.tx.send_replace(msg);
        generation
    }
}

/// Status line shared by the controller and whatever renders it
pub struct StatusBoard {
    inner: Arc<StatusInner>,
    default_delay: Duration,
}

impl StatusBoard {
    pub fn new(default_delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self {
            inner: Arc::new(StatusInner {
                tx,
                generation: AtomicU64::new(0),
                timer: Mutex::new(None),
            }),
            default_delay,
        }
    }

    /// Sticky message, stays until replaced
    pub fn set(&self, msg: impl Into<String>) {
        self.inner.publish(msg.into());
    }

    /// Timed message using the default delay
    pub fn show(&self, msg: impl Into<String>) {
        self.show_for(msg, self.default_delay);
    }

    /// Timed message; a zero delay behaves like [`StatusBoard::set`]
    pub fn show_for(&self, msg: impl Into<String>, delay: Duration) {
        let generation = self.inner.publish(msg.into());
        if delay.is_zero() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime, status message will not auto-clear");
            return;
        };

        let inner = Arc::clone(&self.inner);
        let mut timer = self.inner.timer.lock();
        // 另一个消息抢先发布了，不再为旧消息挂定时器
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        *timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut timer = inner.timer.lock();
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.tx.send_replace(String::new());
                *timer = None;
            }
        }));
    }

    pub fn clear(&self) {
        self.inner.publish(String::new());
    }

    pub fn current(&self) -> String {
        self.inner.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.inner.tx.subscribe()
    }

    pub fn default_delay(&self) -> Duration {
        self.default_delay
    }
}

impl Drop for StatusBoard {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.timer.lock().take() {
            handle.abort();
        }
    }
}
