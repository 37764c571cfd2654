use std::sync::{LazyLock, Mutex, MutexGuard};

/// Process-wide serializer state shared by every builder.
#[derive(Debug, Default)]
struct RuntimeState {
    /// Live [`XmlRuntime`] handles.
    handles: usize,
    /// Set by [`XmlRuntime::init`], keeps the runtime alive without handles.
    pinned: bool,
    initialized: bool,
    /// How many times the runtime has been initialized in this process.
    init_count: u64,
}

impl RuntimeState {
    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialized = true;
            self.init_count += 1;
            tracing::debug!(init_count = self.init_count, "XML runtime initialized");
        }
    }

    fn teardown_if_unused(&mut self) {
        if self.initialized && self.handles == 0 && !self.pinned {
            self.initialized = false;
            tracing::debug!("XML runtime torn down");
        }
    }
}

static RUNTIME: LazyLock<Mutex<RuntimeState>> = LazyLock::new(Default::default);

fn state() -> MutexGuard<'static, RuntimeState> {
    // The state is a handful of counters and stays consistent even if a
    // holder panicked.
    RUNTIME.lock().unwrap_or_else(|e| e.into_inner())
}

/// Handle to the process-wide XML runtime.
///
/// The runtime is initialized when the first handle is acquired and torn down
/// when the last handle is dropped, unless it was pinned with
/// [`XmlRuntime::init`]. Both transitions happen under a mutex and are safe
/// under concurrent first use.
#[derive(Debug)]
pub struct XmlRuntime {
    _private: (),
}

impl XmlRuntime {
    pub fn acquire() -> Self {
        let mut state = state();
        state.ensure_initialized();
        state.handles += 1;
        Self { _private: () }
    }

    /// Initialize and pin the runtime until [`XmlRuntime::shutdown`].
    /// Calling it again while pinned does nothing.
    pub fn init() {
        let mut state = state();
        state.ensure_initialized();
        state.pinned = true;
    }

    /// Unpin the runtime. It is torn down right away if no handle is alive,
    /// otherwise when the last handle drops. Calling it again does nothing.
    pub fn shutdown() {
        let mut state = state();
        state.pinned = false;
        state.teardown_if_unused();
    }

    pub fn is_initialized() -> bool {
        state().initialized
    }

    pub fn init_count() -> u64 {
        state().init_count
    }
}

impl Clone for XmlRuntime {
    fn clone(&self) -> Self {
        Self::acquire()
    }
}

impl Drop for XmlRuntime {
    fn drop(&mut self) {
        let mut state = state();
        state.handles = state.handles.saturating_sub(1);
        state.teardown_if_unused();
    }
}
