use spin::Once;

/// A handler installed once at boot and read on every trap.
pub(crate) struct HandlerSlot<H: ?Sized + 'static> {
    inner: Once<&'static H>,
}

impl<H: ?Sized + 'static> HandlerSlot<H> {
    pub const fn new() -> Self {
        Self { inner: Once::new() }
    }

    /// Installs `handler`. Returns `false` and keeps the old one if the slot
    /// was already filled.
    pub fn install(&self, handler: &'static H) -> bool {
        let mut installed = false;
        self.inner.call_once(|| {
            installed = true;
            handler
        });
        installed
    }

    pub fn get(&self) -> Option<&'static H> {
        self.inner.get().copied()
    }
}
