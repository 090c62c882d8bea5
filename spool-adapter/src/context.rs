//! Scoped host execution context
//!
//! Some backends expect ambient host state (request/session) to be active
//! while they run. The adapter enters the context right before a gating
//! call and leaves it right after, through [`ContextGuard`].

/// Host application context that can be entered and left
pub trait HostContext {
    fn enter(&self);
    fn exit(&self);

    /// Enter the context; it is left when the guard drops
    fn activate(&self) -> ContextGuard<'_, Self>
    where
        Self: Sized,
    {
        self.enter();
        ContextGuard { context: self }
    }
}

impl<C: HostContext + ?Sized> HostContext for &C {
    fn enter(&self) {
        (**self).enter();
    }

    fn exit(&self) {
        (**self).exit();
    }
}

/// Active host context. Leaves the context on drop, including on unwind.
#[must_use = "the context is left as soon as the guard is dropped"]
pub struct ContextGuard<'a, C: HostContext> {
    context: &'a C,
}

impl<C: HostContext> Drop for ContextGuard<'_, C> {
    fn drop(&mut self) {
        self.context.exit();
    }
}

/// Context for backends that need no ambient host state
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopContext;

impl HostContext for NoopContext {
    fn enter(&self) {}
    fn exit(&self) {}
}
