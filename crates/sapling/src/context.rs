//! Evaluation context configuration

/// Configuration for an [`Interpreter`](crate::Interpreter).
///
/// Fixed at construction and consulted on every nested evaluation.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Maximum nesting of non-tail evaluations (stack overflow protection)
    pub max_call_depth: usize,

    /// Whether to trace every trampoline step (for debugging)
    pub trace: bool,

    /// Live scope count above which `rep` reclaims unreachable scopes
    pub gc_threshold: usize,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
            trace: false,
            gc_threshold: 4096,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
            ..Default::default()
        }
    }

    /// Enable or disable step tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Set the live scope count that triggers reclamation in `rep`.
    pub fn with_gc_threshold(mut self, threshold: usize) -> Self {
        self.gc_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = EvalContext::default();
        assert_eq!(ctx.max_call_depth, 1000);
        assert!(!ctx.trace);
        assert_eq!(ctx.gc_threshold, 4096);
    }

    #[test]
    fn test_builders() {
        let ctx = EvalContext::with_max_call_depth(10)
            .with_trace(true)
            .with_gc_threshold(8);
        assert_eq!(ctx.max_call_depth, 10);
        assert!(ctx.trace);
        assert_eq!(ctx.gc_threshold, 8);
    }
}
