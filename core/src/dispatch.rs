//! Fire-and-forget command dispatch.
//!
//! Views hold a [`Dispatch`] handle instead of the store itself. A dispatched
//! command returns immediately; its outcome surfaces later through the
//! store's state.

use std::sync::Arc;

/// Accepts commands destined for a store
pub trait Dispatch<A>: Send + Sync {
    /// Queue `action` for processing. Never blocks on the outcome.
    fn dispatch(&self, action: A);
}

impl<A, D> Dispatch<A> for Arc<D>
where
    D: Dispatch<A> + ?Sized,
{
    fn dispatch(&self, action: A) {
        (**self).dispatch(action);
    }
}

impl<A, D> Dispatch<A> for &D
where
    D: Dispatch<A> + ?Sized,
{
    fn dispatch(&self, action: A) {
        (**self).dispatch(action);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<u8>>);

    impl Dispatch<u8> for Collect {
        fn dispatch(&self, action: u8) {
            self.0.lock().unwrap().push(action);
        }
    }

    #[test]
    fn test_arc_and_ref_forward_in_order() {
        let inner = Arc::new(Collect::default());
        let shared: Arc<dyn Dispatch<u8>> = inner.clone();

        shared.dispatch(1);
        (&*inner).dispatch(2);
        inner.dispatch(3);

        assert_eq!(*inner.0.lock().unwrap(), vec![1, 2, 3]);
    }
}
