//! Internal helper macros.

/// Returns early with `Err($error)` when `$predicate` does not hold.
///
/// Used by route registration, where a bad set of route items must be
/// rejected before anything is appended to the registry.
///
/// ```ignore
/// ensure!(handler.is_none(), RouteError::MultipleHandlers);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
