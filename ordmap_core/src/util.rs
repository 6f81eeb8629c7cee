use std::sync::Arc;

pub fn arc_take<T: Clone>(arc: Arc<T>) -> T {
    Arc::try_unwrap(arc).unwrap_or_else(|arc| arc.as_ref().clone())
}
