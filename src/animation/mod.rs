pub(crate) mod ease;
pub(crate) mod ticker;
pub(crate) mod tween;
