//! Cross-crate invariant tests live in `tests/`.
