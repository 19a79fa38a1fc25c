//! LLC hook and eviction policy tests.
