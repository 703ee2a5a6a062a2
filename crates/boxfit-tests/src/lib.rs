//! Integration tests for boxfit crates.
//!
//! End-to-end checks across `boxfit-core` and `boxfit-ops`: letterbox
//! sessions driven through the host boundary, color remapping on whole
//! images, and serialized output shapes.
