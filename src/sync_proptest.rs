//! Property-based tests for the synchronization engine.
//!
//! Random source and destination phases are built over a small pool of file
//! references, so duplicates and overlaps are common.
