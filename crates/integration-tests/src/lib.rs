//! End-to-end tests for voxgate live under `tests/`
