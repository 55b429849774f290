//! Test-only crate. See `tests/` for end-to-end scenarios that drive the
//! HTTP router through a real completion client against a mock server.
