//! Unit tests for the rule engine.
//!
//! Tests are organised by rule family: transition graphs, authorization and
//! aggregate consistency.
