//! Property-based tests for the wheel search and the pipeline.
