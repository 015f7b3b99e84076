//! Unit test modules.

mod recommendation_test;
