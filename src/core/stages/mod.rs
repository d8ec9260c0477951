//! Pipeline stage implementations.
//!
//! One function per stage, executed in reverse order (WB, MEM, EX, ID, IF)
//! each cycle so that every stage consumes its input latch before the
//! upstream stage refills it.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory_access;
pub mod write_back;
