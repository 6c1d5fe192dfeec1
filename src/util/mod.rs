//! Small cross-cutting helpers.

pub mod storage;
