//! Source frontends.
//!
//! A frontend turns source files into [`crate::ir::Model`] records and
//! recovers the project facts (import path, namespace, database) that
//! templates need. Go is the only supported source language.

pub mod go;
