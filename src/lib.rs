//! # svo
//!
//! A recognizer for a tiny subject-verb-object subset of Spanish.
//!
//! File Layout
//!
//! The library keeps the grammar core (lexicon, lexing, parsing, trace, tree) apart from
//! the tooling that consumes it (formats, fixtures, testing). Tooling only ever touches the
//! public parse operations and the tree shape, so renderers and runners can change without
//! touching the engine.
//!
//! src/svo
//!   ├── lexicon      Closed vocabulary, categories and the embedded default lexicon
//!   ├── lexing       Sentence normalization into tokens
//!   ├── parsing      The backtracking engine, the reference combinator parser and comparison
//!   ├── trace        Trace events and sinks
//!   ├── tree         Derivation tree model
//!   ├── formats      Tree and trace renderers
//!   ├── fixtures     Regression runner over sentence fixture files
//!   └── testing      Fluent tree assertions for tests
//!
//! For testing guidelines, see the [testing module](svo::testing).

pub mod svo;
