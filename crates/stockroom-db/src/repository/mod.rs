//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.products().get_by_id(42)                             │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id / get_all / search                                      │
//! │  ├── create / bulk_create                                              │
//! │  ├── update / partial_update                                           │
//! │  └── delete                                                            │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  The repository is the only writer of persisted state.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and search

pub mod product;
