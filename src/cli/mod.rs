//! # CLI Module
//!
//! Command-line front end of the `metagen` binary.
//!
//! ## Commands
//!
//! ### `gen-code`
//!
//! Render one template against one Metadata:
//!
//! ```bash
//! metagen --bundle catalog.yaml gen-code --template tpl-model --metadata md-cell
//! ```
//!
//! ### `gen-service`
//!
//! Generate every enabled CodeFile and service functional of a service,
//! optionally writing them under `{output}/{package}/{dir}/{name}`:
//!
//! ```bash
//! metagen --bundle catalog.yaml --output-dir ./temp gen-service --service svc-mes --write
//! ```
//!
//! ### `gen-file-template` / `gen-functional-template`
//!
//! Run a single FileTemplate chain, or every FileTemplate of a
//! FunctionalTemplate, for one Metadata.
//!
//! ### `inspect`
//!
//! List the catalog, or show the derived fields (unique key, accessors,
//! preloads) of one Metadata.
//!
//! ## Configuration
//!
//! Global flags override `metagen.toml`, which overrides the built-in
//! defaults. See [`crate::config`].

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
