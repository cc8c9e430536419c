//! sober: threaded argumentation trees
//!
//! A thesis is the root of a tree of bricks; pro, contra, question and
//! comment bricks react to their parent. The engine computes, for any brick,
//! its position in the tree (levels, indentation, typed sibling index, child
//! counts per type) and a compact title tag such as `!1✓2⚡1`.
//!
//! Layers:
//! - `domain`: bricks, the brick arena, the repository boundary
//! - `application`: tree walker, title tags, root locator, tree service
//! - `infrastructure`: fixture files, filesystem, dependency wiring
//! - `config`: layered settings
//! - `cli`: command line interface

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
