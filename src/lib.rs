//! Jump-range proximity graphs and shortest jump routes between star systems.
//!
//! Given named 3D positions and a jump range, [`ProximityGraph::build`] links
//! every pair of systems no further apart than the range, and
//! [`shortest_path`] finds the route with the smallest total distance, or
//! reports [`PathOutcome::Unreachable`] when the range is too short.
//!
//! ```
//! use starnav_core::{shortest_path, PathOutcome, ProximityGraph};
//!
//! let points = vec![
//!     ("Sol".to_string(), [0.0, 0.0, 0.0]),
//!     ("Corner".to_string(), [3.0, 0.0, 0.0]),
//!     ("Far".to_string(), [3.0, 4.0, 0.0]),
//! ];
//! let g = ProximityGraph::build(&points, 4.0).unwrap();
//! let PathOutcome::Found(path) = shortest_path(&g, &"Sol".to_string(), &"Far".to_string()).unwrap() else {
//!     panic!("expected a route");
//! };
//! assert_eq!(path.stops, ["Sol", "Corner", "Far"]);
//! assert_eq!(path.total, 7.0);
//! ```
//!
//! [`Navigator`] wraps a [`Catalog`] and keeps the graph for the current range
//! as a shareable snapshot that is replaced wholesale on every range change.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod heap;
pub mod metric;
pub mod navigator;

pub use analysis::{absolute_min_jump_range, bottleneck_range, connected_components, connecting_range, required_jump_range};
pub use catalog::{Catalog, StarSystem};
pub use config::NavConfig;
pub use dijkstra::{shortest_path, shortest_path_tree, shortest_path_with_stats, JumpPath, PathOutcome, SearchStats, ShortestPathTree};
pub use error::{NavError, Result};
pub use graph::{Edge, ProximityGraph};
pub use heap::{HeapStats, MinHeap};
pub use metric::{euclidean, Euclidean, Metric, Position};
pub use navigator::{Navigator, SystemGraph};
