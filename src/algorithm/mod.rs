/// Fixed-capacity tile id sets
pub mod bitset;
/// Per-direction adjacency relation between tiles
pub mod compatibility;
/// Collapse engine driving the grid to completion
pub mod executor;
/// Breadth-first constraint propagation
pub mod propagation;
/// Minimum-entropy cell selection and seedable random choices
pub mod selection;
