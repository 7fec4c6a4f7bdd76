mod nearest_neighbours;
mod pairwise_distances;

pub use nearest_neighbours::{NearestNeighbourSearch, Neighbour};
pub use pairwise_distances::pairwise_distances;
