pub mod nearest_neighbour;

pub use nearest_neighbour::NearestNeighbour;
