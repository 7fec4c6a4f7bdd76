/// Counts the work done by distance queries.
///
/// Coordinates are attribute positions actually compared; a pruned query
/// stops counting at the coordinate that crossed the cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistanceStats {
    coordinates: u64,
    distances: u64,
    pruned: u64,
}

impl DistanceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr_coord_count(&mut self) {
        self.coordinates += 1;
    }

    pub fn incr_distance_count(&mut self) {
        self.distances += 1;
    }

    pub fn incr_pruned_count(&mut self) {
        self.pruned += 1;
    }

    pub fn coordinates(&self) -> u64 {
        self.coordinates
    }

    pub fn distances(&self) -> u64 {
        self.distances
    }

    pub fn pruned(&self) -> u64 {
        self.pruned
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
