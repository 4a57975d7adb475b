/// Tunables for radius search and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoConfig {
    pub min_radius_km: f64,
    pub max_radius_km: f64,
    pub default_per_page: u32,
    pub max_per_page: u32,
    pub cluster: ClusterConfig,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            min_radius_km: 0.1,
            max_radius_km: 50.0,
            default_per_page: 15,
            max_per_page: 50,
            cluster: ClusterConfig::default(),
        }
    }
}

/// Zoom thresholds, grid sizes (degrees) and the candidate cap used by the
/// map clusterer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    /// At or above this zoom, listings are returned as individual markers.
    pub individual_min_zoom: u8,
    /// Zoom at which the grid switches from coarse to medium.
    pub medium_min_zoom: u8,
    /// Zoom at which the grid switches from medium to fine.
    pub fine_min_zoom: u8,
    pub coarse_grid_deg: f64,
    pub medium_grid_deg: f64,
    pub fine_grid_deg: f64,
    /// Upper bound on listings considered per viewport.
    pub candidate_cap: usize,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            individual_min_zoom: 15,
            medium_min_zoom: 10,
            fine_min_zoom: 13,
            coarse_grid_deg: 0.1,
            medium_grid_deg: 0.05,
            fine_grid_deg: 0.01,
            candidate_cap: 500,
            min_zoom: 1,
            max_zoom: 20,
        }
    }
}
