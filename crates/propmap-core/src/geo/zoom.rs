use super::config::ClusterConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    Individual,
    Cluster { grid_size: f64 },
}

/// Pick individual markers or a clustering grid for a zoom level.
#[must_use]
pub fn select_display_mode(zoom: u8, config: &ClusterConfig) -> DisplayMode {
    if zoom >= config.individual_min_zoom {
        DisplayMode::Individual
    } else if zoom < config.medium_min_zoom {
        DisplayMode::Cluster {
            grid_size: config.coarse_grid_deg,
        }
    } else if zoom < config.fine_min_zoom {
        DisplayMode::Cluster {
            grid_size: config.medium_grid_deg,
        }
    } else {
        DisplayMode::Cluster {
            grid_size: config.fine_grid_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(zoom: u8) -> DisplayMode {
        select_display_mode(zoom, &ClusterConfig::default())
    }

    #[test]
    fn high_zoom_shows_individual_markers() {
        assert_eq!(mode(15), DisplayMode::Individual);
        assert_eq!(mode(16), DisplayMode::Individual);
        assert_eq!(mode(20), DisplayMode::Individual);
    }

    #[test]
    fn grid_size_thresholds() {
        assert_eq!(mode(1), DisplayMode::Cluster { grid_size: 0.1 });
        assert_eq!(mode(5), DisplayMode::Cluster { grid_size: 0.1 });
        assert_eq!(mode(9), DisplayMode::Cluster { grid_size: 0.1 });
        assert_eq!(mode(10), DisplayMode::Cluster { grid_size: 0.05 });
        assert_eq!(mode(12), DisplayMode::Cluster { grid_size: 0.05 });
        assert_eq!(mode(13), DisplayMode::Cluster { grid_size: 0.01 });
        assert_eq!(mode(14), DisplayMode::Cluster { grid_size: 0.01 });
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = ClusterConfig {
            individual_min_zoom: 12,
            ..ClusterConfig::default()
        };
        assert_eq!(select_display_mode(12, &config), DisplayMode::Individual);
        assert_eq!(
            select_display_mode(11, &config),
            DisplayMode::Cluster { grid_size: 0.05 }
        );
    }
}
