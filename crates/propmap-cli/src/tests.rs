use propmap_core::{ClusterConfig, GeoConfig, PropertyType, SortKey};
use rust_decimal::Decimal;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["propmap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["propmap-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["propmap-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_seed_with_default_path() {
    let cli = Cli::try_parse_from(["propmap-cli", "db", "seed"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { path: None }
        })
    ));
}

#[test]
fn parses_db_seed_with_explicit_path() {
    let cli = Cli::try_parse_from(["propmap-cli", "db", "seed", "--path", "fixtures/cairo.yaml"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { path: Some(ref p) }
        }) if p.to_str() == Some("fixtures/cairo.yaml")
    ));
}

#[test]
fn search_requires_center_and_radius() {
    let result = Cli::try_parse_from(["propmap-cli", "search", "--latitude", "30.04"]);
    assert!(result.is_err());
}

#[test]
fn parses_search_with_filters_and_sort() {
    let cli = Cli::try_parse_from([
        "propmap-cli",
        "search",
        "--latitude",
        "30.0444",
        "--longitude",
        "31.2357",
        "--radius",
        "10",
        "--property-type",
        "apartment",
        "--min-price",
        "1500.50",
        "--bedrooms",
        "2",
        "--sort",
        "price_desc",
        "--page",
        "2",
        "--per-page",
        "20",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    let query = args
        .to_query(&GeoConfig::default())
        .expect("valid search args");

    assert!((query.center.latitude - 30.0444).abs() < 1e-12);
    assert!((query.radius_km - 10.0).abs() < f64::EPSILON);
    assert_eq!(query.filters.property_type, Some(PropertyType::Apartment));
    assert_eq!(query.filters.min_price, Some(Decimal::new(150_050, 2)));
    assert_eq!(query.filters.min_bedrooms, Some(2));
    assert_eq!(query.sort, SortKey::PriceDesc);
    assert_eq!(query.page, 2);
    assert_eq!(query.per_page, 20);
}

#[test]
fn search_defaults_to_distance_sort_and_configured_page_size() {
    let cli = Cli::try_parse_from([
        "propmap-cli",
        "search",
        "--latitude",
        "-33.87",
        "--longitude",
        "151.21",
        "--radius",
        "5",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    let query = args
        .to_query(&GeoConfig::default())
        .expect("valid search args");

    assert_eq!(query.sort, SortKey::Distance);
    assert_eq!(query.page, 1);
    assert_eq!(query.per_page, GeoConfig::default().default_per_page);
    assert!((query.center.latitude + 33.87).abs() < 1e-12);
}

#[test]
fn search_rejects_unknown_sort() {
    let result = Cli::try_parse_from([
        "propmap-cli",
        "search",
        "--latitude",
        "30",
        "--longitude",
        "31",
        "--radius",
        "5",
        "--sort",
        "popularity",
    ]);
    assert!(result.is_err());
}

#[test]
fn search_args_out_of_range_fail_validation() {
    let cli = Cli::try_parse_from([
        "propmap-cli",
        "search",
        "--latitude",
        "95",
        "--longitude",
        "31",
        "--radius",
        "0.05",
        "--per-page",
        "500",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    let err = args
        .to_query(&GeoConfig::default())
        .expect_err("out-of-range args must fail");

    assert!(err.fields.contains("latitude"));
    assert!(err.fields.contains("radius"));
    assert!(err.fields.contains("per_page"));
    assert!(!err.fields.contains("longitude"));
}

#[test]
fn parses_clusters_command() {
    let cli = Cli::try_parse_from([
        "propmap-cli",
        "clusters",
        "--north",
        "30.2",
        "--south",
        "30.0",
        "--east",
        "31.4",
        "--west",
        "31.2",
        "--zoom",
        "8",
        "--max-price",
        "5000",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Clusters(args)) = cli.command else {
        panic!("expected clusters command");
    };
    let query = args
        .to_query(&ClusterConfig::default())
        .expect("valid cluster args");

    assert_eq!(query.zoom_level, 8);
    assert!((query.bounds.north - 30.2).abs() < 1e-12);
    assert_eq!(query.max_price, Some(Decimal::from(5000)));
    assert!(query.property_type.is_none());
}

#[test]
fn flipped_cluster_bounds_fail_validation() {
    let cli = Cli::try_parse_from([
        "propmap-cli",
        "clusters",
        "--north",
        "30.0",
        "--south",
        "30.2",
        "--east",
        "31.4",
        "--west",
        "31.2",
        "--zoom",
        "25",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Clusters(args)) = cli.command else {
        panic!("expected clusters command");
    };
    let err = args
        .to_query(&ClusterConfig::default())
        .expect_err("flipped bounds must fail");

    assert!(err.fields.contains("zoom_level"));
    assert!(err.fields.len() >= 2);
}
