//! Unit tests for instance loading and configuration.

use std::io::Cursor;
use std::time::Duration;
use tsp_ils::acceptance::AcceptanceKind;
use tsp_ils::config::Config;
use tsp_ils::problem::{known_optimum, DistanceOracle, EdgeWeightType, Node, Problem};
use tsp_ils::utils::{format_duration, percentage_error, ProgressRecord};
use tsp_ils::Error;

const SMALL_INSTANCE: &str = "\
NAME : small5
COMMENT : five points
TYPE : TSP
DIMENSION : 5
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 3 4
3 10 0
4 10 10
5 0 10.6
EOF
";

#[test]
fn test_parse_tsplib_instance() {
    let problem = Problem::from_reader(Cursor::new(SMALL_INSTANCE)).unwrap();

    assert_eq!(problem.name, "small5");
    assert_eq!(problem.get_node_count(), 5);
    assert_eq!(problem.dimension(), 5);
    assert_eq!(problem.weight_type, EdgeWeightType::Euc2d);

    // Ids are remapped to 0-based indices
    assert_eq!(problem.weight(0, 1), 5.0);
    // 10.6 rounds to 11
    assert_eq!(problem.weight(0, 4), 11.0);
    // Symmetric with zero diagonal
    for a in 0..5 {
        assert_eq!(problem.weight(a, a), 0.0);
        for b in 0..5 {
            assert_eq!(problem.weight(a, b), problem.weight(b, a));
        }
    }
}

#[test]
fn test_parse_ceil_and_att() {
    let ceil = SMALL_INSTANCE.replace("EUC_2D", "CEIL_2D");
    let problem = Problem::from_reader(Cursor::new(ceil)).unwrap();
    assert_eq!(problem.weight(0, 4), 11.0);
    assert_eq!(problem.weight(0, 1), 5.0);

    let att = SMALL_INSTANCE.replace("EUC_2D", "ATT");
    let problem = Problem::from_reader(Cursor::new(att)).unwrap();
    // sqrt(100 / 10) = 3.16 -> 4
    assert_eq!(problem.weight(0, 2), 4.0);
}

#[test]
fn test_parse_rejects_unsupported_weight_type() {
    let geo = SMALL_INSTANCE.replace("EUC_2D", "GEO");
    let err = Problem::from_reader(Cursor::new(geo)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedWeightType(ref t) if t == "GEO"));
}

#[test]
fn test_parse_rejects_dimension_mismatch() {
    let wrong = SMALL_INSTANCE.replace("DIMENSION : 5", "DIMENSION : 6");
    let err = Problem::from_reader(Cursor::new(wrong)).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 6,
            found: 5
        }
    ));
}

#[test]
fn test_parse_rejects_missing_coordinates() {
    let text = "NAME : empty\nDIMENSION : 0\nEOF\n";
    let err = Problem::from_reader(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, Error::MissingCoordinates));
}

#[test]
fn test_parse_rejects_bad_coordinate() {
    let bad = SMALL_INSTANCE.replace("3 10 0", "3 ten 0");
    let err = Problem::from_reader(Cursor::new(bad)).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 9, .. }));
}

#[test]
fn test_exact_problem_and_matrix() {
    let problem = Problem::new(
        "Exact".to_string(),
        vec![Node::new(0, 0.0, 0.0), Node::new(1, 1.0, 1.0)],
    );
    assert!((problem.weight(0, 1) - 2.0_f64.sqrt()).abs() < 1e-12);

    let matrix = Problem::from_matrix(
        "Matrix".to_string(),
        vec![vec![0.0, 2.0, 9.0], vec![2.0, 0.0, 4.0], vec![9.0, 4.0, 0.0]],
    )
    .unwrap();
    assert_eq!(matrix.dimension(), 3);
    assert_eq!(matrix.weight(2, 1), 4.0);
    assert_eq!(matrix.weight_type, EdgeWeightType::Explicit);
}

#[test]
fn test_ragged_matrix_is_rejected() {
    let err = Problem::from_matrix(
        "Ragged".to_string(),
        vec![vec![0.0, 2.0, 9.0], vec![2.0, 0.0], vec![9.0, 4.0, 0.0]],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::RaggedMatrix {
            row: 1,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_parse_rejects_invalid_dimension() {
    for value in ["-5", "5.5", "five"] {
        let bad = SMALL_INSTANCE.replace("DIMENSION : 5", &format!("DIMENSION : {}", value));
        let err = Problem::from_reader(Cursor::new(bad)).unwrap_err();
        assert!(
            matches!(err, Error::Parse { line: 4, .. }),
            "accepted DIMENSION {}",
            value
        );
    }
}

#[test]
fn test_known_optimum() {
    assert_eq!(known_optimum("kroA100"), Some(21282.0));
    assert_eq!(known_optimum("rl5915"), Some(565530.0));
    assert_eq!(known_optimum("unknown"), None);
    assert!((percentage_error(22347.0, 21282.0) - 5.004228926).abs() < 1e-6);
}

#[test]
fn test_config_validation() {
    assert!(Config::new().validate().is_ok());

    let bad_cooling = Config::new().with_cooling_factor(1.0);
    assert!(matches!(bad_cooling.validate(), Err(Error::InvalidConfig(_))));

    let bad_temperature = Config::new().with_initial_temperature(0.0);
    assert!(matches!(
        bad_temperature.validate(),
        Err(Error::InvalidConfig(_))
    ));

    let unbounded = Config::new().without_time_limit();
    assert!(matches!(unbounded.validate(), Err(Error::InvalidConfig(_))));
    assert!(unbounded.with_max_iterations(10).validate().is_ok());
}

#[test]
fn test_config_json_defaults_missing_fields() {
    let config: Config =
        serde_json::from_str(r#"{ "neighbor_count": 8, "acceptance": "Probabilistic" }"#).unwrap();

    assert_eq!(config.neighbor_count, 8);
    assert_eq!(config.acceptance, AcceptanceKind::Probabilistic);
    assert_eq!(config.cooling_factor, 0.99);
    assert_eq!(config.time_limit, Some(Duration::from_secs(160)));
}

#[test]
fn test_progress_record_and_formatting() {
    let mut record = ProgressRecord::new();
    assert!(record.is_empty());

    record.push(120.0, 120.0);
    record.push(90.0, 90.0);
    record.push(95.0, 90.0);

    assert_eq!(record.len(), 3);
    assert_eq!(record.initial_fitness(), Some(120.0));
    assert_eq!(record.observations()[2].iteration, 2);
    assert_eq!(record.observations()[2].best, 90.0);

    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 02m 05s");
}
