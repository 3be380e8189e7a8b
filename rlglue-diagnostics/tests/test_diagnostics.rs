use anyhow::Result;
use ndarray::{array, Array2};
use rlglue_core::{
    record::{BufferedRecorder, Recorder},
    Config,
};
use rlglue_diagnostics::{DiagnosticsError, GridShape, PolicyTable, ValueDiagnostics};
use test_log::test;

fn env_config() -> Result<Config> {
    Config::default()
        .with("grid_height", 2)?
        .with("grid_width", 3)
}

fn true_values() -> Array2<f64> {
    array![[1.0, 2.0, 3.0], [4.0, 5.0, f64::NAN]]
}

#[test]
fn test_values_table_is_row_major() -> Result<()> {
    let mut diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?;
    diag.compute_values_table(&[0.0, 1.0, 2.0, 3.0])?;

    let table = diag.values_table();
    assert_eq!(table[[0, 0]], 0.0);
    assert_eq!(table[[0, 2]], 2.0);
    assert_eq!(table[[1, 0]], 3.0);
    assert!(table[[1, 1]].is_nan());
    assert!(table[[1, 2]].is_nan());

    assert!(diag.compute_values_table(&[0.0; 7]).is_err());
    Ok(())
}

#[test]
fn test_rmsve_ignores_nan() -> Result<()> {
    let mut diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?
        .with_true_values(true_values())?;

    // Cell (1, 2) has no true value, cell (1, 1) no estimate.
    diag.compute_values_table(&[1.0, 2.0, 3.0, 6.0, f64::NAN, 100.0])?;
    let rmsve = diag.compute_rmsve()?;
    assert!((rmsve - (4.0f64 / 4.0).sqrt()).abs() < 1e-12);

    diag.compute_values_table(&[])?;
    assert!(diag.compute_rmsve()?.is_nan());
    Ok(())
}

#[test]
fn test_rmsve_requires_true_values() -> Result<()> {
    let diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?;
    let err = diag.compute_rmsve().unwrap_err();
    assert_eq!(
        err.downcast_ref::<DiagnosticsError>(),
        Some(&DiagnosticsError::NoTrueValues)
    );
    Ok(())
}

#[test]
fn test_true_values_shape() -> Result<()> {
    let diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?;
    let err = diag.with_true_values(Array2::zeros((3, 2))).err().unwrap();
    assert_eq!(
        err.downcast_ref::<DiagnosticsError>(),
        Some(&DiagnosticsError::TrueValuesShape {
            expected: [2, 3],
            got: [3, 2]
        })
    );
    Ok(())
}

#[test]
fn test_policy_larger_than_grid() -> Result<()> {
    let err = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(7))
        .err()
        .unwrap();
    assert_eq!(
        err.downcast_ref::<DiagnosticsError>(),
        Some(&DiagnosticsError::TooManyStates {
            n_states: 7,
            size: 6
        })
    );
    Ok(())
}

#[test]
fn test_visualize_without_true_values() -> Result<()> {
    let mut diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?;
    let record = diag.visualize(&[0.5; 6], 10)?;

    assert_eq!(record.get_string("title")?, "Predicted Values, Episode: 10");
    assert_eq!(record.get_scalar("episode")?, 10.0);
    assert_eq!(record.get_array2("values")?, (vec![0.5; 6], [2, 3]));
    assert!(record.get("rmsve").is_none());
    assert!(diag.rmsve_log().is_empty());
    Ok(())
}

#[test]
fn test_visualize_logs_rmsve() -> Result<()> {
    let mut diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?
        .with_true_values(true_values())?
        .with_experiment_name("TD(0)");
    let mut recorder = BufferedRecorder::new();

    recorder.write(diag.visualize(&[0.0; 5], 1)?);
    recorder.write(diag.visualize(&[1.0, 2.0, 3.0, 4.0, 5.0], 2)?);

    let records = recorder.take();
    assert_eq!(
        records[0].get_string("title")?,
        "TD(0)\nPredicted Values, Episode: 1"
    );
    assert_eq!(records[1].get_scalar("rmsve")?, 0.0);
    assert_eq!(
        records[1].get_array2("rmsve_log")?,
        (vec![1.0, diag.rmsve_log()[0].1, 2.0, 0.0], [2, 2])
    );
    assert_eq!(diag.rmsve_log().len(), 2);

    let (se, shape) = records[0].get_array2("squared_error")?;
    assert_eq!(shape, [2, 3]);
    assert_eq!(&se[..5], &[1.0, 4.0, 9.0, 16.0, 25.0]);
    assert!(se[5].is_nan());
    Ok(())
}

#[test]
fn test_policy_arrows() -> Result<()> {
    let policy = PolicyTable::from_rows(vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.5, 0.5],
        vec![0.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
    ])?;
    let mut diag = ValueDiagnostics::with_shape(GridShape::new(2, 3), policy)?;

    let (arrows, shape) = diag.visualize(&[0.0; 4], 0)?.get_array3("policy_arrows")?;
    assert_eq!(shape, [2, 3, 4]);
    assert_eq!(&arrows[0..4], &[0.5, 0.0, 0.0, 0.0]);
    assert_eq!(&arrows[4..8], &[0.0, 0.0, 0.25, 0.25]);
    assert_eq!(&arrows[12..16], &[0.0, 0.5, 0.0, 0.0]);
    assert!(arrows[16..].iter().all(|a| *a == 0.0));

    assert_eq!(diag.render_arrows(), "↑↓·\n←\n");
    Ok(())
}

#[test]
fn test_run_tests() -> Result<()> {
    let mut diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?
        .with_true_values(true_values())?;

    diag.run_tests(&[1.0, 2.0, 3.0, 4.0, 5.0, 42.0], 0.1)?;
    diag.run_tests(&[1.0, 2.0, 3.0, 4.0 + 1e-7], 0.1)?;

    let err = diag.run_tests(&[1.0, 2.0, 3.0, 4.0, 5.5], 0.5).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DiagnosticsError>(),
        Some(DiagnosticsError::ValuesMismatch { .. })
    ));

    let mut diag = ValueDiagnostics::new(&env_config()?, PolicyTable::uniform(6))?;
    assert!(diag.run_tests(&[0.0; 6], 1.0).is_err());
    Ok(())
}
