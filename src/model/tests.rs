//! Tests for attractor discovery and reachability using fake `boolSim` runs.

use crate::error::{BoolSimError, BoolSimResult};
use crate::model::{
    AttractorFiles, AttractorFilesConfig, AttractorFilesState, Model, ReachableConfig,
};
use crate::state_set::StateSet;
use crate::test_utils::fake_runner::{
    fake_toolbox, fake_toolbox_with, identity_espresso_behaviour, recorded,
};
use crate::test_utils::{MERGEABLE_SET, init_logger, mk_state_set, temp_dir, write_fixture};
use crate::tools::{ToolCommand, ToolConfig, ToolExit};
use computation_process::Stateful;
use num_bigint::BigUint;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A fake `boolSim` which writes attractor files with the given indices next to the `-o`
/// pattern. Each file contains a single fixed state.
fn write_attractors(
    indices: &'static [usize],
) -> impl Fn(&ToolCommand) -> BoolSimResult<ToolExit> + Send + Sync + 'static {
    move |command: &ToolCommand| {
        let pattern = command.flag_value("-o").expect("boolSim without -o");
        for i in indices {
            let mut path = pattern.clone().into_os_string();
            path.push(format!("_{i}.txt"));
            std::fs::write(PathBuf::from(path), format!("A B C\n0 0 {}\n", i % 2))
                .expect("Cannot write attractor file");
        }
        Ok(ToolExit::SUCCESS)
    }
}

fn attractor_names(attractors: &[StateSet]) -> Vec<String> {
    attractors
        .iter()
        .map(|it| it.path().file_name().unwrap().to_string_lossy())
        .map(|it| it.into_owned())
        .collect()
}

// ========== Naming ==========

#[test]
fn test_base_name() {
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let mk = |path: &str| Model::new(toolbox.clone(), path);

    assert_eq!(mk("tlgl.net").base_name(), Path::new("tlgl"));
    assert_eq!(mk("models/tlgl.net").base_name(), Path::new("models/tlgl"));
    assert_eq!(
        mk("models/t.l.g.l.net").base_name(),
        Path::new("models/t_l_g_l")
    );
    assert_eq!(
        mk("models.v2/tlgl.net").base_name(),
        Path::new("models.v2/tlgl")
    );
    assert_eq!(mk("models/tlgl").base_name(), Path::new("models/tlgl"));
}

#[test]
fn test_attractor_pattern() {
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let model = Model::new(toolbox, "models/cell.cycle.net");
    assert_eq!(
        model.attractor_pattern(),
        Path::new("models/cell_cycle_attractor")
    );
}

// ========== Attractors ==========

#[test]
fn test_attractors_runs_boolsim() -> BoolSimResult<()> {
    init_logger();
    let dir = temp_dir();
    let (toolbox, calls) = fake_toolbox(write_attractors(&[1, 2, 3]));
    let model_path = write_fixture(dir.path(), "model.net", "");
    let model = Model::new(toolbox, &model_path);

    let attractors = model.attractors()?;

    assert_eq!(
        attractor_names(attractors),
        vec![
            "model_attractor_1.txt",
            "model_attractor_2.txt",
            "model_attractor_3.txt",
        ]
    );
    assert_eq!(attractors[0].count()?, BigUint::from(1u32));
    assert_eq!(
        recorded(&calls),
        vec![format!(
            "boolSim -t -f {} -p 3 -o {}",
            model_path.display(),
            dir.path().join("model_attractor").display()
        )]
    );
    Ok(())
}

#[test]
fn test_attractors_stop_at_first_gap() -> BoolSimResult<()> {
    init_logger();
    let dir = temp_dir();
    let (toolbox, _) = fake_toolbox(write_attractors(&[1, 2, 4]));
    let model = Model::new(toolbox, dir.path().join("model.net"));

    let attractors = model.attractors()?;
    assert_eq!(
        attractor_names(attractors),
        vec!["model_attractor_1.txt", "model_attractor_2.txt"]
    );
    Ok(())
}

#[test]
fn test_attractors_missing_first_index() -> BoolSimResult<()> {
    let dir = temp_dir();
    let (toolbox, _) = fake_toolbox(write_attractors(&[2, 3]));
    let model = Model::new(toolbox, dir.path().join("model.net"));
    assert!(model.attractors()?.is_empty());
    Ok(())
}

#[test]
fn test_attractors_none_written() -> BoolSimResult<()> {
    let dir = temp_dir();
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let model = Model::new(toolbox, dir.path().join("model.net"));
    assert!(model.attractors()?.is_empty());
    Ok(())
}

#[test]
fn test_attractors_are_cached() -> BoolSimResult<()> {
    let dir = temp_dir();
    let (toolbox, calls) = fake_toolbox(write_attractors(&[1]));
    let model = Model::new(toolbox, dir.path().join("model.net"));

    assert_eq!(model.attractors()?.len(), 1);
    // A file appearing later does not change the cached result.
    write_fixture(dir.path(), "model_attractor_2.txt", "A B C\n000\n");
    assert_eq!(model.attractors()?.len(), 1);
    assert_eq!(recorded(&calls).len(), 1);
    Ok(())
}

#[test]
fn test_attractors_failed_solver() {
    let dir = temp_dir();
    let (toolbox, calls) = fake_toolbox(|_| Ok(ToolExit { code: Some(1) }));
    let model = Model::new(toolbox, dir.path().join("model.net"));

    let error = model.attractors().unwrap_err();
    assert!(matches!(error, BoolSimError::ToolFailed { .. }));

    // Errors are not cached, the solver is executed again.
    assert!(model.attractors().is_err());
    assert_eq!(recorded(&calls).len(), 2);
}

#[test]
fn test_attractors_failed_solver_tolerated() -> BoolSimResult<()> {
    let dir = temp_dir();
    let config = ToolConfig::default().with_check_exit_status(false);
    let (toolbox, _) = fake_toolbox_with(config, |_| Ok(ToolExit { code: Some(1) }));
    let model = Model::new(toolbox, dir.path().join("model.net"));
    assert!(model.attractors()?.is_empty());
    Ok(())
}

#[test]
fn test_attractors_in_missing_directory() -> BoolSimResult<()> {
    let dir = temp_dir();
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let model = Model::new(toolbox, dir.path().join("no/such/dir/model.net"));
    assert!(model.attractors()?.is_empty());
    Ok(())
}

// ========== Attractor file discovery ==========

#[test]
fn test_scan_ignores_unrelated_files() -> BoolSimResult<()> {
    let dir = temp_dir();
    for name in [
        "m_attractor_1.txt",
        "m_attractor_2.txt",
        "m_attractor_03.txt",
        "m_attractor_+4.txt",
        "m_attractor_5.txt.espresso",
        "m_attractor_6_simplified.txt",
        "m_attractor_1_reach.txt",
        "other_attractor_7.txt",
        "m_attractor_.txt",
    ] {
        write_fixture(dir.path(), name, "");
    }

    let state = AttractorFilesState::scan(&dir.path().join("m_attractor"))?;
    assert_eq!(state.present(), &BTreeSet::from([1, 2]));
    Ok(())
}

#[test]
fn test_generator_stops_and_stays_stopped() {
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let config = AttractorFilesConfig::new(toolbox, PathBuf::from("out/m_attractor"));
    let state = AttractorFilesState::from(BTreeSet::from([1, 2, 3, 5, 6]));

    let mut generator = AttractorFiles::configure(config, state);
    let mut found = Vec::new();
    for attractor in generator.by_ref() {
        found.push(attractor.unwrap().path().to_path_buf());
    }
    assert_eq!(
        found,
        vec![
            PathBuf::from("out/m_attractor_1.txt"),
            PathBuf::from("out/m_attractor_2.txt"),
            PathBuf::from("out/m_attractor_3.txt"),
        ]
    );
    assert!(generator.next().is_none());
}

#[test]
fn test_generator_empty() {
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let config = AttractorFilesConfig::new(toolbox, PathBuf::from("m_attractor"));
    let generator = AttractorFiles::configure(config, AttractorFilesState::from(BTreeSet::new()));
    assert_eq!(generator.count(), 0);
}

// ========== Reachability ==========

#[test]
fn test_reachable_default_output() -> BoolSimResult<()> {
    init_logger();
    let (toolbox, calls) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let model = Model::new(toolbox.clone(), "m.net");
    let initial = StateSet::new(toolbox, "m_attractor_1.txt");

    let reach = model.reachable(&initial, &ReachableConfig::default())?;

    assert_eq!(reach.path(), Path::new("m_attractor_1_reach.txt"));
    assert!(!reach.exists());
    assert_eq!(
        recorded(&calls),
        vec!["boolSim -t -f m.net -p 3 -i m_attractor_1.txt -o m_attractor_1_reach.txt".to_string()]
    );
    Ok(())
}

#[test]
fn test_reachable_with_options() -> BoolSimResult<()> {
    let (toolbox, calls) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let model = Model::new(toolbox.clone(), "m.net");
    let initial = StateSet::new(toolbox, "init.txt");

    let basin = model.reachable(
        &initial,
        &ReachableConfig::default()
            .with_suffix("basin")
            .with_max_steps(5),
    )?;
    assert_eq!(basin.path(), Path::new("init_basin.txt"));

    let explicit = model.reachable(&initial, &ReachableConfig::default().with_output("r.txt"))?;
    assert_eq!(explicit.path(), Path::new("r.txt"));

    assert_eq!(
        recorded(&calls),
        vec![
            "boolSim -t -f m.net -p 3 -i init.txt -o init_basin.txt -n 5".to_string(),
            "boolSim -t -f m.net -p 3 -i init.txt -o r.txt".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn test_reachable_result_is_checked_lazily() {
    let dir = temp_dir();
    let (toolbox, _) = fake_toolbox(|_| Ok(ToolExit::SUCCESS));
    let model = Model::new(toolbox.clone(), dir.path().join("m.net"));
    let initial = mk_state_set(&toolbox, dir.path(), "init.txt", MERGEABLE_SET);

    let reach = model
        .reachable(&initial, &ReachableConfig::default())
        .expect("The output file is not checked here");
    let error = reach.count().unwrap_err();
    match error {
        BoolSimError::MissingOutput { path } => assert_eq!(path, dir.path().join("init_reach.txt")),
        other => panic!("Unexpected error: {other}"),
    }
}

#[test]
fn test_attractor_pipeline() -> BoolSimResult<()> {
    init_logger();
    let dir = temp_dir();
    let (toolbox, calls) = fake_toolbox(|command: &ToolCommand| match command.program.as_str() {
        "boolSim" => {
            let pattern = command.flag_value("-o").expect("boolSim without -o");
            let mut path = pattern.into_os_string();
            path.push("_1.txt");
            std::fs::write(PathBuf::from(path), MERGEABLE_SET).unwrap();
            Ok(ToolExit::SUCCESS)
        }
        "espresso" => identity_espresso_behaviour(command),
        _ => Ok(ToolExit::SUCCESS),
    });
    let model = Model::new(toolbox, dir.path().join("net.bnet"));

    let attractor = &model.attractors()?[0];
    assert_eq!(attractor.count()?, BigUint::from(4u32));
    let simplified = attractor.simplify()?;
    assert_eq!(
        simplified.path(),
        dir.path().join("net_attractor_1_simplified.txt")
    );
    assert_eq!(simplified.count()?, BigUint::from(4u32));
    assert_eq!(recorded(&calls).len(), 2);
    Ok(())
}
