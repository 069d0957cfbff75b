//! Integration tests for the public API.
//!
//! Pose sets are synthetic: a random rigid model set placed into a larger
//! space set one or more times, mixed with unrelated poses.

use approx::assert_relative_eq;
use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use pose_offset::animation::OffsetAnimator;
use pose_offset::config::RunConfig;
use pose_offset::io::{export_offsets, load_pose_set};
use pose_offset::scoring::poses_equal;
use pose_offset::utils::{apply_offset, PoseGenerator};
use pose_offset::*;

/// Model of `n` poses and a space containing it under each of `offsets`,
/// plus `distractors` random poses, shuffled.
fn scene(seed: u64, n: usize, offsets: &[Pose], distractors: usize) -> (PoseSet, PoseSet) {
    let mut generator = PoseGenerator::from_seed(seed);
    let model = generator.rigid_set(n);
    let mut space: Vec<Pose> = offsets
        .iter()
        .flat_map(|o| apply_offset(o, &model).into_inner())
        .collect();
    space.extend(generator.rigid_set(distractors).iter());
    let space = generator.shuffled(&space.into());
    (model, space)
}

fn accepts(model: &PoseSet, space: &PoseSet, offset: &Pose, tolerance: f64) -> bool {
    model
        .iter()
        .all(|m| space.iter().any(|s| poses_equal(&(offset * m), s, tolerance)))
}

#[test]
fn test_finds_every_placement_of_the_model() {
    let o1 = Pose::from_trs(
        Vector3::new(3.0, -1.0, 2.0),
        UnitQuaternion::from_euler_angles(0.2, 0.4, -1.0),
        Vector3::new(1.0, 1.0, 1.0),
    );
    let o2 = Pose::from_translation(Vector3::new(-20.0, 5.0, 0.5));
    let (model, space) = scene(11, 5, &[o1, o2], 12);

    let result = solve_with_settings(&model, &space, SolverSettings::with_tolerance(1e-6)).unwrap();
    assert_eq!(result.len(), 2, "one offset per placement");

    for (offset, source) in result.offsets.iter().zip(&result.sources) {
        let expected = if (offset.m - o1.m).amax() < 1e-9 { o1 } else { o2 };
        assert_relative_eq!(offset.m, expected.m, epsilon = 1e-9);
        assert_relative_eq!((offset * &model[0]).m, space[*source].m, epsilon = 1e-9);
    }
    assert!((result.offsets[0].m - result.offsets[1].m).amax() > 1.0);
}

#[test]
fn test_result_is_space_order_filtered_by_acceptance() {
    let o = Pose::from_translation(Vector3::new(1.0, 2.0, 3.0));
    let (model, space) = scene(5, 4, &[Pose::identity(), o], 20);
    let tolerance = 1e-6;

    let result =
        solve_with_settings(&model, &space, SolverSettings::with_tolerance(tolerance)).unwrap();
    assert!(result.sources.windows(2).all(|w| w[0] < w[1]));

    let pivot_inverse = model[0].try_inverse().unwrap();
    let expected: Vec<Pose> = space
        .iter()
        .map(|s| s * &pivot_inverse)
        .filter(|candidate| accepts(&model, &space, candidate, tolerance))
        .collect();
    assert_eq!(result.offsets, expected);
    assert_eq!(solve(&model, &space, tolerance).unwrap(), expected);
}

#[test]
fn test_monotonic_in_tolerance() {
    let mut generator = PoseGenerator::from_seed(99);
    let model = generator.rigid_set(4);
    let mut space = Vec::new();
    for k in 0..6 {
        let offset = Pose::from_translation(Vector3::new(10.0 * k as f64, 0.0, 0.0));
        for pose in apply_offset(&offset, &model).iter() {
            space.push(generator.jitter(pose, 0.002 * k as f64));
        }
    }
    let space: PoseSet = space.into();

    let tolerances = [0.0, 1e-8, 1e-6, 1e-5, 1e-4, 1e-3, 1e-1, 10.0];
    let results: Vec<Vec<usize>> = tolerances
        .iter()
        .map(|t| {
            solve_with_settings(&model, &space, SolverSettings::with_tolerance(*t))
                .unwrap()
                .sources
        })
        .collect();

    for pair in results.windows(2) {
        assert!(
            pair[0].iter().all(|s| pair[1].contains(s)),
            "{:?} is not a subset of {:?}",
            pair[0],
            pair[1]
        );
    }
    assert!(results.last().unwrap().len() > results[0].len());
}

#[test]
fn test_identity_is_found_when_model_equals_space() {
    let mut generator = PoseGenerator::from_seed(3);
    let model = generator.rigid_set(6);

    let offsets = solve(&model, &model, 1e-9).unwrap();
    assert!(offsets
        .iter()
        .any(|o| (o.m - Matrix4::identity()).amax() < 1e-9));
}

#[test]
fn test_degenerate_pivot_yields_nothing() {
    let flat = Pose::new(Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 0.0, 1.0)));
    let mut generator = PoseGenerator::from_seed(8);
    let mut poses = vec![flat];
    poses.extend(generator.rigid_set(3).iter());
    let model: PoseSet = poses.into();

    for space in [model.clone(), generator.rigid_set(10), PoseSet::default()] {
        assert!(solve(&model, &space, 1.0).unwrap().is_empty());
    }
    assert!(matches!(
        solve_with_settings(&model, &model, SolverSettings::default().strict()),
        Err(Error::DegeneratePivot { .. })
    ));
}

#[test]
fn test_empty_space_yields_nothing() {
    let mut generator = PoseGenerator::from_seed(21);
    let model = generator.rigid_set(3);
    let result =
        solve_with_settings(&model, &PoseSet::default(), SolverSettings::default()).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.candidates_evaluated, 0);
}

#[test]
fn test_translation_example() {
    let model: PoseSet = vec![Pose::identity()].into();
    let t = Pose::from_translation(Vector3::new(1.0, 0.0, 0.0));
    let space: PoseSet = vec![t].into();

    for tolerance in [1e-12, 1e-3, 1.0] {
        assert_eq!(solve(&model, &space, tolerance).unwrap(), vec![t]);
    }
}

#[test]
fn test_config_driven_run_exports_loadable_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let o = Pose::from_translation(Vector3::new(0.0, 4.0, 0.0));
    let (model, space) = scene(17, 3, &[o], 5);

    let write_set = |name: &str, set: &PoseSet| {
        let rows: Vec<Vec<f64>> = set.iter().map(|p| p.to_row_major().to_vec()).collect();
        std::fs::write(dir.path().join(name), serde_json::to_string(&rows).unwrap()).unwrap();
    };
    write_set("model.json", &model);
    write_set("space.json", &space);
    let config_path = dir.path().join("run.toml");
    std::fs::write(
        &config_path,
        concat!(
            "model = \"model.json\"\n",
            "space = \"space.json\"\n",
            "output = \"output.json\"\n\n",
            "[solver]\n",
            "tolerance = 1e-6\n",
        ),
    )
    .unwrap();

    let config = RunConfig::new(&config_path).unwrap();
    let model = load_pose_set(&config.model).unwrap();
    let space = load_pose_set(&config.space).unwrap();
    let result = solve_with_settings(&model, &space, config.solver_settings()).unwrap();
    assert_eq!(result.len(), 1);

    let output = config.output.unwrap();
    export_offsets(&output, &result.offsets).unwrap();
    let exported = load_pose_set(&output).unwrap();
    assert_eq!(exported.len(), result.len());
    for (a, b) in exported.iter().zip(&result.offsets) {
        assert_relative_eq!(a.m, b.m, epsilon = 1e-12);
    }
    assert_relative_eq!(result.offsets[0].m, o.m, epsilon = 1e-9);
}

#[test]
fn test_animator_cycles_through_solver_output() {
    let offsets: Vec<Pose> = (0..3)
        .map(|k| Pose::from_translation(Vector3::new(k as f64, 0.0, 0.0)))
        .collect();
    let model: PoseSet = vec![Pose::identity()].into();
    let found = solve(&model, &offsets.clone().into(), 1e-9).unwrap();
    assert_eq!(found, offsets);

    let settings = AnimationSettings {
        frames: 10,
        pause: std::time::Duration::from_millis(100),
    };
    let mut animator = OffsetAnimator::new(found, settings).unwrap();
    let dt = std::time::Duration::from_millis(50);
    let mut visited = vec![animator.current_index()];
    while animator.completed_legs() < 3 {
        animator.tick(dt);
        if visited.last() != Some(&animator.current_index()) {
            visited.push(animator.current_index());
        }
    }
    assert_eq!(visited, vec![0, 1, 2, 0]);
}

#[test]
fn test_invalid_arguments_are_rejected() {
    let set: PoseSet = vec![Pose::identity()].into();
    assert!(matches!(
        solve(&PoseSet::default(), &set, 0.1),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        solve(&set, &set, -0.1),
        Err(Error::InvalidArgument(_))
    ));
}
