//! Example: locate copies of a small pose constellation inside a larger scene
//!
//! A random model set is placed into the scene twice, under different rigid
//! transforms, and surrounded by unrelated poses. The solver recovers both
//! placements, and the animator previews the move from one to the other.

use std::time::Duration;

use nalgebra::{UnitQuaternion, Vector3};
use pose_offset::animation::OffsetAnimator;
use pose_offset::io::offsets_to_json;
use pose_offset::utils::{apply_offset, PoseGenerator};
use pose_offset::{solve_with_settings, AnimationSettings, Pose, PoseSet, SolverSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Finding Model Copies ===\n");

    let mut generator = PoseGenerator::from_seed(2024);
    let model = generator.rigid_set(4);

    let placements = [
        Pose::from_trs(
            Vector3::new(5.0, 0.0, -2.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 1.2),
            Vector3::new(1.0, 1.0, 1.0),
        ),
        Pose::from_trs(
            Vector3::new(-8.0, 3.0, 1.0),
            UnitQuaternion::from_euler_angles(0.5, -0.3, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        ),
    ];

    let mut scene: Vec<Pose> = Vec::new();
    for placement in &placements {
        scene.extend(apply_offset(placement, &model).iter());
    }
    scene.extend(generator.rigid_set(30).iter());
    let space = generator.shuffled(&PoseSet::from(scene));

    println!(
        "Model: {} poses, space: {} poses ({} placements + noise)\n",
        model.len(),
        space.len(),
        placements.len()
    );

    let result = solve_with_settings(&model, &space, SolverSettings::with_tolerance(1e-6))?;

    println!("Solver Results:");
    println!("  Candidates evaluated: {}", result.candidates_evaluated);
    println!("  Offsets found: {}", result.len());
    for (i, (offset, source)) in result.offsets.iter().zip(&result.sources).enumerate() {
        let p = offset.position();
        let (roll, pitch, yaw) = offset.rotation().euler_angles();
        println!(
            "  #{i}: from space pose {source}, t = [{:.3}, {:.3}, {:.3}], rpy = [{:.3}, {:.3}, {:.3}]",
            p.x, p.y, p.z, roll, pitch, yaw
        );
    }

    println!("\nExport:\n{}", offsets_to_json(&result.offsets)?);

    if result.is_empty() {
        return Ok(());
    }
    println!("\nAnimation preview (every 10th frame):");
    let settings = AnimationSettings {
        frames: 40,
        pause: Duration::from_millis(500),
    };
    let mut animator = OffsetAnimator::new(result.offsets, settings)?;
    let dt = Duration::from_millis(16);
    let mut tick = 0usize;
    while animator.completed_legs() < 2 {
        let pose = animator.tick(dt);
        if tick % 10 == 0 {
            let p = pose.position();
            println!(
                "  tick {tick:>4} ({} -> {}): [{:.3}, {:.3}, {:.3}]",
                animator.current_index(),
                animator.next_index(),
                p.x,
                p.y,
                p.z
            );
        }
        tick += 1;
    }

    Ok(())
}
