//! Locomotion properties of the movement controller.
//!
//! Each test drives the controller against the recording body and the static
//! level layouts from `test_utils`, then inspects the forces it applied.

use approx::assert_relative_eq;
use glam::Vec3;
use rstest::{fixture, rstest};
use skulk::{
    ActorPose, ClimbState, ForceMode, MovementController, MovementInput, MovementSettings,
    MovementState, StaticGround,
};
use test_utils::{airborne_world, flat_world, ramp_world, RecordingBody};

const DT: f32 = 0.02;

#[fixture]
fn settings() -> MovementSettings {
    MovementSettings::default()
}

fn standing() -> ActorPose {
    ActorPose::upright(Vec3::new(0.0, 1.0, 0.0))
}

fn forward() -> MovementInput {
    MovementInput {
        vertical: 1.0,
        ..MovementInput::default()
    }
}

/// Runs one frame and one fixed step, returning the recorded body.
fn step_once(
    controller: &mut MovementController,
    world: &StaticGround,
    input: MovementInput,
    climb: ClimbState,
    mut body: RecordingBody,
) -> RecordingBody {
    let pose = standing();
    controller.frame_step(&pose, input, climb.climbing, DT, world, &mut body);
    controller.fixed_step(&pose, climb, world, &mut body, None);
    body
}

#[rstest]
fn idle_on_ground_applies_no_horizontal_force(settings: MovementSettings) {
    let mut controller = MovementController::new(settings);
    let body = step_once(
        &mut controller,
        &flat_world(),
        MovementInput::default(),
        ClimbState::default(),
        RecordingBody::default(),
    );
    let total = body.total(ForceMode::Force);
    assert_relative_eq!(total.x, 0.0);
    assert_relative_eq!(total.z, 0.0);
    assert!(controller.is_grounded());
    assert!(controller.is_idle());
}

#[rstest]
fn held_jump_fires_once_per_cooldown_window(settings: MovementSettings) {
    let cooldown = settings.jump_cooldown;
    let mut controller = MovementController::new(settings);
    let world = flat_world();
    let input = MovementInput {
        jump: true,
        ..MovementInput::default()
    };
    let mut body = RecordingBody::default();
    let mut jump_frames = Vec::new();
    for frame in 0..50_u16 {
        let report = controller.frame_step(&standing(), input, false, DT, &world, &mut body);
        if report.jumped {
            jump_frames.push(f32::from(frame));
        }
    }

    assert!(jump_frames.len() >= 2, "jumps: {jump_frames:?}");
    assert_eq!(body.impulses(), jump_frames.len());
    for pair in jump_frames.windows(2) {
        if let [first, second] = pair {
            assert!(
                (second - first) * DT >= cooldown - 1e-4,
                "jumps {first} and {second} closer than the cooldown"
            );
        }
    }
}

#[rstest]
fn jump_zeroes_vertical_velocity_and_pushes_up(settings: MovementSettings) {
    let jump_force = settings.jump_force;
    let mut controller = MovementController::new(settings);
    let mut body = RecordingBody::moving(Vec3::new(2.0, -3.0, 0.0));
    let input = MovementInput {
        jump: true,
        ..MovementInput::default()
    };
    let report = controller.frame_step(&standing(), input, false, DT, &flat_world(), &mut body);

    assert!(report.jumped);
    assert_relative_eq!(body.velocity.y, 0.0);
    assert_relative_eq!(body.velocity.x, 2.0);
    assert_eq!(body.total(ForceMode::Impulse), Vec3::Y * jump_force);
    assert!(!controller.is_ready_to_jump());
    assert!(controller.is_exiting_slope());
}

#[rstest]
fn no_jump_while_airborne(settings: MovementSettings) {
    let mut controller = MovementController::new(settings);
    let mut body = RecordingBody::default();
    let input = MovementInput {
        jump: true,
        ..MovementInput::default()
    };
    let report = controller.frame_step(
        &standing(),
        input,
        false,
        DT,
        &airborne_world(),
        &mut body,
    );
    assert!(!report.jumped);
    assert_eq!(body.impulses(), 0);
}

#[rstest]
#[case::flat(0.0, false)]
#[case::gentle(15.0, true)]
#[case::steep_walkable(35.0, true)]
#[case::past_limit(41.0, false)]
#[case::cliff(60.0, false)]
fn slope_detection_follows_max_angle(
    settings: MovementSettings,
    #[case] angle: f32,
    #[case] expected: bool,
) {
    let controller = MovementController::new(settings);
    let world = if angle == 0.0 {
        flat_world()
    } else {
        ramp_world(angle)
    };
    let mut body = RecordingBody::default();
    let report = controller.fixed_step(
        &standing(),
        ClimbState::default(),
        &world,
        &mut body,
        None,
    );
    assert_eq!(report.on_slope, expected);
    assert_eq!(body.use_gravity, !expected, "gravity is off only on slopes");
}

#[rstest]
#[case::fast_diagonal(Vec3::new(20.0, 3.0, -20.0))]
#[case::fast_straight(Vec3::new(0.0, -4.0, 15.0))]
#[case::already_slow(Vec3::new(1.0, 0.5, 1.0))]
fn planar_speed_is_clamped_on_flat_ground(settings: MovementSettings, #[case] velocity: Vec3) {
    let walk = settings.walk_speed;
    let mut controller = MovementController::new(settings);
    let mut body = RecordingBody::moving(velocity);
    controller.frame_step(
        &standing(),
        MovementInput::default(),
        false,
        DT,
        &flat_world(),
        &mut body,
    );
    let planar = Vec3::new(body.velocity.x, 0.0, body.velocity.z).length();
    assert!(planar <= walk + 1e-4, "planar speed {planar}");
    assert_relative_eq!(body.velocity.y, velocity.y);
}

#[rstest]
fn full_velocity_is_clamped_on_slope(settings: MovementSettings) {
    let walk = settings.walk_speed;
    let mut controller = MovementController::new(settings);
    let mut body = RecordingBody::moving(Vec3::new(6.0, 6.0, 0.0));
    controller.frame_step(
        &standing(),
        MovementInput::default(),
        false,
        DT,
        &ramp_world(20.0),
        &mut body,
    );
    assert_relative_eq!(body.velocity.length(), walk, epsilon = 1e-4);
}

#[rstest]
#[case::grounded_sprinting(true, true)]
#[case::grounded_walking(true, false)]
#[case::airborne_sprinting(false, true)]
#[case::airborne(false, false)]
fn climbing_overrides_everything(
    settings: MovementSettings,
    #[case] grounded: bool,
    #[case] sprint: bool,
) {
    let climb_speed = settings.climb_speed;
    let mut controller = MovementController::new(settings);
    let world = if grounded {
        flat_world()
    } else {
        airborne_world()
    };
    let input = MovementInput {
        sprint,
        ..forward()
    };
    let report = controller.frame_step(
        &standing(),
        input,
        true,
        DT,
        &world,
        &mut RecordingBody::default(),
    );
    assert_eq!(report.state, MovementState::Climbing);
    assert_relative_eq!(report.move_speed, climb_speed);
}

#[rstest]
#[case::sprint(true, MovementState::Sprinting)]
#[case::walk(false, MovementState::Walking)]
fn grounded_state_follows_sprint_key(
    settings: MovementSettings,
    #[case] sprint: bool,
    #[case] expected: MovementState,
) {
    let expected_speed = if sprint {
        settings.sprint_speed
    } else {
        settings.walk_speed
    };
    let mut controller = MovementController::new(settings);
    let input = MovementInput {
        sprint,
        ..forward()
    };
    let report = controller.frame_step(
        &standing(),
        input,
        false,
        DT,
        &flat_world(),
        &mut RecordingBody::default(),
    );
    assert_eq!(report.state, expected);
    assert_relative_eq!(report.move_speed, expected_speed);
}

#[rstest]
fn airborne_drive_is_scaled_by_air_multiplier(settings: MovementSettings) {
    let expected = settings.sprint_speed * 10.0 * settings.air_multiplier;
    let mut controller = MovementController::new(settings);
    let world = airborne_world();

    // Sprint on the ground first so the air state keeps the sprint speed.
    let input = MovementInput {
        sprint: true,
        ..forward()
    };
    let mut body = step_once(
        &mut controller,
        &flat_world(),
        input,
        ClimbState::default(),
        RecordingBody::default(),
    );
    body.clear_forces();
    let body = step_once(&mut controller, &world, input, ClimbState::default(), body);

    assert_eq!(controller.state(), MovementState::Air);
    assert_relative_eq!(body.total(ForceMode::Force).length(), expected, epsilon = 1e-3);
    assert_relative_eq!(body.drag, 0.0);
}

#[rstest]
fn grounded_drive_points_forward(settings: MovementSettings) {
    let expected = settings.walk_speed * 10.0;
    let drag = settings.ground_drag;
    let mut controller = MovementController::new(settings);
    let body = step_once(
        &mut controller,
        &flat_world(),
        forward(),
        ClimbState::default(),
        RecordingBody::default(),
    );
    let total = body.total(ForceMode::Force);
    assert_relative_eq!(total.z, -expected, epsilon = 1e-3);
    assert_relative_eq!(total.x, 0.0);
    assert_relative_eq!(body.drag, drag);
}

#[rstest]
fn leaving_a_wall_suppresses_all_forces(settings: MovementSettings) {
    let mut controller = MovementController::new(settings);
    let climb = ClimbState {
        climbing: false,
        exiting_wall: true,
    };
    let body = step_once(
        &mut controller,
        &flat_world(),
        forward(),
        climb,
        RecordingBody::default(),
    );
    assert!(body.forces.is_empty());
}

#[rstest]
fn rising_on_slope_is_pulled_back_down(settings: MovementSettings) {
    let mut controller = MovementController::new(settings);
    let world = ramp_world(20.0);
    let mut body = RecordingBody::moving(Vec3::new(1.0, 0.5, 0.0));
    controller.frame_step(&standing(), MovementInput::default(), false, DT, &world, &mut body);
    body.clear_forces();
    let report = controller.fixed_step(
        &standing(),
        ClimbState::default(),
        &world,
        &mut body,
        None,
    );
    assert!(report.on_slope);
    assert_relative_eq!(report.slope_force.y, -80.0, epsilon = 1e-3);
}

#[rstest]
fn walking_on_a_slope_adds_the_ground_drive_to_the_slope_force(settings: MovementSettings) {
    let mut controller = MovementController::new(settings.clone());
    let body = step_once(
        &mut controller,
        &ramp_world(20.0),
        forward(),
        ClimbState::default(),
        RecordingBody::default(),
    );

    let pushes: Vec<Vec3> = body
        .forces
        .iter()
        .filter(|(_, mode)| *mode == ForceMode::Force)
        .map(|(force, _)| *force)
        .collect();
    assert_eq!(pushes.len(), 2, "{pushes:?}");
    assert_relative_eq!(pushes[0].length(), settings.walk_speed * 20.0, epsilon = 1e-3);
    assert_relative_eq!(pushes[1].z, -settings.walk_speed * 10.0, epsilon = 1e-3);
    assert_relative_eq!(pushes[1].x, 0.0);
    assert_relative_eq!(pushes[1].y, 0.0);
}
