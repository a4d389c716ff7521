//! Behavioural tests for the movement controller using rust-rspec.
//!
//! Each scenario runs whole controller ticks (frame phase then fixed phase)
//! against static level layouts and checks what the body was asked to do.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use glam::Vec3;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use skulk::{
    ActorPose, ClimbState, ForceMode, FrameReport, MovementController, MovementInput,
    MovementSettings, MovementState, StaticGround,
};
use test_utils::{flat_world, ramp_world, RecordingBody};

const DT: f32 = 0.02;

/// A single player, the level under it, and the last frame outcome.
#[derive(Clone, Debug)]
struct PlayerWorld {
    controller: MovementController,
    body: RecordingBody,
    ground: StaticGround,
    input: MovementInput,
    climb: ClimbState,
    last: Option<FrameReport>,
}

impl PlayerWorld {
    fn on(ground: StaticGround) -> Self {
        Self {
            controller: MovementController::new(MovementSettings::default()),
            body: RecordingBody::default(),
            ground,
            input: MovementInput::default(),
            climb: ClimbState::default(),
            last: None,
        }
    }

    fn pose() -> ActorPose {
        ActorPose::upright(Vec3::new(0.0, 1.0, 0.0))
    }

    /// Runs `frames` controller ticks, keeping only the forces of the last.
    fn tick(&mut self, frames: usize) {
        let pose = Self::pose();
        for _ in 0..frames {
            self.body.clear_forces();
            let report = self.controller.frame_step(
                &pose,
                self.input,
                self.climb.climbing,
                DT,
                &self.ground,
                &mut self.body,
            );
            self.controller
                .fixed_step(&pose, self.climb, &self.ground, &mut self.body, None);
            self.last = Some(report);
        }
    }

    fn report(&self) -> FrameReport {
        self.last
            .unwrap_or_else(|| panic!("the controller has not ticked yet"))
    }

    fn drive(&self) -> Vec3 {
        self.body.total(ForceMode::Force)
    }
}

fn flat_ground_scenarios(scenario: &mut Scenario<PlayerWorld>) {
    scenario.when("no keys are held", |ctx| {
        ctx.before_each(|world| world.tick(1));

        ctx.then("the player walks in place", |world| {
            assert_eq!(world.report().state, MovementState::Walking);
            let drive = world.drive();
            assert!(drive.x.abs() < 1e-6 && drive.z.abs() < 1e-6, "{drive:?}");
        });

        ctx.then("ground drag holds the player", |world| {
            assert!((world.body.drag - 5.0).abs() < 1e-6);
        });
    });

    scenario.when("forward and sprint are held", |ctx| {
        ctx.before_each(|world| {
            world.input = MovementInput {
                vertical: 1.0,
                sprint: true,
                ..MovementInput::default()
            };
            world.tick(1);
        });

        ctx.then("the player sprints", |world| {
            assert_eq!(world.report().state, MovementState::Sprinting);
        });

        ctx.then("the drive pushes forward at sprint strength", |world| {
            let drive = world.drive();
            assert!((drive.z + 100.0).abs() < 1e-3, "{drive:?}");
        });
    });

    scenario.when("the player grabs a wall while sprinting", |ctx| {
        ctx.before_each(|world| {
            world.input = MovementInput {
                vertical: 1.0,
                sprint: true,
                ..MovementInput::default()
            };
            world.climb.climbing = true;
            world.tick(1);
        });

        ctx.then("climbing wins", |world| {
            let report = world.report();
            assert_eq!(report.state, MovementState::Climbing);
            assert!((report.move_speed - 3.0).abs() < 1e-6);
        });
    });

    scenario.when("jump is held for a few frames", |ctx| {
        ctx.before_each(|world| {
            world.input.jump = true;
            let pose = PlayerWorld::pose();
            for _ in 0..5 {
                world.controller.frame_step(
                    &pose,
                    world.input,
                    false,
                    DT,
                    &world.ground,
                    &mut world.body,
                );
            }
        });

        ctx.then("exactly one impulse is applied", |world| {
            assert_eq!(world.body.impulses(), 1);
        });

        ctx.then("the jump is not yet re-armed", |world| {
            assert!(!world.controller.is_ready_to_jump());
        });
    });
}

#[test]
fn controller_on_flat_ground() {
    run_serial(&rspec::given(
        "a player standing on flat ground",
        PlayerWorld::on(flat_world()),
        flat_ground_scenarios,
    ));
}

#[test]
fn controller_on_a_ramp() {
    run_serial(&rspec::given(
        "a player standing on a 30 degree ramp",
        PlayerWorld::on(ramp_world(30.0)),
        |scenario: &mut Scenario<PlayerWorld>| {
            scenario.when("the player walks uphill", |ctx| {
                ctx.before_each(|world| {
                    world.input.horizontal = 1.0;
                    world.tick(1);
                });

                ctx.then("gravity is switched off", |world| {
                    assert!(!world.body.use_gravity);
                });

                ctx.then("the applied force climbs the ramp", |world| {
                    let drive = world.drive();
                    assert!(drive.x > 0.0 && drive.y > 0.0, "{drive:?}");
                });
            });

            scenario.when("the player stands still", |ctx| {
                ctx.before_each(|world| world.tick(1));

                ctx.then("the player stays grounded", |world| {
                    assert!(world.report().grounded);
                });
            });
        },
    ));
}
