//! Plot Armor Headless Harness
//!
//! Drives the full interception path against a stand-in hecs world — no
//! game engine, no networking. Players live as entities with live
//! health/absorption/position/velocity components; the harness plays the
//! role of the host's damage dispatch and checks the survival-floor
//! invariant under scripted scenarios and randomized sweeps.
//!
//! Usage:
//!   cargo run -p plotarmor-simtest
//!   cargo run -p plotarmor-simtest -- --verbose

use hecs::{Entity, World};
use rand::Rng;

use plotarmor_core::host::{DamageEvent, EntityHandle, PlayerDirectory};
use plotarmor_core::interceptor;
use plotarmor_core::{PlayerId, Roster};
use plotarmor_logic::damage::DamageCause;
use plotarmor_logic::geometry::Vec3;
use plotarmor_logic::guard::SURVIVAL_FLOOR;
use plotarmor_logic::knockback;

// ── Stand-in world ──────────────────────────────────────────────────────

struct Health(f64);
struct Absorption(f64);
struct Position(Vec3);
struct Velocity(Option<Vec3>);
struct Name(String);
struct Pid(PlayerId);
struct HurtCues(u32);

fn spawn_player(world: &mut World, name: &str, health: f64, absorption: f64, pos: Vec3) -> Entity {
    world.spawn((
        Pid(PlayerId::random()),
        Name(name.to_string()),
        Health(health),
        Absorption(absorption),
        Position(pos),
        Velocity(None),
        HurtCues(0),
    ))
}

/// Live handle over one player entity. Every accessor reads the world at
/// call time, mirroring how a real host hands out live entity state.
struct WorldPlayer<'w> {
    world: &'w World,
    entity: Entity,
}

impl EntityHandle for WorldPlayer<'_> {
    fn id(&self) -> PlayerId {
        self.world.get::<&Pid>(self.entity).unwrap().0
    }
    fn name(&self) -> String {
        self.world.get::<&Name>(self.entity).unwrap().0.clone()
    }
    fn health(&self) -> f64 {
        self.world.get::<&Health>(self.entity).unwrap().0
    }
    fn set_health(&mut self, value: f64) {
        self.world.get::<&mut Health>(self.entity).unwrap().0 = value;
    }
    fn absorption(&self) -> f64 {
        self.world.get::<&Absorption>(self.entity).unwrap().0
    }
    fn set_absorption(&mut self, value: f64) {
        self.world.get::<&mut Absorption>(self.entity).unwrap().0 = value;
    }
    fn position(&self) -> Vec3 {
        self.world.get::<&Position>(self.entity).unwrap().0
    }
    fn set_velocity(&mut self, velocity: Vec3) {
        self.world.get::<&mut Velocity>(self.entity).unwrap().0 = Some(velocity);
    }
    fn play_hurt_cue(&mut self) {
        self.world.get::<&mut HurtCues>(self.entity).unwrap().0 += 1;
    }
}

struct Damage {
    cause: DamageCause,
    final_damage: f64,
    cancelled: bool,
    damager_position: Option<Vec3>,
}

impl Damage {
    fn new(cause: DamageCause, final_damage: f64) -> Self {
        Self {
            cause,
            final_damage,
            cancelled: false,
            damager_position: None,
        }
    }
}

impl DamageEvent for Damage {
    fn cause(&self) -> DamageCause {
        self.cause
    }
    fn final_damage(&self) -> f64 {
        self.final_damage
    }
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
    fn cancel(&mut self) {
        self.cancelled = true;
    }
    fn damager_position(&self) -> Option<Vec3> {
        self.damager_position
    }
}

/// Dispatch one event the way the host would: interceptor first (highest
/// priority), then — if nobody cancelled — the engine applies the damage,
/// absorption before health.
fn dispatch(world: &mut World, roster: &Roster, entity: Entity, event: &mut Damage) {
    {
        let mut player = WorldPlayer { world, entity };
        interceptor::on_entity_damage(roster, &mut player, event);
    }
    if !event.cancelled {
        let health_share = {
            let mut absorption = world.get::<&mut Absorption>(entity).unwrap();
            let share = (event.final_damage - absorption.0).max(0.0);
            absorption.0 = (absorption.0 - event.final_damage).max(0.0);
            share
        };
        world.get::<&mut Health>(entity).unwrap().0 -= health_share;
    }
}

fn health_of(world: &World, entity: Entity) -> f64 {
    world.get::<&Health>(entity).unwrap().0
}

fn velocity_of(world: &World, entity: Entity) -> Option<Vec3> {
    world.get::<&Velocity>(entity).unwrap().0
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Plot Armor Harness ===\n");

    let mut results = Vec::new();

    results.extend(run_scenarios(verbose));
    results.extend(run_guard_sweep(verbose));
    results.extend(run_knockback_sweep(verbose));
    results.extend(run_command_flow(verbose));

    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Scripted scenarios ───────────────────────────────────────────────

fn run_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted scenarios ---");
    let mut results = Vec::new();
    let mut world = World::new();
    let mut roster = Roster::new();

    // A: lethal melee hit is clamped to the floor
    let a = spawn_player(&mut world, "A", 2.0, 0.0, Vec3::new(0.0, 64.0, 0.0));
    roster.add(world.get::<&Pid>(a).unwrap().0);
    let mut event = Damage::new(DamageCause::Attack, 3.0);
    dispatch(&mut world, &roster, a, &mut event);
    results.push(check(
        "lethal_hit_saved",
        event.cancelled && health_of(&world, a) == 1.0,
        format!("health {} cancelled {}", health_of(&world, a), event.cancelled),
    ));

    // B: already below the floor, any damage fully blocked, health untouched
    let b = spawn_player(&mut world, "B", 0.8, 0.0, Vec3::new(0.0, 64.0, 0.0));
    roster.add(world.get::<&Pid>(b).unwrap().0);
    let mut event = Damage::new(DamageCause::Other, 50.0);
    dispatch(&mut world, &roster, b, &mut event);
    results.push(check(
        "critical_blocked",
        event.cancelled && (health_of(&world, b) - 0.8).abs() < 1e-9,
        format!("health {}", health_of(&world, b)),
    ));

    // C: absorption soaks the hit, event allowed and applied normally
    let c = spawn_player(&mut world, "C", 5.0, 2.0, Vec3::new(0.0, 64.0, 0.0));
    roster.add(world.get::<&Pid>(c).unwrap().0);
    let mut event = Damage::new(DamageCause::Attack, 3.0);
    dispatch(&mut world, &roster, c, &mut event);
    let cues = world.get::<&HurtCues>(c).unwrap().0;
    results.push(check(
        "absorbed_hit_allowed",
        !event.cancelled && (health_of(&world, c) - 4.0).abs() < 1e-9 && cues == 0,
        format!("health {} cues {}", health_of(&world, c), cues),
    ));

    // D: vetoed block explosion at distance 5 relaunches the player
    let d = spawn_player(&mut world, "D", 2.0, 0.0, Vec3::new(5.0, 64.0, 0.0));
    roster.add(world.get::<&Pid>(d).unwrap().0);
    let mut event = Damage::new(DamageCause::BlockExplosion, 9.0);
    event.damager_position = Some(Vec3::new(0.0, 64.0, 0.0));
    dispatch(&mut world, &roster, d, &mut event);
    let velocity = velocity_of(&world, d);
    let launched = matches!(
        velocity,
        Some(v) if (v.x - 0.75).abs() < 1e-9 && (v.y - 0.4).abs() < 1e-9
    );
    results.push(check(
        "explosion_relaunch",
        event.cancelled && launched,
        format!("velocity {:?}", velocity),
    ));

    // Non-protected players die as usual
    let e = spawn_player(&mut world, "E", 2.0, 0.0, Vec3::new(0.0, 64.0, 0.0));
    let mut event = Damage::new(DamageCause::Attack, 3.0);
    dispatch(&mut world, &roster, e, &mut event);
    results.push(check(
        "unprotected_untouched",
        !event.cancelled && health_of(&world, e) == -1.0,
        format!("health {}", health_of(&world, e)),
    ));

    // Exact-floor projection passes through
    let f = spawn_player(&mut world, "F", 5.0, 0.0, Vec3::new(0.0, 64.0, 0.0));
    roster.add(world.get::<&Pid>(f).unwrap().0);
    let mut event = Damage::new(DamageCause::Attack, 4.0);
    dispatch(&mut world, &roster, f, &mut event);
    results.push(check(
        "exact_floor_allowed",
        !event.cancelled && health_of(&world, f) == 1.0,
        format!("health {}", health_of(&world, f)),
    ));

    results
}

// ── 2. Randomized guard sweep ───────────────────────────────────────────

fn run_guard_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized guard sweep ---");
    let mut results = Vec::new();
    let mut rng = rand::thread_rng();

    let mut floor_violations = 0u32;
    let mut vetoes = 0u32;
    const ITERATIONS: u32 = 10_000;

    for _ in 0..ITERATIONS {
        let mut world = World::new();
        let mut roster = Roster::new();
        let health = rng.gen_range(0.1..20.0);
        let absorption = if rng.gen_bool(0.3) {
            rng.gen_range(0.0..8.0)
        } else {
            0.0
        };
        let entity = spawn_player(&mut world, "sweep", health, absorption, Vec3::ZERO);
        roster.add(world.get::<&Pid>(entity).unwrap().0);

        let mut event = Damage::new(DamageCause::Attack, rng.gen_range(0.0..30.0));
        let critical_before = health <= SURVIVAL_FLOOR;
        dispatch(&mut world, &roster, entity, &mut event);

        let after = health_of(&world, entity);
        if event.cancelled {
            vetoes += 1;
            // vetoed: either clamped to the floor or (critical) untouched
            let consistent = if critical_before {
                (after - health).abs() < 1e-9
            } else {
                (after - SURVIVAL_FLOOR).abs() < 1e-9
            };
            if !consistent {
                floor_violations += 1;
            }
        } else if after < SURVIVAL_FLOOR {
            floor_violations += 1;
        }
    }

    if verbose {
        println!("  {} iterations, {} vetoes", ITERATIONS, vetoes);
    }
    results.push(check(
        "floor_invariant_sweep",
        floor_violations == 0,
        format!("{} violations in {} iterations", floor_violations, ITERATIONS),
    ));
    // sanity: the sweep must exercise both paths
    results.push(check(
        "sweep_exercises_both_paths",
        vetoes > 0 && vetoes < ITERATIONS,
        format!("{} vetoes", vetoes),
    ));

    results
}

// ── 3. Randomized knockback sweep ───────────────────────────────────────

fn run_knockback_sweep(_verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized knockback sweep ---");
    let mut results = Vec::new();
    let mut rng = rand::thread_rng();

    let mut bad_vertical = 0u32;
    let mut bad_strength = 0u32;
    const ITERATIONS: u32 = 10_000;

    for _ in 0..ITERATIONS {
        let source = Vec3::new(
            rng.gen_range(-20.0..20.0),
            rng.gen_range(0.0..128.0),
            rng.gen_range(-20.0..20.0),
        );
        let target = Vec3::new(
            rng.gen_range(-20.0..20.0),
            rng.gen_range(0.0..128.0),
            rng.gen_range(-20.0..20.0),
        );
        let Some(v) = knockback::explosion_launch(source, target) else {
            continue;
        };
        if v.y < 0.4 {
            bad_vertical += 1;
        }
        // forcing the vertical floor never inflates the horizontal share
        // past the distance-derived strength
        let distance = source.distance(&target);
        let expected = (1.5 - distance * 0.15).max(0.3);
        let horizontal = (v.x * v.x + v.z * v.z).sqrt();
        if horizontal > expected + 1e-9 {
            bad_strength += 1;
        }
    }

    results.push(check(
        "vertical_minimum",
        bad_vertical == 0,
        format!("{} launches below 0.4", bad_vertical),
    ));
    results.push(check(
        "strength_bounds",
        bad_strength == 0,
        format!("{} out-of-bound strengths", bad_strength),
    ));

    results
}

// ── 4. Command flow ─────────────────────────────────────────────────────

struct HarnessDirectory {
    online: Vec<(PlayerId, String)>,
}

impl PlayerDirectory for HarnessDirectory {
    fn resolve_name(&self, name: &str) -> Option<PlayerId> {
        self.online
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }
    fn display_name(&self, id: PlayerId) -> Option<String> {
        self.online
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, n)| n.clone())
    }
    fn online_players(&self) -> Vec<(PlayerId, String)> {
        self.online.clone()
    }
}

fn run_command_flow(_verbose: bool) -> Vec<TestResult> {
    println!("--- Command flow ---");
    let mut results = Vec::new();

    let mut path = std::env::temp_dir();
    path.push(format!("plotarmor-simtest-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let directory = HarnessDirectory {
        online: vec![
            (PlayerId::random(), "Steve".to_string()),
            (PlayerId::random(), "Alex".to_string()),
        ],
    };

    let mut plugin = plotarmor_core::PlotArmor::new(&path);
    let enabled = plugin.enable().is_ok();
    results.push(check("plugin_enable", enabled, "empty roster".to_string()));

    let feedback = plugin
        .run_command(&directory, &["add", "Steve"])
        .expect("add persists");
    results.push(check(
        "command_add",
        plugin.roster().len() == 1 && feedback.target.is_some(),
        format!("{:?}", feedback.sender),
    ));

    let suggestions = plugin.suggest(&directory, &["add", ""]);
    results.push(check(
        "suggest_excludes_protected",
        suggestions == vec!["Alex".to_string()],
        format!("{:?}", suggestions),
    ));

    // roster survives a restart
    plugin.disable().expect("disable persists");
    let mut reloaded = plotarmor_core::PlotArmor::new(&path);
    reloaded.enable().expect("reload");
    results.push(check(
        "roster_survives_restart",
        reloaded.roster().len() == 1,
        format!("{} protected", reloaded.roster().len()),
    ));

    let _ = std::fs::remove_file(&path);
    results
}
