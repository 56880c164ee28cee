//! Generate a dungeon level and walk a probe through its first corridor.
//!
//! Usage: dungeon_inspect [level] [seed] [config.toml]

use anyhow::{Context, Result};
use glam::Vec3;
use hearth_dungeon::{
    constants::physics::DEFAULT_ENTITY_RADIUS, constants::spawn::EYE_HEIGHT, Level, LevelConfig,
    LevelGenerator, MoveRequest, MovementResolver, SpawnFinder, SpawnSettings, SurfaceKind,
};

const PROBE_STEP: f32 = 0.25;
const MAX_PROBE_STEPS: usize = 2000;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level: u32 = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid level '{}'", arg))?,
        None => 1,
    };
    let seed: Option<u64> = match args.next() {
        Some(arg) => Some(arg.parse().with_context(|| format!("invalid seed '{}'", arg))?),
        None => None,
    };
    let mut config = match args.next() {
        Some(path) => LevelConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => LevelConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let generator = LevelGenerator::new(config.clone())?;
    let layout = generator.generate_layout(level);

    println!("Level {} (seed {})", layout.level, layout.seed);
    println!("  rooms:       {}", layout.room_count());
    println!("  connections: {}", layout.connection_count());
    println!("  legs:        {}", layout.corridors.len());
    println!("  connected:   {}", layout.is_connected());
    println!("  floors:      {}", layout.render.floors.len());
    println!("  walls:       {}", layout.render.walls.len());
    println!("  ceilings:    {}", layout.render.ceilings.len());

    for (i, room) in layout.rooms.iter().enumerate() {
        println!(
            "  room {:2}: ({:5.1}, {:5.1}) {:4.1}x{:4.1}, {} doorways, links {:?}",
            i,
            room.rect.x,
            room.rect.y,
            room.rect.width,
            room.rect.height,
            room.doorways.len(),
            room.connections.iter().map(|c| c.index()).collect::<Vec<_>>()
        );
    }

    let level = Level::from_layout(layout).with_resolver(MovementResolver::from_config(&config));
    let query = level.query();
    let wall_count = level
        .layout()
        .colliders
        .iter()
        .filter(|c| c.surface == Some(SurfaceKind::Wall))
        .count();
    println!("Registered {} colliders ({} walls)", level.static_collider_count(), wall_count);

    let candidates = level.layout().spawn_candidates();
    let spawn = SpawnFinder::find_spawn(&query, &candidates, &SpawnSettings::default());
    println!("Spawn at {:?} (grounded: {})", spawn.position, spawn.grounded);

    let legs = &level.layout().corridors;
    if legs.len() < 2 {
        println!("No corridor to walk");
        return Ok(());
    }

    // Walk the first connection: both legs, centre line, eye height
    let resolver = level.resolver();
    let waypoints = [legs[0].end(), legs[1].end()];
    let mut position = Vec3::new(legs[0].x1, EYE_HEIGHT, legs[0].y1);
    let mut steps = 0;
    let mut blocked = 0;

    for target in waypoints {
        let goal = Vec3::new(target.x, EYE_HEIGHT, target.y);
        while (goal - position).length() > PROBE_STEP && steps < MAX_PROBE_STEPS {
            let dir = (goal - position).normalize_or_zero();
            let request = MoveRequest::new(position, position + dir * PROBE_STEP, DEFAULT_ENTITY_RADIUS, dir);
            let result = resolver.resolve(&query, request);
            if result.collided {
                blocked += 1;
            }
            position = result.position;
            steps += 1;
        }
        if (goal - position).length() > PROBE_STEP {
            println!("Probe stuck at ({:.1}, {:.1})", position.x, position.z);
            break;
        }
        position = goal;
    }

    let feet = Vec3::new(position.x, 0.0, position.z);
    println!(
        "Probe reached ({:.1}, {:.1}) in {} steps, {} blocked, grounded: {}",
        position.x,
        position.z,
        steps,
        blocked,
        SpawnFinder::is_grounded_default(&query, feet)
    );

    Ok(())
}
