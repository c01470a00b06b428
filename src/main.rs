//! Midi Balls entry point
//!
//! Headless demo: seeds a world, runs it through three movements with a
//! different key each, and prints a summary of what the swarm played.
//! Usage: `midi-balls [seed] [config.json]`

use midi_balls::config::SimConfig;
use midi_balls::consts;
use midi_balls::events::{FanoutSink, ImpactRecorder, LogSink};
use midi_balls::midi::MidiChimes;
use midi_balls::notes::Scale;
use midi_balls::sim::{World, tick};

const DEFAULT_SEED: u64 = 42;
const TICKS_PER_PHASE: u64 = 200;

fn main() {
    env_logger::init();
    log::info!("Midi Balls starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Bad seed {:?}: {}, using {}", raw, e, DEFAULT_SEED);
                DEFAULT_SEED
            }
        },
        None => DEFAULT_SEED,
    };
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => SimConfig::from_json(&json),
            Err(e) => {
                log::error!("Cannot read config {:?}: {}, using defaults", path, e);
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    };

    let mut world = World::with_config(seed, config);
    let mut chimes = MidiChimes::new(seed, world.config.width);
    let mut recorder = ImpactRecorder::new();

    // First movement: middle C, major seventh
    run_phase(&mut world, &mut chimes, &mut recorder);

    // Second movement: up a fifth, next chord in the cycle
    chimes.key_mut().shift_root(7);
    chimes.key_mut().cycle_chord();
    run_phase(&mut world, &mut chimes, &mut recorder);

    // Third movement: pentatonic, in slow motion
    chimes.key_mut().set_scale(Scale::Pentatonic);
    world.set_speed_scale(consts::SPEED_SCALE * consts::SLOMO_FACTOR);
    run_phase(&mut world, &mut chimes, &mut recorder);

    let messages = chimes.drain();
    log::info!(
        "Demo done: {} ticks, {} impacts, {} MIDI messages",
        world.tick_count,
        recorder.events.len(),
        messages.len()
    );
    println!("seed          {}", world.seed);
    println!("ticks         {}", world.tick_count);
    println!("wall bounces  {}", recorder.wall_count());
    println!("ball bounces  {}", recorder.body_count());
    println!("midi messages {}", messages.len());
    if let Some(loudest) = recorder
        .events
        .iter()
        .max_by(|a, b| a.intensity().total_cmp(&b.intensity()))
    {
        println!(
            "loudest hit   {:.2} at ({:.0}, {:.0})",
            loudest.intensity(),
            loudest.pos().x,
            loudest.pos().y
        );
    }
}

/// Run one movement, fanning impacts out to MIDI, the recorder and the log
fn run_phase(world: &mut World, chimes: &mut MidiChimes, recorder: &mut ImpactRecorder) {
    log::info!(
        "Phase at tick {}: root {}, chord {:?}",
        world.tick_count,
        chimes.key().root(),
        chimes.key().chord()
    );
    let mut sink = FanoutSink::new();
    sink.push(&mut *chimes);
    sink.push(&mut *recorder);
    sink.push(LogSink);
    for _ in 0..TICKS_PER_PHASE {
        tick(world, &mut sink);
    }
}
