//! Dungen demo — generates a small dungeon with both strategies and
//! prints the resulting room list.
//!
//! Usage:
//! ```text
//! cargo run --example generate            # seed 0
//! cargo run --example generate -- 42      # explicit seed
//! ```
//!
//! Set `RUST_LOG=dungen=debug` to watch the generators work.

use dungen::blueprint::{RoomBlueprint, RoomKind};
use dungen::generator::{Dungeon, GeneratorOptions, SinglePathGenerator, TopologyGenerator};
use dungen::geometry::{Polygon, Transform};
use dungen::math::Point2;
use dungen::topology::Topology;

fn main() -> dungen::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("dungen=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);

    let catalogue = build_catalogue()?;

    println!("== single path (seed {seed}) ==");
    let options = GeneratorOptions::new(6, 5)?;
    let dungeon = SinglePathGenerator::new(seed, catalogue.clone(), options)?.generate()?;
    print_dungeon(&dungeon);

    println!();
    println!("== topology driven (seed {seed}) ==");
    let topology = Topology::new(
        vec![
            ("entry".to_owned(), Some(vec![RoomKind::Spawn])),
            ("hall".to_owned(), None),
            ("vault".to_owned(), None),
            ("stairs".to_owned(), Some(vec![RoomKind::Final])),
        ],
        vec![
            ("entry".to_owned(), "hall".to_owned()),
            ("hall".to_owned(), "vault".to_owned()),
            ("vault".to_owned(), "stairs".to_owned()),
        ],
    )?;
    let options = GeneratorOptions::new(4, 3)?;
    let dungeon = TopologyGenerator::new(topology, seed, catalogue, options)?.generate()?;
    print_dungeon(&dungeon);

    Ok(())
}

fn build_catalogue() -> dungen::Result<Vec<RoomBlueprint>> {
    let square = |size: f64| {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, size),
            Point2::new(size, size),
            Point2::new(size, 0.0),
        ])
    };

    let spawn = RoomBlueprint::spawn(
        "atrium",
        square(6.0)?,
        vec![Point2::new(6.0, 3.0)],
        vec![],
        Point2::new(3.0, 3.0),
    )?;
    let corridor = RoomBlueprint::normal(
        "corridor",
        square(4.0)?,
        vec![Point2::new(0.0, 2.0), Point2::new(4.0, 2.0)],
        Transform::ROTATIONS.to_vec(),
    )?;
    let bend = RoomBlueprint::normal(
        "bend",
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(2.0, 4.0),
            Point2::new(2.0, 2.0),
            Point2::new(6.0, 2.0),
            Point2::new(6.0, 0.0),
        ])?,
        vec![Point2::new(0.0, 1.0), Point2::new(5.0, 2.0)],
        Transform::ROTATIONS.to_vec(),
    )?;
    let stairs = RoomBlueprint::final_room(
        "stairwell",
        square(4.0)?,
        vec![Point2::new(0.0, 2.0)],
        Transform::ROTATIONS.to_vec(),
        Point2::new(2.0, 2.0),
    )?;
    Ok(vec![spawn, corridor, bend, stairs])
}

fn print_dungeon(dungeon: &Dungeon) {
    println!("{} rooms generated", dungeon.len());
    for room in dungeon.iter() {
        let outline = room.blueprint().outline();
        let doors: Vec<String> = room
            .doors()
            .iter()
            .map(|target| match target {
                Some(id) => format!("{id:?}"),
                None => "open".to_owned(),
            })
            .collect();
        println!(
            "  {:?} depth={} kind={:?} name={} bbox=({}, {})..({}, {}) doors={:?}",
            room.id(),
            room.depth(),
            room.kind(),
            room.blueprint().name(),
            outline.min().x,
            outline.min().y,
            outline.max().x,
            outline.max().y,
            doors
        );
    }
}
