//! A recorded practice session played back through the full data model.
//!
//! The fixture is written with the public codec and layout tables only, the
//! way a host-side recorder would produce it.

use rfstats::config::{CoreSettings, VehiclePhysics};
use rfstats::layout::{scoring as s, telemetry as t, vehicle_scoring as v};
use rfstats::recorders::LapKind;
use rfstats::replay::{FrameTag, SnapshotReplay, SnapshotWriter};
use rfstats::types::{Vector3, codec};
use rfstats::{DataMode, HostVersion, LiveGameData, VehicleState};

const TRACK_LENGTH: f32 = 1000.0;

fn telemetry(fuel: f32, speed_ms: f32) -> Vec<u8> {
    let mut bytes = vec![0u8; t::SIZE];
    codec::write_f32(&mut bytes, t::DELTA_TIME, 0.01);
    codec::write_vector3(&mut bytes, t::LOCAL_VEL, Vector3::new(0.0, 0.0, -speed_ms));
    codec::write_f32(&mut bytes, t::ENGINE_RPM, 17_000.0);
    codec::write_f32(&mut bytes, t::ENGINE_OIL_TEMP, 105.0);
    codec::write_f32(&mut bytes, t::FUEL, fuel);
    bytes
}

struct PlayerTick {
    time: f32,
    laps: i16,
    sector: i8,
    distance: f32,
    lap_start: f32,
    current_s1: f32,
    last: (f32, f32, f32),
}

fn scoring(tick: &PlayerTick) -> Vec<u8> {
    let mut bytes = vec![0u8; s::SIZE + v::SIZE];
    codec::write_string(&mut bytes, s::TRACK_NAME, s::TRACK_NAME_LEN, "Test Oval");
    codec::write_i32(&mut bytes, s::SESSION, 1);
    codec::write_f32(&mut bytes, s::CURRENT_ET, tick.time);
    codec::write_f32(&mut bytes, s::LAP_DIST, TRACK_LENGTH);
    codec::write_i32(&mut bytes, s::NUM_VEHICLES, 1);
    codec::write_bool(&mut bytes, s::IN_REALTIME, true);

    let vehicle = &mut bytes[s::SIZE..];
    codec::write_string(vehicle, v::DRIVER_NAME, v::DRIVER_NAME_LEN, "Player");
    codec::write_i16(vehicle, v::TOTAL_LAPS, tick.laps);
    codec::write_i8(vehicle, v::SECTOR, tick.sector);
    codec::write_f32(vehicle, v::LAP_DIST, tick.distance);
    codec::write_f32(vehicle, v::LAST_SECTOR1, tick.last.0);
    codec::write_f32(vehicle, v::LAST_SECTOR2, tick.last.1);
    codec::write_f32(vehicle, v::LAST_LAP_TIME, tick.last.2);
    codec::write_f32(vehicle, v::CUR_SECTOR1, tick.current_s1);
    codec::write_f32(vehicle, v::CUR_SECTOR2, -1.0);
    codec::write_bool(vehicle, v::IS_PLAYER, true);
    codec::write_i8(vehicle, v::CONTROL, 0);
    codec::write_u8(vehicle, v::PLACE, 1);
    codec::write_f32(vehicle, v::LAP_START_ET, tick.lap_start);
    bytes
}

/// Four laps: 60 s, 60 s, 58 s, burning 8 liters per lap from 108.
fn record_session() -> Vec<u8> {
    let laps = [(-1.0, -1.0, -1.0), (20.0, 40.0, 60.0), (20.0, 40.0, 60.0), (19.0, 38.0, 58.0)];
    let mut writer = SnapshotWriter::new(Vec::new(), HostVersion::V3).unwrap();
    writer.write_session_started().unwrap();
    writer.write_realtime_entered().unwrap();
    // Placement spike inside the warm-up window.
    writer.write_frame(FrameTag::Telemetry, &telemetry(108.0, 500.0)).unwrap();

    let mut lap_start = 0.0;
    for (completed, last) in laps.into_iter().enumerate() {
        let laps_completed = i16::try_from(completed).unwrap();
        let fuel = 108.0 - 8.0 * completed as f32;
        writer.write_frame(FrameTag::Telemetry, &telemetry(fuel, 80.0)).unwrap();
        writer
            .write_frame(
                FrameTag::Scoring,
                &scoring(&PlayerTick {
                    time: lap_start,
                    laps: laps_completed,
                    sector: 1,
                    distance: 0.0,
                    lap_start,
                    current_s1: -1.0,
                    last,
                }),
            )
            .unwrap();
        if completed < 3 {
            writer.write_frame(FrameTag::Telemetry, &telemetry(fuel - 4.0, 75.0)).unwrap();
            writer
                .write_frame(
                    FrameTag::Scoring,
                    &scoring(&PlayerTick {
                        time: lap_start + 30.0,
                        laps: laps_completed,
                        sector: 2,
                        distance: 500.0,
                        lap_start,
                        current_s1: 19.5,
                        last,
                    }),
                )
                .unwrap();
        }
        lap_start += laps[(completed + 1).min(3)].2.max(0.0);
    }
    writer.write_realtime_exited().unwrap();
    writer.into_inner()
}

fn replay_into(recording: &[u8], settings: CoreSettings, mode: DataMode) -> LiveGameData {
    let mut replay = SnapshotReplay::open(recording).unwrap();
    let mut game = replay.new_game(settings, VehiclePhysics::default()).unwrap();
    game.set_data_mode(mode);
    replay.play(&mut game).unwrap();
    game
}

#[test]
fn replayed_session_produces_statistics() {
    let _ = tracing_subscriber::fmt::try_init();
    let recording = record_session();
    let game = replay_into(&recording, CoreSettings::default(), DataMode::Replay);

    assert_eq!(game.session_id(), 1);
    assert_eq!(game.realtime_entered_id(), 1);
    assert!(!game.is_in_realtime());
    assert_eq!(game.scoring_info().track_name(), "Test Oval");

    let laptimes = game.laptimes().borrow();
    let player = laptimes.competitor("Player").unwrap();
    assert_eq!(player.laps_completed(), 3);
    assert_eq!(player.lap(1).unwrap().sectors, [Some(20.0), Some(20.0), Some(20.0)]);
    // The first lap was already running when the car was first seen.
    assert_eq!(player.lap(1).unwrap().kind(), LapKind::Unknown);
    assert_eq!(player.lap(2).unwrap().kind(), LapKind::Flying);
    assert_eq!(player.lap(3).and_then(|l| l.laptime()), Some(58.0));
    assert_eq!(player.fastest_lap().map(|l| l.lap), Some(3));
    assert_eq!(laptimes.session_fastest().map(|(name, _)| name), Some("Player"));
    drop(laptimes);

    let fuel = game.fuel_usage().borrow();
    assert_eq!(fuel.relevant_laps(), 2);
    assert_eq!(fuel.last_lap(), Some(8.0));
    assert_eq!(fuel.average(), Some(8.0));
    drop(fuel);

    let top_speed = game.top_speed().borrow().top_speed_kmh();
    assert!((top_speed - 288.0).abs() < 1e-2, "top speed {top_speed}");

    let lifetime = game.lifetime().borrow();
    assert!(lifetime.engine_lifetime() < VehiclePhysics::default().engine.lifetime_average);
    drop(lifetime);

    let vehicle = game.scoring_info().vehicle_by_driver("Player").unwrap();
    assert_eq!(game.vehicle_state(vehicle).unwrap(), VehicleState::AbsFastest);
}

#[test]
fn fuel_average_is_persisted_only_for_live_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fuel_usage.txt");
    let settings = CoreSettings { fuel_usage_file: Some(path.clone()), ..CoreSettings::default() };
    let recording = record_session();

    replay_into(&recording, settings.clone(), DataMode::Replay);
    assert!(!path.exists());

    replay_into(&recording, settings.clone(), DataMode::Live);
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "8.000");

    let next = LiveGameData::new(HostVersion::V3, settings, VehiclePhysics::default()).unwrap();
    assert_eq!(next.fuel_usage().borrow().stored_average(), Some(8.0));
}
