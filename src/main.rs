// Copyright 2020 TwoCookingMice

use std::env;
use std::path::Path;

use volviz::core::input::parse_key_sequence;
use volviz::core::session::{default_light, Dataset, RenderSettings, Session, VisualizeMode};
use volviz::core::session_loader::load_session;
use volviz::io::csv::write_primitives_to_file;
use volviz::materials::library::MaterialLibrary;
use volviz::math::constants::Vector3f;
use volviz::math::vector::parse_vector3;
use volviz::renderers::recorder::FrameRecorder;
use volviz::renderers::simple::{Renderer, SimpleRenderer};
use volviz::sensors::camera::Camera;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <session.xml | volume.mhd> [--mode NAME] [--camera X,Y,Z] [--target X,Y,Z] \
         [--up X,Y,Z] [--dataset N] [--keys KEYS] [--csv out.csv]",
        program
    );
    eprintln!(
        "Modes: {}",
        VisualizeMode::ALL.iter().map(|m| m.name()).collect::<Vec<_>>().join(", ")
    );
    std::process::exit(1);
}

fn parse_vector_arg(program: &str, flag: &str, value: Option<&String>) -> Vector3f {
    match value.and_then(|v| parse_vector3(v)) {
        Some(v) => v,
        None => {
            eprintln!("{} expects three comma separated numbers", flag);
            usage(program)
        }
    }
}

fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut mode: Option<VisualizeMode> = None;
    let mut origin = Vector3f::new(0.0, 0.0, 3.0);
    let mut target = Vector3f::zeros();
    let mut up = Vector3f::new(0.0, 1.0, 0.0);
    let mut dataset: Option<usize> = None;
    let mut keys = String::new();
    let mut csv_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                mode = args.get(i).and_then(|v| VisualizeMode::parse(v));
                if mode.is_none() {
                    usage(&args[0]);
                }
            }
            "--camera" => {
                i += 1;
                origin = parse_vector_arg(&args[0], "--camera", args.get(i));
            }
            "--target" => {
                i += 1;
                target = parse_vector_arg(&args[0], "--target", args.get(i));
            }
            "--up" => {
                i += 1;
                up = parse_vector_arg(&args[0], "--up", args.get(i));
            }
            "--dataset" => {
                i += 1;
                dataset = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--keys" => {
                i += 1;
                keys = args.get(i).cloned().unwrap_or_default();
            }
            "--csv" => {
                i += 1;
                csv_path = args.get(i).cloned();
            }
            other => log::warn!("Ignoring unknown argument '{}'.", other),
        }
        i += 1;
    }

    let is_header = Path::new(input_path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("mhd"));
    let mut session = if is_header {
        let dataset = Dataset {
            name: Path::new(input_path)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| input_path.clone()),
            path: Path::new(input_path).to_path_buf(),
            materials: "bonsai".to_string(),
            flat_materials: "bonsai_flat".to_string(),
        };
        Session::new(vec![dataset], MaterialLibrary::builtin(), RenderSettings::default(), default_light())
    } else {
        match load_session(input_path) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to load session {}: {}", input_path, e);
                std::process::exit(1);
            }
        }
    };

    if let Some(index) = dataset {
        if !session.select_dataset(index) {
            log::error!("Dataset {} does not exist ({} available).", index, session.datasets().len());
            std::process::exit(1);
        }
    }
    if session.volume().is_empty() {
        log::error!("Nothing to render: the volume is empty.");
        std::process::exit(1);
    }

    let camera = Camera::look_at(origin, target, up);
    for command in parse_key_sequence(&keys) {
        session.apply(command, &camera);
    }
    if let Some(mode) = mode {
        session.set_mode(mode);
    }

    let (w, h, d) = session.volume().dims();
    log::info!(
        "Volume {}x{}x{}, reduced {:?}, mode {}, rules '{}'.",
        w, h, d,
        session.reduced_volume().dims(),
        session.mode().name(),
        session.rules().name
    );

    let mut renderer = SimpleRenderer::new(&session);
    let mut recorder = FrameRecorder::new();
    let stats = renderer.render(&session, &camera, &mut recorder);
    let (points, quads, wires) = recorder.counts();
    log::info!(
        "Frame: {} samples, {} points, {} quads, {} wireframe pieces.",
        stats.samples, points, quads, wires
    );
    if let Some(state) = recorder.state() {
        log::info!("Render state: {:?}", state);
    }

    if let Some(path) = csv_path {
        match write_primitives_to_file(&path, recorder.primitives()) {
            Ok(()) => log::info!("Wrote {} primitives to {}.", recorder.primitives().len(), path),
            Err(e) => {
                log::error!("Could not write {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }
}
