// Copyright @yucwang 2026

use std::path::PathBuf;

use crate::core::input::InputCommand;
use crate::io::mhd::load_mhd_volume;
use crate::materials::library::MaterialLibrary;
use crate::materials::rule::RuleSet;
use crate::math::constants::{Float, Vector3f};
use crate::math::vector::normalize_or_zero;
use crate::sensors::camera::Camera;
use crate::shapes::region::RegionSettings;
use crate::volumes::grid_volume::Volume;
use crate::volumes::lod::downsample;

/// What the renderer draws each frame. Exactly one mode is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualizeMode {
    /// Bounding box only.
    None,
    SolidPoints,
    AdditivePoints,
    ColorAlphaPoints,
    PhongPoints,
    SelectedPointsOnly,
    EnhanceSelectedPoints,
    Billboards,
    BillboardsWithLod,
    DrawAsArray,
}

impl VisualizeMode {
    pub const ALL: [VisualizeMode; 10] = [
        VisualizeMode::None,
        VisualizeMode::SolidPoints,
        VisualizeMode::AdditivePoints,
        VisualizeMode::ColorAlphaPoints,
        VisualizeMode::PhongPoints,
        VisualizeMode::SelectedPointsOnly,
        VisualizeMode::EnhanceSelectedPoints,
        VisualizeMode::Billboards,
        VisualizeMode::BillboardsWithLod,
        VisualizeMode::DrawAsArray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VisualizeMode::None => "none",
            VisualizeMode::SolidPoints => "solid",
            VisualizeMode::AdditivePoints => "additive",
            VisualizeMode::ColorAlphaPoints => "color-alpha",
            VisualizeMode::PhongPoints => "phong",
            VisualizeMode::SelectedPointsOnly => "selected",
            VisualizeMode::EnhanceSelectedPoints => "enhance",
            VisualizeMode::Billboards => "billboards",
            VisualizeMode::BillboardsWithLod => "billboards-lod",
            VisualizeMode::DrawAsArray => "array",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        VisualizeMode::ALL.iter().copied().find(|m| m.name() == name)
    }
}

/// One selectable data file with the rule sets used to colour it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub path: PathBuf,
    /// Rule set for weighted and shaded modes.
    pub materials: String,
    /// Rule set for solid and additive points.
    pub flat_materials: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub point_size: Float,
    pub billboard_size: Float,
    pub enhance_distance: Float,
    pub lod_distance: Float,
    pub lod_hysteresis: Float,
    pub additive_gain: Float,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            billboard_size: 0.004,
            enhance_distance: 2.0,
            lod_distance: 8.0,
            lod_hysteresis: 0.0,
            additive_gain: 0.1,
        }
    }
}

pub fn default_light() -> Vector3f {
    Vector3f::new(2.0, 2.0, 0.0)
}

/// All mutable viewer state: loaded volumes, active rules, mode, light and
/// region. Renderers only read it.
pub struct Session {
    datasets: Vec<Dataset>,
    active: usize,
    library: MaterialLibrary,
    volume: Volume,
    reduced: Volume,
    rules: RuleSet,
    flat_rules: RuleSet,
    generation: u64,
    mode: VisualizeMode,
    light: Vector3f,
    default_light: Vector3f,
    region: RegionSettings,
    settings: RenderSettings,
}

impl Session {
    /// Loads the first dataset, if there is one.
    pub fn new(datasets: Vec<Dataset>, library: MaterialLibrary, settings: RenderSettings, light: Vector3f) -> Self {
        let mut session = Session {
            datasets,
            active: 0,
            library,
            volume: Volume::empty(),
            reduced: Volume::empty(),
            rules: RuleSet::default(),
            flat_rules: RuleSet::default(),
            generation: 0,
            mode: VisualizeMode::None,
            light,
            default_light: light,
            region: RegionSettings::for_bounds(&Volume::empty().normalized_bounds()),
            settings,
        };
        session.load_active();
        session
    }

    /// Session around an already decoded volume, with no dataset list.
    pub fn with_volume(volume: Volume, rules: RuleSet, flat_rules: RuleSet) -> Self {
        let mut session = Session::new(Vec::new(), MaterialLibrary::new(), RenderSettings::default(), default_light());
        session.rules = rules;
        session.flat_rules = flat_rules;
        session.install(volume);
        session
    }

    fn load_active(&mut self) {
        let dataset = match self.datasets.get(self.active) {
            Some(d) => d.clone(),
            None => return,
        };
        log::info!("Loading dataset '{}' from {}.", dataset.name, dataset.path.display());
        self.rules = resolve_rules(&self.library, &dataset.materials);
        self.flat_rules = resolve_rules(&self.library, &dataset.flat_materials);
        let volume = load_mhd_volume(&dataset.path);
        if volume.is_empty() {
            log::warn!("Dataset '{}' has no samples.", dataset.name);
        }
        self.install(volume);
    }

    fn install(&mut self, volume: Volume) {
        self.reduced = downsample(&volume);
        self.region = RegionSettings::for_bounds(&volume.normalized_bounds());
        self.volume = volume;
        self.mode = VisualizeMode::None;
        self.generation += 1;
    }

    pub fn apply(&mut self, command: InputCommand, camera: &Camera) {
        match command {
            InputCommand::SetMode(mode) => {
                log::info!("Visualize mode: {}", mode.name());
                self.mode = mode;
            }
            InputCommand::NextDataset => {
                if self.datasets.is_empty() {
                    log::warn!("No other dataset to switch to.");
                    return;
                }
                self.active = (self.active + 1) % self.datasets.len();
                self.load_active();
            }
            InputCommand::LightToCamera => self.light = *camera.position(),
            InputCommand::ResetLight => self.light = self.default_light,
            InputCommand::MoveLight(delta) => self.light += delta,
            InputCommand::SelectRegion(kind) => self.region.kind = kind,
            InputCommand::MoveRegion(delta) => self.region.translate(&delta),
            InputCommand::ResizeRegion(amount) => self.region.resize(amount),
            InputCommand::CycleSlabAxis => self.region.cycle_slab_axis(),
        }
    }

    pub fn set_mode(&mut self, mode: VisualizeMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> VisualizeMode {
        self.mode
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn reduced_volume(&self) -> &Volume {
        &self.reduced
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn flat_rules(&self) -> &RuleSet {
        &self.flat_rules
    }

    /// Bumped every time a volume is installed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn light(&self) -> &Vector3f {
        &self.light
    }

    /// Direction from the volume centre towards the light.
    pub fn light_dir(&self) -> Vector3f {
        normalize_or_zero(&self.light)
    }

    pub fn region(&self) -> &RegionSettings {
        &self.region
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn active_dataset(&self) -> Option<&Dataset> {
        self.datasets.get(self.active)
    }

    /// Makes dataset `index` the active one and loads it.
    pub fn select_dataset(&mut self, index: usize) -> bool {
        if index >= self.datasets.len() {
            return false;
        }
        self.active = index;
        self.load_active();
        true
    }
}

fn resolve_rules(library: &MaterialLibrary, name: &str) -> RuleSet {
    match library.get(name) {
        Some(set) => set.clone(),
        None => {
            log::warn!("Unknown material set '{}'; nothing will be classified.", name);
            RuleSet::new(name, Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::key_to_command;
    use crate::math::vector::Axis;
    use crate::shapes::region::RegionKind;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(dir: &std::path::Path, name: &str, dims: (usize, usize, usize), fill: u8) -> Dataset {
        let header = format!(
            "ObjectType = Image\nNDims = 3\nBinaryData = True\nCompressedData = False\n\
             DimSize = {} {} {}\nElementType = MET_UCHAR\nElementDataFile = {}.raw\n",
            dims.0, dims.1, dims.2, name
        );
        let count = dims.0 * dims.1 * dims.2;
        let payload: Vec<u8> = (0..count).map(|i| fill.wrapping_add(i as u8)).collect();
        fs::write(dir.join(format!("{}.mhd", name)), header).unwrap();
        fs::write(dir.join(format!("{}.raw", name)), payload).unwrap();
        Dataset {
            name: name.to_string(),
            path: dir.join(format!("{}.mhd", name)),
            materials: "bonsai".to_string(),
            flat_materials: "bonsai_flat".to_string(),
        }
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in VisualizeMode::ALL.iter() {
            assert_eq!(VisualizeMode::parse(mode.name()), Some(*mode));
        }
        assert_eq!(VisualizeMode::parse("wireframe"), None);
    }

    #[test]
    fn test_dataset_cycling() {
        let dir = TempDir::new().unwrap();
        let a = write_dataset(dir.path(), "a", (4, 4, 4), 0);
        let mut b = write_dataset(dir.path(), "b", (6, 2, 2), 10);
        b.materials = "backpack".to_string();

        let mut session = Session::new(vec![a, b], MaterialLibrary::builtin(), RenderSettings::default(), default_light());
        assert_eq!(session.volume().dims(), (4, 4, 4));
        assert_eq!(session.reduced_volume().dims(), (3, 3, 3));
        assert_eq!(session.rules().name, "bonsai");
        let first_generation = session.generation();

        let camera = Camera::default();
        session.apply(InputCommand::SetMode(VisualizeMode::PhongPoints), &camera);
        session.apply(InputCommand::NextDataset, &camera);
        assert_eq!(session.volume().dims(), (6, 2, 2));
        assert_eq!(session.rules().name, "backpack");
        assert_eq!(session.mode(), VisualizeMode::None);
        assert!(session.generation() > first_generation);

        session.apply(InputCommand::NextDataset, &camera);
        assert_eq!(session.active_dataset().unwrap().name, "a");
    }

    #[test]
    fn test_light_and_region_commands() {
        let mut session = Session::with_volume(Volume::uniform(4, 4, 4, 0.5), RuleSet::default(), RuleSet::default());
        let camera = Camera::look_at(Vector3f::new(0.0, 0.0, 3.0), Vector3f::zeros(), Vector3f::y());

        for key in ".]]".chars() {
            session.apply(key_to_command(key).unwrap(), &camera);
        }
        assert_eq!(*session.light(), Vector3f::new(3.0, 2.0, 2.0));
        session.apply(InputCommand::LightToCamera, &camera);
        assert_eq!(session.light_dir(), Vector3f::new(0.0, 0.0, 1.0));
        session.apply(InputCommand::ResetLight, &camera);
        assert_eq!(*session.light(), default_light());

        for key in "bood".chars() {
            session.apply(key_to_command(key).unwrap(), &camera);
        }
        assert_eq!(session.region().kind, RegionKind::Slab);
        assert_eq!(session.region().slab_axis, Axis::Z);
        let origin = session.region().slab_origin;
        session.apply(key_to_command('s').unwrap(), &camera);
        assert!((session.region().slab_origin - origin - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_missing_dataset_gives_empty_volume() {
        let dir = TempDir::new().unwrap();
        let dataset = Dataset {
            name: "ghost".to_string(),
            path: dir.path().join("ghost.mhd"),
            materials: "nope".to_string(),
            flat_materials: "bonsai_flat".to_string(),
        };
        let session = Session::new(vec![dataset], MaterialLibrary::builtin(), RenderSettings::default(), default_light());
        assert!(session.volume().is_empty());
        assert!(session.rules().is_empty());
        assert!(!session.flat_rules().is_empty());
    }
}
